//! Batch and archive tests
//!
//! Sibling isolation, ordering and the batch → archive hand-off.

#[cfg(test)]
mod tests {
    use crate::archive::export_archive;
    use crate::batch::{convert_batch, SourceFile};
    use crate::config::{ConversionConfig, ConversionLevel};
    use crate::diagnostics::Severity;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn mock_files() -> Vec<SourceFile> {
        vec![
            SourceFile::new("Header.jsx", "const Header = () => <header/>;"),
            SourceFile::new("Broken.jsx", "function Broken( { return <div/>; }"),
            SourceFile::new("footer.js", "export function Footer() { return <footer/>; }"),
        ]
    }

    #[test]
    fn test_failed_file_does_not_block_siblings() {
        let result = convert_batch(&mock_files(), &ConversionConfig::default());

        let names: Vec<&str> = result.converted_files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Header.tsx", "footer.tsx"]);

        assert_eq!(result.errors.len(), 1, "exactly one entry for the broken file");
        let failed = &result.errors[0];
        assert_eq!(failed.file_name, "Broken.jsx");
        assert!(!failed.errors.is_empty());
        assert!(!failed.errors[0].message.is_empty());
        assert_eq!(failed.errors[0].severity, Severity::Error);
    }

    #[test]
    fn test_converted_content_matches_single_file_conversion() {
        let files = mock_files();
        let result = convert_batch(&files, &ConversionConfig::default());
        let single = crate::transform::convert(&files[0].content, &ConversionConfig::default());
        assert_eq!(result.converted_files[0].content, single.code);
        assert!(result.converted_files[1].content.contains("props: FooterProps"));
    }

    #[test]
    fn test_every_file_failing() {
        let files = vec![
            SourceFile::new("a.jsx", "const = 1;"),
            SourceFile::new("b.jsx", "<div"),
        ];
        let result = convert_batch(&files, &ConversionConfig::default());
        assert!(result.converted_files.is_empty());
        let failed: Vec<&str> = result.errors.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(failed, vec!["a.jsx", "b.jsx"]);
        assert!(!result.is_clean());
    }

    #[test]
    fn test_config_applies_to_every_file() {
        let files = vec![
            SourceFile::new(
                "one.jsx",
                "function One() { const [on, setOn] = useState(true); return <i/>; }",
            ),
            SourceFile::new(
                "two.jsx",
                "function Two() { const [n, setN] = useState(2); return <b/>; }",
            ),
        ];
        let result = convert_batch(&files, &ConversionConfig::with_level(ConversionLevel::Advanced));
        assert!(result.converted_files[0].content.contains("interface OnState"));
        assert!(result.converted_files[1].content.contains("interface NState"));
        assert!(!result.converted_files[1].content.contains("OnState"), "no state leaks between files");
    }

    #[test]
    fn test_batch_output_archives_cleanly() {
        let result = convert_batch(&mock_files(), &ConversionConfig::default());
        let bytes = export_archive(&result.converted_files).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut entry = archive.by_index(1).unwrap();
        assert_eq!(entry.name(), "footer.tsx");
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, result.converted_files[1].content);
    }
}
