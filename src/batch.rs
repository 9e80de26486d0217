//! Batch Orchestrator
//!
//! Runs the single-file pipeline over many inputs, strictly in order. One
//! file's failure never affects another file's result.

use crate::config::ConversionConfig;
use crate::diagnostics::ErrorDetail;
use crate::transform::convert;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiagnostics {
    pub file_name: String,
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Converted files in input order, renamed to `.tsx`.
    pub converted_files: Vec<SourceFile>,
    /// Exactly one entry per file that failed.
    pub errors: Vec<FileDiagnostics>,
    /// Non-fatal diagnostics of files that did convert.
    #[serde(default)]
    pub warnings: Vec<FileDiagnostics>,
}

impl BatchResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn convert_batch(files: &[SourceFile], config: &ConversionConfig) -> BatchResult {
    let mut result = BatchResult::default();

    for file in files {
        let _span = info_span!("convert_file", file = file.name.as_str()).entered();
        let converted = convert(&file.content, config);

        if converted.has_errors() {
            info!(diagnostics = converted.errors.len(), "file failed");
            result.errors.push(FileDiagnostics {
                file_name: file.name.clone(),
                errors: converted.errors,
            });
            continue;
        }

        let name = tsx_file_name(&file.name);
        info!(output = name.as_str(), "file converted");
        if !converted.errors.is_empty() {
            result.warnings.push(FileDiagnostics {
                file_name: file.name.clone(),
                errors: converted.errors,
            });
        }
        result.converted_files.push(SourceFile::new(name, converted.code));
    }

    result
}

/// `.jsx`/`.js` become `.tsx`, `.tsx` is kept, anything else gets `.tsx` appended.
pub fn tsx_file_name(name: &str) -> String {
    if name.ends_with(".tsx") {
        return name.to_string();
    }
    for ext in [".jsx", ".js"] {
        if let Some(stem) = name.strip_suffix(ext) {
            return format!("{}.tsx", stem);
        }
    }
    format!("{}.tsx", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsx_file_name() {
        assert_eq!(tsx_file_name("Button.jsx"), "Button.tsx");
        assert_eq!(tsx_file_name("src/util.js"), "src/util.tsx");
        assert_eq!(tsx_file_name("Card.tsx"), "Card.tsx");
        assert_eq!(tsx_file_name("README"), "README.tsx");
        assert_eq!(tsx_file_name("data.json"), "data.json.tsx");
    }

    #[test]
    fn test_empty_batch() {
        let result = convert_batch(&[], &ConversionConfig::default());
        assert!(result.converted_files.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_warnings_travel_with_converted_files() {
        let files = vec![SourceFile::new(
            "Rest.jsx",
            "function Rest(...args) { return <div/>; }",
        )];
        let result = convert_batch(&files, &ConversionConfig::default());
        assert_eq!(result.converted_files.len(), 1);
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].file_name, "Rest.jsx");
    }

    #[test]
    fn test_batch_json_shape() {
        let files = vec![
            SourceFile::new("a.jsx", "const A = () => <a/>;"),
            SourceFile::new("b.jsx", "const = ;"),
        ];
        let json = serde_json::to_value(convert_batch(&files, &ConversionConfig::default())).unwrap();
        assert_eq!(json["convertedFiles"][0]["name"], "a.tsx");
        assert_eq!(json["errors"][0]["fileName"], "b.jsx");
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }
}
