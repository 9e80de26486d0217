//! Archive Exporter

use crate::batch::SourceFile;
use crate::error::ArchiveError;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::debug;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// Packs every file into one deflated ZIP archive, one entry per file.
pub fn export_archive(files: &[SourceFile]) -> Result<Vec<u8>, ArchiveError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in files {
        zip.start_file(file.name.as_str(), options)?;
        zip.write_all(file.content.as_bytes())?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!(entries = files.len(), bytes = bytes.len(), "archive built");
    Ok(bytes)
}

pub fn write_archive(path: &Path, files: &[SourceFile]) -> Result<(), ArchiveError> {
    let bytes = export_archive(files)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}
