use thiserror::Error;

/// Failures of a single-file conversion.
///
/// Located variants render as `message (line N, column M)` and expose the
/// position through [`ConvertError::location`].
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    #[error("{message} (line {line}, column {column})")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    #[error("{0}")]
    Transform(String),

    /// Transform failure pinned to a node of the input.
    #[error("{message} (line {line}, column {column})")]
    TransformAt {
        message: String,
        line: u32,
        column: u32,
    },

    #[error("Failed to generate code: {0}")]
    Serialization(String),
}

impl ConvertError {
    /// Transform failure located at a byte offset of `source`.
    pub fn transform_at(message: impl Into<String>, source: &str, offset: u32) -> Self {
        let (line, column) = line_col(source, offset);
        ConvertError::TransformAt {
            message: message.into(),
            line,
            column,
        }
    }

    pub fn location(&self) -> Option<(u32, u32)> {
        match self {
            ConvertError::Parse { line, column, .. }
            | ConvertError::TransformAt { line, column, .. } => Some((*line, *column)),
            ConvertError::Transform(_) | ConvertError::Serialization(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive write failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// 1-based line and column of a byte offset. Offsets past the end clamp to
/// the last position.
pub fn line_col(source: &str, offset: u32) -> (u32, u32) {
    let mut end = (offset as usize).min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() as u32 + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() as u32 + 1;
    (line, column)
}
