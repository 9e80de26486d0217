//! Parse Module
//!
//! Front door to the grammar parser. Inputs are parsed under the TypeScript +
//! JSX module grammar so that existing annotations are visible to the
//! annotator and never doubled.

use crate::error::{line_col, ConvertError};
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::Parser;
use oxc_span::SourceType;

pub fn source_type() -> SourceType {
    SourceType::default()
        .with_typescript(true)
        .with_jsx(true)
        .with_module(true)
}

/// Parses `source` into a program owned by `allocator`.
///
/// Any parser diagnostic fails the whole file; the first one is reported.
pub fn parse_module<'a>(allocator: &'a Allocator, source: &'a str) -> Result<Program<'a>, ConvertError> {
    let ret = Parser::new(allocator, source, source_type()).parse();
    if let Some(diagnostic) = ret.errors.first() {
        return Err(parse_failure(diagnostic, source));
    }
    if ret.panicked {
        return Err(ConvertError::Parse {
            message: "Parser stopped before the end of the input".to_string(),
            line: 0,
            column: 0,
        });
    }
    Ok(ret.program)
}

fn parse_failure(diagnostic: &OxcDiagnostic, source: &str) -> ConvertError {
    let offset = diagnostic
        .labels
        .as_ref()
        .and_then(|labels| labels.first())
        .map(|label| label.offset());
    let (line, column) = match offset {
        Some(offset) => line_col(source, u32::try_from(offset).unwrap_or(u32::MAX)),
        None => (0, 0),
    };
    ConvertError::Parse {
        message: diagnostic.message.to_string(),
        line,
        column,
    }
}
