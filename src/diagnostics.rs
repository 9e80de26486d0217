//! Error Reporter
//!
//! Turns a failure into a structured [`ErrorDetail`]: location recovered from
//! the message text, a source snippet around the failing line, a category
//! code, and remediation suggestions for the presentation layer.

use lazy_static::lazy_static;
use crate::error::ConvertError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub severity: Severity,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ErrorDetail {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// A non-fatal finding at a known location (used for ambiguity reports).
    pub fn warning(
        code: &str,
        message: String,
        source: &str,
        line: u32,
        column: u32,
        suggestions: Vec<String>,
    ) -> Self {
        ErrorDetail {
            message,
            line,
            column,
            severity: Severity::Warning,
            code: code.to_string(),
            snippet: code_snippet(source, line),
            suggestions,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CATEGORIES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    PropTypes,
    Import,
    Jsx,
    Conversion,
}

impl ErrorCategory {
    pub fn code(self) -> &'static str {
        match self {
            ErrorCategory::Syntax => "SYNTAX_ERROR",
            ErrorCategory::PropTypes => "PROP_TYPES_ERROR",
            ErrorCategory::Import => "IMPORT_ERROR",
            ErrorCategory::Jsx => "JSX_ERROR",
            ErrorCategory::Conversion => "CONVERSION_ERROR",
        }
    }

    fn suggestions(self) -> &'static [&'static str] {
        match self {
            ErrorCategory::Syntax => &[
                "Check for syntax errors like missing brackets or parentheses.",
                "Verify that all JSX tags are properly closed.",
            ],
            ErrorCategory::PropTypes => &[
                "Make sure propTypes are defined correctly.",
                "Consider using TypeScript interfaces instead of PropTypes.",
            ],
            ErrorCategory::Import => &[
                "Verify that all imported modules are available.",
                "Check the import syntax and path correctness.",
            ],
            ErrorCategory::Jsx => &[
                "Make sure every JSX element has a matching closing tag.",
                "Wrap adjacent JSX elements in a single parent or a fragment (<>...</>).",
            ],
            ErrorCategory::Conversion => &[
                "Review the code for syntax errors.",
                "Ensure the JSX code is valid before conversion.",
            ],
        }
    }
}

/// Keyword table, scanned in order. The first hit decides the code.
const CATEGORY_KEYWORDS: &[(ErrorCategory, &[&str])] = &[
    (ErrorCategory::Syntax, &["Unexpected token"]),
    (ErrorCategory::PropTypes, &["propTypes"]),
    (ErrorCategory::Import, &["import", "require"]),
    (ErrorCategory::Jsx, &["JSX"]),
];

fn matching_categories(message: &str) -> Vec<ErrorCategory> {
    CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| message.contains(k)))
        .map(|(category, _)| *category)
        .collect()
}

pub fn classify(message: &str) -> ErrorCategory {
    matching_categories(message)
        .first()
        .copied()
        .unwrap_or(ErrorCategory::Conversion)
}

pub fn suggestions_for(message: &str) -> Vec<String> {
    let mut categories = matching_categories(message);
    if categories.is_empty() {
        categories.push(ErrorCategory::Conversion);
    }
    categories
        .into_iter()
        .flat_map(|c| c.suggestions().iter().map(|s| s.to_string()))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOCATION & SNIPPET
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    static ref LOCATION_SUFFIX_RE: Regex =
        Regex::new(r"\(line (\d+), column (\d+)\)\s*$").unwrap();
    static ref LINE_RE: Regex = Regex::new(r"(?i)\bline:?\s*(\d+)").unwrap();
    static ref COLUMN_RE: Regex = Regex::new(r"(?i)\bcolumn:?\s*(\d+)").unwrap();
}

/// Line and column mentioned in a failure message, 0 when absent.
///
/// A trailing `(line N, column M)` suffix wins over loose mentions earlier in
/// the text, which may be part of an identifier.
pub fn location_from_message(message: &str) -> (u32, u32) {
    if let Some(caps) = LOCATION_SUFFIX_RE.captures(message) {
        let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        if let (Some(line), Some(column)) = (number(1), number(2)) {
            return (line, column);
        }
    }
    let capture = |re: &Regex| {
        re.captures(message)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    (capture(&LINE_RE), capture(&COLUMN_RE))
}

/// Two lines of context on each side of `line`, the failing line marked.
pub fn code_snippet(source: &str, line: u32) -> Option<String> {
    if line == 0 {
        return None;
    }
    let lines: Vec<&str> = source.lines().collect();
    let line = line as usize;
    if line > lines.len() {
        return None;
    }

    let first = line.saturating_sub(2).max(1);
    let last = (line + 2).min(lines.len());
    let width = last.to_string().len();

    let snippet = (first..=last)
        .map(|n| {
            let marker = if n == line { ">" } else { " " };
            format!("{:>width$} {} | {}", n, marker, lines[n - 1], width = width)
        })
        .collect::<Vec<_>>()
        .join("\n");
    Some(snippet)
}

// ═══════════════════════════════════════════════════════════════════════════════
// REPORTER
// ═══════════════════════════════════════════════════════════════════════════════

/// Diagnostic for a failure that aborted the conversion of a file.
pub fn report(failure: &ConvertError, source: &str) -> ErrorDetail {
    build_detail(failure, source, Severity::Error)
}

/// Diagnostic for a failure that was contained to one component.
pub fn report_isolated(failure: &ConvertError, source: &str) -> ErrorDetail {
    build_detail(failure, source, Severity::Warning)
}

fn build_detail(failure: &ConvertError, source: &str, severity: Severity) -> ErrorDetail {
    let message = failure.to_string();
    let (line, column) = failure
        .location()
        .unwrap_or_else(|| location_from_message(&message));
    ErrorDetail {
        line,
        column,
        severity,
        code: classify(&message).code().to_string(),
        snippet: code_snippet(source, line),
        suggestions: suggestions_for(&message),
        message,
    }
}
