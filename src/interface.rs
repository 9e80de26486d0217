//! Interface synthesis
//!
//! Interfaces are assembled as plain data and rendered to text once, right
//! before they are prepended to the generated module.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceMember {
    pub name: String,
    pub ts_type: String,
    pub optional: bool,
    /// Comments printed above the member, verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl InterfaceMember {
    pub fn new(name: impl Into<String>, ts_type: impl Into<String>, optional: bool) -> Self {
        Self {
            name: name.into(),
            ts_type: ts_type.into(),
            optional,
            comments: Vec::new(),
        }
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for comment in &self.comments {
            for (i, line) in comment.lines().enumerate() {
                let indent = if i == 0 { "  " } else { "   " };
                out.push_str(indent);
                out.push_str(line.trim());
                out.push('\n');
            }
        }
        let key = if is_identifier_name(&self.name) {
            self.name.clone()
        } else {
            quote_key(&self.name)
        };
        let marker = if self.optional { "?" } else { "" };
        out.push_str(&format!("  {}{}: {};", key, marker, self.ts_type));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedInterface {
    pub name: String,
    pub members: Vec<InterfaceMember>,
}

impl SynthesizedInterface {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn with_members(name: impl Into<String>, members: Vec<InterfaceMember>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn render(&self) -> String {
        if self.members.is_empty() {
            return format!("interface {} {{}}", self.name);
        }
        let body = self
            .members
            .iter()
            .map(InterfaceMember::render)
            .collect::<Vec<_>>()
            .join("\n");
        format!("interface {} {{\n{}\n}}", self.name, body)
    }
}

/// ASCII-and-unicode approximation of an ECMAScript IdentifierName.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c == '$' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric())
}

fn quote_key(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}
