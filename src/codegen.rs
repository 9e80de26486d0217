//! Codegen module
//!
//! Regenerates source text from the mutated program and assembles the final
//! TSX module: the framework import (when missing), the synthesized
//! interfaces, then the code.

use crate::error::ConvertError;
use crate::interface::SynthesizedInterface;
use oxc_ast::ast::Program;
use oxc_codegen::Codegen;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

pub const REACT_IMPORT: &str = "import React from 'react';";

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Prints `program` back to source text, comments included.
pub fn generate(program: &Program) -> Result<String, ConvertError> {
    panic::catch_unwind(AssertUnwindSafe(|| Codegen::new().build(program).code))
        .map_err(|payload| ConvertError::Serialization(panic_message(payload.as_ref())))
}

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ASSEMBLER
// ═══════════════════════════════════════════════════════════════════════════════

/// Props interfaces first, then hook interfaces whose name is still free.
pub fn merge_interfaces(
    props: Vec<SynthesizedInterface>,
    hooks: Vec<SynthesizedInterface>,
) -> Vec<SynthesizedInterface> {
    let mut merged: Vec<SynthesizedInterface> = Vec::with_capacity(props.len() + hooks.len());
    for interface in props.into_iter().chain(hooks) {
        if merged.iter().any(|existing| existing.name == interface.name) {
            continue;
        }
        merged.push(interface);
    }
    merged
}

pub fn assemble(code: &str, has_react_import: bool, interfaces: &[SynthesizedInterface]) -> String {
    let mut output = String::new();
    if !has_react_import {
        output.push_str(REACT_IMPORT);
        output.push_str("\n\n");
    }
    if !interfaces.is_empty() {
        let rendered: Vec<String> = interfaces.iter().map(SynthesizedInterface::render).collect();
        output.push_str(&rendered.join("\n\n"));
        output.push_str("\n\n");
    }
    output.push_str(code);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::InterfaceMember;
    use crate::parse::parse_module;
    use oxc_allocator::Allocator;

    #[test]
    fn test_assemble_adds_import_and_interfaces() {
        let interfaces = vec![
            SynthesizedInterface::empty("AProps"),
            SynthesizedInterface::with_members(
                "BProps",
                vec![InterfaceMember::new("x", "number", true)],
            ),
        ];
        let out = assemble("const a = 1;\n", false, &interfaces);
        assert_eq!(
            out,
            "import React from 'react';\n\ninterface AProps {}\n\ninterface BProps {\n  x?: number;\n}\n\nconst a = 1;\n"
        );
    }

    #[test]
    fn test_assemble_without_interfaces_or_import() {
        assert_eq!(assemble("code\n", true, &[]), "code\n");
    }

    #[test]
    fn test_merge_keeps_props_over_hooks() {
        let props = vec![SynthesizedInterface::with_members(
            "CountState",
            vec![InterfaceMember::new("label", "string", false)],
        )];
        let hooks = vec![
            SynthesizedInterface::with_members(
                "CountState",
                vec![InterfaceMember::new("value", "number", false)],
            ),
            SynthesizedInterface::empty("ThemeValue"),
        ];
        let merged = merge_interfaces(props, hooks);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].members[0].name, "label");
        assert_eq!(merged[1].name, "ThemeValue");
    }

    #[test]
    fn test_generate_keeps_jsdoc() {
        let allocator = Allocator::default();
        let source = "/** Renders a badge. */\nfunction Badge() { return <b/>; }\n";
        let program = parse_module(&allocator, source).unwrap();
        let code = generate(&program).unwrap();
        assert!(code.contains("Renders a badge."), "got: {}", code);
        assert!(code.contains("function Badge()"));
    }

    #[test]
    fn test_panic_message_payloads() {
        let caught = panic::catch_unwind(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(panic_message(caught.as_ref()), "boom 1");
        let caught = panic::catch_unwind(|| std::panic::panic_any(7u8)).unwrap_err();
        assert_eq!(panic_message(caught.as_ref()), "unknown panic");
    }
}
