//! Prop-Declaration Extractor
//!
//! Finds `<Name>.propTypes = { ... }` assignments, records their entries, and
//! removes them from the tree together with every `prop-types` import or
//! `require`. Comments written next to a prop entry travel with it into the
//! synthesized interface.

use crate::config::ConversionConfig;
use crate::interface::{InterfaceMember, SynthesizedInterface};
use crate::type_map::{self, PropShape, DEFAULT_PROP_TYPES_LOCAL};
use oxc_ast::ast::*;
use oxc_ast_visit::{walk_mut, VisitMut};
use oxc_span::{GetSpan, Span};
use tracing::debug;

pub const PROP_TYPES_MODULE: &str = "prop-types";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropDeclarationEntry {
    pub prop_name: String,
    pub raw_type_expression: String,
    pub required: bool,
    pub shape: PropShape,
    /// Source text of the comments written on this entry.
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropDeclaration {
    pub component_name: String,
    pub entries: Vec<PropDeclarationEntry>,
    pub span: Span,
}

impl PropDeclaration {
    pub fn to_interface(&self, config: &ConversionConfig) -> SynthesizedInterface {
        let members = self
            .entries
            .iter()
            .map(|e| {
                InterfaceMember::new(&e.prop_name, e.shape.ts_type(), !e.required)
                    .with_comments(e.comments.clone())
            })
            .collect();
        SynthesizedInterface::with_members(config.interface_name(&self.component_name), members)
    }
}

/// Everything the extractor learned while stripping the program.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Matched declarations in source order.
    pub declarations: Vec<PropDeclaration>,
    pub has_react_import: bool,
    pub removed_imports: usize,
    /// Spans of every statement taken out of the program.
    pub removed_spans: Vec<Span>,
    /// Comments now carried by interface members.
    pub absorbed_comments: Vec<Span>,
}

impl Extraction {
    /// Final declaration for `component`, if any. Later declarations win.
    pub fn declaration_for(&self, component: &str) -> Option<&PropDeclaration> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.component_name == component)
    }

    pub fn declares(&self, component: &str) -> bool {
        self.declaration_for(component).is_some()
    }

    /// Component names with a declaration, first-seen order, deduplicated.
    pub fn declared_components(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for decl in &self.declarations {
            if !names.contains(&decl.component_name.as_str()) {
                names.push(&decl.component_name);
            }
        }
        names
    }
}

/// Strips prop declarations and `prop-types` imports from `program`.
pub fn extract<'a>(program: &mut Program<'a>, source: &str) -> Extraction {
    let prop_types_local = prop_types_local_name(program);
    let has_react_import = program.body.iter().any(|stmt| {
        matches!(stmt, Statement::ImportDeclaration(decl) if decl.source.value == "react")
    });

    let mut removed_spans = Vec::new();
    program.body.retain(|stmt| {
        if is_prop_types_binding(stmt) {
            removed_spans.push(stmt.span());
            false
        } else {
            true
        }
    });
    let removed_imports = removed_spans.len();

    let comments: Vec<Comment> = program.comments.iter().copied().collect();
    let mut stripper = DeclarationStripper {
        source,
        prop_types_local,
        comments: &comments,
        found: Vec::new(),
        absorbed: Vec::new(),
    };
    stripper.visit_program(program);

    let mut declarations = stripper.found;
    declarations.sort_by_key(|d| d.span.start);
    removed_spans.extend(declarations.iter().map(|d| d.span));

    Extraction {
        declarations,
        has_react_import,
        removed_imports,
        removed_spans,
        absorbed_comments: stripper.absorbed,
    }
}

/// `import ... from 'prop-types'` or `const PropTypes = require('prop-types')`.
fn is_prop_types_binding(stmt: &Statement) -> bool {
    match stmt {
        Statement::ImportDeclaration(decl) => decl.source.value == PROP_TYPES_MODULE,
        Statement::VariableDeclaration(decl) => {
            !decl.declarations.is_empty()
                && decl
                    .declarations
                    .iter()
                    .all(|d| d.init.as_ref().is_some_and(is_prop_types_require))
        }
        _ => false,
    }
}

fn is_prop_types_require(expr: &Expression) -> bool {
    let Expression::CallExpression(call) = expr.without_parentheses() else {
        return false;
    };
    let Expression::Identifier(callee) = &call.callee else {
        return false;
    };
    if callee.name != "require" || call.arguments.len() != 1 {
        return false;
    }
    matches!(
        call.arguments[0].as_expression(),
        Some(Expression::StringLiteral(lit)) if lit.value == PROP_TYPES_MODULE
    )
}

/// Local binding of the `prop-types` default or namespace import.
pub fn prop_types_local_name(program: &Program) -> String {
    for stmt in &program.body {
        if let Statement::VariableDeclaration(decl) = stmt {
            let required = decl.declarations.iter().find_map(|d| match (&d.id, &d.init) {
                (BindingPattern::BindingIdentifier(id), Some(init)) if is_prop_types_require(init) => {
                    Some(id.name.to_string())
                }
                _ => None,
            });
            if let Some(local) = required {
                return local;
            }
            continue;
        }
        let Statement::ImportDeclaration(decl) = stmt else {
            continue;
        };
        if decl.source.value != PROP_TYPES_MODULE {
            continue;
        }
        let Some(specifiers) = &decl.specifiers else {
            continue;
        };
        for spec in specifiers {
            match spec {
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    return s.local.name.to_string();
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    return s.local.name.to_string();
                }
                ImportDeclarationSpecifier::ImportSpecifier(_) => {}
            }
        }
    }
    DEFAULT_PROP_TYPES_LOCAL.to_string()
}

// ═══════════════════════════════════════════════════════════════════════════════
// STRIPPER
// ═══════════════════════════════════════════════════════════════════════════════

struct DeclarationStripper<'s> {
    source: &'s str,
    prop_types_local: String,
    comments: &'s [Comment],
    found: Vec<PropDeclaration>,
    absorbed: Vec<Span>,
}

impl<'s> DeclarationStripper<'s> {
    fn match_declaration(&mut self, stmt: &Statement) -> Option<PropDeclaration> {
        let Statement::ExpressionStatement(expr_stmt) = stmt else {
            return None;
        };
        let Expression::AssignmentExpression(assign) = &expr_stmt.expression else {
            return None;
        };
        if assign.operator != AssignmentOperator::Assign {
            return None;
        }
        let AssignmentTarget::StaticMemberExpression(target) = &assign.left else {
            return None;
        };
        if target.property.name != "propTypes" {
            return None;
        }
        let Expression::Identifier(component) = &target.object else {
            return None;
        };

        let entries = match assign.right.without_parentheses() {
            Expression::ObjectExpression(obj) => self.collect_entries(obj),
            _ => {
                debug!(
                    component = component.name.as_str(),
                    "propTypes value is not an object literal"
                );
                Vec::new()
            }
        };

        Some(PropDeclaration {
            component_name: component.name.to_string(),
            entries,
            span: expr_stmt.span,
        })
    }

    fn collect_entries(&mut self, obj: &ObjectExpression) -> Vec<PropDeclarationEntry> {
        let mut entries = Vec::with_capacity(obj.properties.len());
        for (index, property) in obj.properties.iter().enumerate() {
            let next_start = obj
                .properties
                .get(index + 1)
                .map_or(obj.span.end, |next| next.span().start);
            let ObjectPropertyKind::ObjectProperty(prop) = property else {
                debug!("skipping spread in propTypes");
                continue;
            };
            let key = match &prop.key {
                PropertyKey::StaticIdentifier(id) if !prop.computed => id.name.to_string(),
                PropertyKey::StringLiteral(lit) => lit.value.to_string(),
                _ => {
                    debug!("skipping computed propTypes key");
                    continue;
                }
            };
            let (inner, required) = type_map::strip_is_required(&prop.value);
            let comments = self.entry_comments(prop.span, next_start);
            entries.push(PropDeclarationEntry {
                prop_name: key,
                raw_type_expression: prop.value.span().source_text(self.source).to_string(),
                required,
                shape: type_map::classify(inner, &self.prop_types_local),
                comments,
            });
        }
        entries
    }

    /// Comments leading the entry's key, then those trailing it on its line
    /// before the next entry begins.
    fn entry_comments(&mut self, entry: Span, next_start: u32) -> Vec<String> {
        let comments = self.comments;
        let mut texts = Vec::new();
        for comment in comments {
            let leading = comment.is_leading() && comment.attached_to == entry.start;
            let trailing = comment.is_trailing()
                && comment.span.start >= entry.end
                && comment.span.end <= next_start;
            if leading || trailing {
                texts.push(comment.span.source_text(self.source).to_string());
                self.absorbed.push(comment.span);
            }
        }
        texts
    }
}

impl<'a, 's> VisitMut<'a> for DeclarationStripper<'s> {
    fn visit_statements(&mut self, it: &mut oxc_allocator::Vec<'a, Statement<'a>>) {
        walk_mut::walk_statements(self, it);

        let mut matched = Vec::new();
        it.retain(|stmt| match self.match_declaration(stmt) {
            Some(decl) => {
                matched.push(decl);
                false
            }
            None => true,
        });
        self.found.extend(matched);
    }
}
