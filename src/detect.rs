//! Component Detector
//!
//! Pass 1 of the pipeline. Walks the whole program, names every
//! function-shaped node that can be named, and classifies it by where JSX
//! appears in its body. Named classes extending the framework's `Component`
//! or `PureComponent` are components by their base alone.

use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};
use oxc_span::Span;
use oxc_syntax::scope::ScopeFlags;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    FunctionDeclaration,
    FunctionExpression,
    Arrow,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Detection {
    /// JSX in the function's own body.
    Component,
    /// JSX only inside functions nested in the body.
    Ambiguous,
    NotComponent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord {
    pub name: String,
    pub kind: ComponentKind,
    pub detection: Detection,
    pub has_declared_props: bool,
    /// Span of the function, arrow or class node itself.
    pub span: Span,
}

/// Classifies one function body.
pub fn classify_body(body: &FunctionBody) -> Detection {
    let mut scan = JsxScan::default();
    scan.visit_function_body(body);
    match (scan.own, scan.nested) {
        (true, _) => Detection::Component,
        (false, true) => Detection::Ambiguous,
        (false, false) => Detection::NotComponent,
    }
}

/// Collects every named function that is a component or an ambiguous
/// candidate, in source order. Names are unique; the first occurrence wins.
pub fn collect_components(program: &Program) -> Vec<ComponentRecord> {
    let mut collector = ComponentCollector::default();
    collector.visit_program(program);
    collector.records
}

const COMPONENT_BASES: &[&str] = &["Component", "PureComponent"];
const FRAMEWORK_NAMESPACE: &str = "React";

/// `Component`, `PureComponent`, `React.Component` or `React.PureComponent`.
pub fn is_component_base(super_class: &Expression) -> bool {
    match super_class.without_parentheses() {
        Expression::Identifier(id) => COMPONENT_BASES.contains(&id.name.as_str()),
        Expression::StaticMemberExpression(member) => {
            matches!(&member.object, Expression::Identifier(ns) if ns.name == FRAMEWORK_NAMESPACE)
                && COMPONENT_BASES.contains(&member.property.name.as_str())
        }
        _ => false,
    }
}

fn extends_component(class: &Class) -> bool {
    class.super_class.as_ref().is_some_and(is_component_base)
}

// ═══════════════════════════════════════════════════════════════════════════════
// JSX SCAN
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct JsxScan {
    depth: usize,
    own: bool,
    nested: bool,
}

impl JsxScan {
    fn hit(&mut self) {
        if self.depth == 0 {
            self.own = true;
        } else {
            self.nested = true;
        }
    }
}

impl<'a> Visit<'a> for JsxScan {
    fn visit_function(&mut self, it: &Function<'a>, flags: ScopeFlags) {
        self.depth += 1;
        walk::walk_function(self, it, flags);
        self.depth -= 1;
    }

    fn visit_arrow_function_expression(&mut self, it: &ArrowFunctionExpression<'a>) {
        self.depth += 1;
        walk::walk_arrow_function_expression(self, it);
        self.depth -= 1;
    }

    fn visit_jsx_element(&mut self, it: &JSXElement<'a>) {
        self.hit();
        walk::walk_jsx_element(self, it);
    }

    fn visit_jsx_fragment(&mut self, it: &JSXFragment<'a>) {
        self.hit();
        walk::walk_jsx_fragment(self, it);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COLLECTOR
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct ComponentCollector {
    records: Vec<ComponentRecord>,
    seen: HashSet<String>,
}

impl ComponentCollector {
    fn record(&mut self, name: &str, kind: ComponentKind, span: Span, body: &FunctionBody) {
        if self.seen.contains(name) {
            return;
        }
        let detection = classify_body(body);
        if detection == Detection::NotComponent {
            return;
        }
        self.push(name, kind, detection, span);
    }

    fn record_class(&mut self, name: &str, class: &Class) {
        if !self.seen.contains(name) && extends_component(class) {
            self.push(name, ComponentKind::Class, Detection::Component, class.span);
        }
    }

    fn push(&mut self, name: &str, kind: ComponentKind, detection: Detection, span: Span) {
        debug!(component = name, ?kind, ?detection, "component candidate");
        self.seen.insert(name.to_string());
        self.records.push(ComponentRecord {
            name: name.to_string(),
            kind,
            detection,
            has_declared_props: false,
            span,
        });
    }
}

impl<'a> Visit<'a> for ComponentCollector {
    fn visit_function(&mut self, it: &Function<'a>, flags: ScopeFlags) {
        if it.r#type == FunctionType::FunctionDeclaration {
            if let (Some(id), Some(body)) = (&it.id, &it.body) {
                self.record(&id.name, ComponentKind::FunctionDeclaration, it.span, body);
            }
        }
        walk::walk_function(self, it, flags);
    }

    fn visit_class(&mut self, it: &Class<'a>) {
        if it.r#type == ClassType::ClassDeclaration {
            if let Some(id) = &it.id {
                self.record_class(&id.name, it);
            }
        }
        walk::walk_class(self, it);
    }

    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        if let BindingPattern::BindingIdentifier(id) = &it.id {
            match &it.init {
                Some(Expression::ArrowFunctionExpression(arrow)) => {
                    self.record(&id.name, ComponentKind::Arrow, arrow.span, &arrow.body);
                }
                Some(Expression::FunctionExpression(func)) => {
                    if let Some(body) = &func.body {
                        self.record(&id.name, ComponentKind::FunctionExpression, func.span, body);
                    }
                }
                Some(Expression::ClassExpression(class)) => self.record_class(&id.name, class),
                _ => {}
            }
        }
        walk::walk_variable_declarator(self, it);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn detect(source: &str) -> Vec<(String, ComponentKind, Detection)> {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_jsx(true).with_module(true);
        let ret = Parser::new(&allocator, source, source_type).parse();
        assert!(ret.errors.is_empty(), "fixture should parse");
        collect_components(&ret.program)
            .into_iter()
            .map(|r| (r.name, r.kind, r.detection))
            .collect()
    }

    #[test]
    fn test_function_declaration_returning_jsx() {
        let found = detect("function Foo(props) { return <div/>; }");
        assert_eq!(
            found,
            vec![("Foo".to_string(), ComponentKind::FunctionDeclaration, Detection::Component)]
        );
    }

    #[test]
    fn test_arrow_expression_body_and_function_expression() {
        let found = detect(
            "const A = () => <p/>;\nconst B = function () { return <></>; };",
        );
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], ("A".to_string(), ComponentKind::Arrow, Detection::Component));
        assert_eq!(
            found[1],
            ("B".to_string(), ComponentKind::FunctionExpression, Detection::Component)
        );
    }

    #[test]
    fn test_plain_functions_are_ignored() {
        let found = detect("function add(a, b) { return a + b; }\nconst twice = (x) => x * 2;");
        assert!(found.is_empty());
    }

    #[test]
    fn test_nested_jsx_only_is_ambiguous() {
        let found = detect(
            "function makeRenderer() { return function render() { return <span/>; }; }",
        );
        assert_eq!(found.len(), 1, "named function expressions are not recorded");
        assert_eq!(found[0].0, "makeRenderer");
        assert_eq!(found[0].2, Detection::Ambiguous);
    }

    #[test]
    fn test_jsx_in_callback_with_own_jsx_is_component() {
        let found = detect(
            "const List = ({ items }) => <ul>{items.map((i) => <li>{i}</li>)}</ul>;",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].2, Detection::Component);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let found = detect(
            "function Foo() { return <a/>; }\n{ const Foo = () => <b/>; }",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, ComponentKind::FunctionDeclaration);
    }

    #[test]
    fn test_anonymous_functions_are_skipped() {
        let found = detect("export default function () { return <div/>; }\n[1].map(() => <i/>);");
        assert!(found.is_empty());
    }

    #[test]
    fn test_class_components_by_base() {
        let found = detect(
            "class A extends React.Component { render() { return <a/>; } }
             class B extends PureComponent {}
             const C = class extends React.PureComponent {};
             class Store extends EventEmitter { render() { return <i/>; } }
             class D extends Other.Component {}",
        );
        let names: Vec<&str> = found.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(found
            .iter()
            .all(|(_, kind, det)| *kind == ComponentKind::Class && *det == Detection::Component));
    }

    #[test]
    fn test_render_method_is_not_recorded_separately() {
        let found = detect("class Card extends Component { render() { return <div/>; } }");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_delegating_wrapper_is_not_detected() {
        let found = detect("function Wrapper(props) { return Inner(props); }");
        assert!(found.is_empty());
    }
}
