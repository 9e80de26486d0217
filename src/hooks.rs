//! Hook Type Processor
//!
//! Scaffolds supplementary interfaces for `useState`, `useReducer` and
//! `useContext` calls. Only runs at the advanced conversion level.

use crate::interface::{InterfaceMember, SynthesizedInterface};
use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HookScan {
    /// Deduplicated by name, first occurrence wins.
    pub interfaces: Vec<SynthesizedInterface>,
    /// Every `use*` callee seen, in first-use order.
    pub hooks_used: Vec<String>,
}

pub fn scan_hooks(program: &Program) -> HookScan {
    let mut visitor = HookVisitor::default();
    visitor.visit_program(program);
    debug!(hooks = ?visitor.scan.hooks_used, "hooks used");
    visitor.scan
}

/// Static type of a `useState` initial value, `None` when unresolved.
pub fn infer_initial_type(value: &Expression) -> Option<&'static str> {
    match value.without_parentheses() {
        Expression::StringLiteral(_) => Some("string"),
        Expression::NumericLiteral(_) => Some("number"),
        Expression::BooleanLiteral(_) => Some("boolean"),
        Expression::NullLiteral(_) => Some("null"),
        Expression::ObjectExpression(_) => Some("Record<string, any>"),
        Expression::ArrayExpression(_) => Some("any[]"),
        Expression::Identifier(ident) if ident.name == "undefined" => Some("undefined"),
        Expression::CallExpression(call) => match &call.callee {
            Expression::Identifier(callee) => match callee.name.as_str() {
                "Array" => Some("any[]"),
                "Object" => Some("Record<string, any>"),
                "String" => Some("string"),
                "Number" => Some("number"),
                "Boolean" => Some("boolean"),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Default)]
struct HookVisitor {
    scan: HookScan,
    /// First array-pattern element of each enclosing declarator, innermost last.
    /// `None` for declarators of any other shape.
    declarators: Vec<Option<String>>,
}

impl HookVisitor {
    fn emit(&mut self, interface: SynthesizedInterface) {
        if self.scan.interfaces.iter().any(|i| i.name == interface.name) {
            return;
        }
        debug!(interface = interface.name.as_str(), "hook interface");
        self.scan.interfaces.push(interface);
    }

    fn first_identifier_arg<'c>(call: &'c CallExpression) -> Option<&'c str> {
        match call.arguments.first()?.as_expression()? {
            Expression::Identifier(ident) => Some(ident.name.as_str()),
            _ => None,
        }
    }

    fn use_state(&mut self, call: &CallExpression) {
        let Some(initial) = call.arguments.first().and_then(|a| a.as_expression()) else {
            return;
        };
        let Some(Some(state_name)) = self.declarators.last().cloned() else {
            return;
        };
        let Some(ts_type) = infer_initial_type(initial) else {
            return;
        };
        self.emit(SynthesizedInterface::with_members(
            format!("{}State", capitalize(&state_name)),
            vec![InterfaceMember::new("value", ts_type, false)],
        ));
    }

    fn use_reducer(&mut self, call: &CallExpression) {
        if self.declarators.is_empty() {
            return;
        }
        let Some(reducer) = Self::first_identifier_arg(call) else {
            return;
        };
        self.emit(SynthesizedInterface::empty(format!("{}State", reducer)));
        self.emit(SynthesizedInterface::with_members(
            format!("{}Action", reducer),
            vec![
                InterfaceMember::new("type", "string", false),
                InterfaceMember::new("payload", "any", true),
            ],
        ));
    }

    fn use_context(&mut self, call: &CallExpression) {
        if let Some(context) = Self::first_identifier_arg(call) {
            self.emit(SynthesizedInterface::empty(format!("{}Value", context)));
        }
    }
}

impl<'a> Visit<'a> for HookVisitor {
    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        let state_name = match &it.id {
            BindingPattern::ArrayPattern(pattern) => match pattern.elements.first() {
                Some(Some(BindingPattern::BindingIdentifier(id))) => Some(id.name.to_string()),
                _ => None,
            },
            _ => None,
        };
        self.declarators.push(state_name);
        walk::walk_variable_declarator(self, it);
        self.declarators.pop();
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if let Expression::Identifier(callee) = &it.callee {
            let name = callee.name.as_str();
            if name.starts_with("use") {
                if !self.scan.hooks_used.iter().any(|h| h == name) {
                    self.scan.hooks_used.push(name.to_string());
                }
                match name {
                    "useState" => self.use_state(it),
                    "useReducer" => self.use_reducer(it),
                    "useContext" => self.use_context(it),
                    _ => {}
                }
            }
        }
        walk::walk_call_expression(self, it);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn scan(source: &str) -> HookScan {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_jsx(true).with_module(true);
        let ret = Parser::new(&allocator, source, source_type).parse();
        assert!(ret.errors.is_empty(), "fixture should parse");
        scan_hooks(&ret.program)
    }

    fn rendered(scan: &HookScan) -> Vec<String> {
        scan.interfaces.iter().map(SynthesizedInterface::render).collect()
    }

    #[test]
    fn test_use_state_numeric() {
        let result = scan("function C() { const [count, setCount] = useState(0); return <p/>; }");
        assert_eq!(rendered(&result), vec!["interface CountState {\n  value: number;\n}"]);
        assert_eq!(result.hooks_used, vec!["useState"]);
    }

    #[test]
    fn test_use_state_inference_table() {
        let cases = [
            ("'x'", "string"),
            ("true", "boolean"),
            ("null", "null"),
            ("{}", "Record<string, any>"),
            ("[]", "any[]"),
            ("undefined", "undefined"),
            ("Array(3)", "any[]"),
            ("Number('4')", "number"),
        ];
        for (init, expected) in cases {
            let result = scan(&format!("const [item, setItem] = useState({});", init));
            assert_eq!(result.interfaces.len(), 1, "init {}", init);
            assert_eq!(result.interfaces[0].members[0].ts_type, expected, "init {}", init);
        }
    }

    #[test]
    fn test_use_state_unresolved_or_unnamed() {
        assert!(scan("const [a, setA] = useState(compute());").interfaces.is_empty());
        assert!(scan("const state = useState(1);").interfaces.is_empty());
        assert!(scan("useState(1);").interfaces.is_empty());
        assert!(scan("const [, setA] = useState(1);").interfaces.is_empty());
    }

    #[test]
    fn test_use_reducer_and_context() {
        let result = scan(
            "const [state, dispatch] = useReducer(todoReducer, []);\nconst theme = useContext(ThemeContext);",
        );
        assert_eq!(
            rendered(&result),
            vec![
                "interface todoReducerState {}".to_string(),
                "interface todoReducerAction {\n  type: string;\n  payload?: any;\n}".to_string(),
                "interface ThemeContextValue {}".to_string(),
            ]
        );
        assert_eq!(result.hooks_used, vec!["useReducer", "useContext"]);
    }

    #[test]
    fn test_duplicates_first_wins() {
        let result = scan(
            "const [open, setOpen] = useState(false);\nfunction B() { const [open, setOpen] = useState('no'); }",
        );
        assert_eq!(result.interfaces.len(), 1);
        assert_eq!(result.interfaces[0].members[0].ts_type, "boolean");
    }

    #[test]
    fn test_custom_hooks_are_only_recorded() {
        let result = scan("const data = useFetch(url);\nconst x = user.useThing();");
        assert!(result.interfaces.is_empty());
        assert_eq!(result.hooks_used, vec!["useFetch"]);
    }
}
