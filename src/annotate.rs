//! Signature Annotator
//!
//! Pass 2 of the pipeline. Rewrites the parameter list and return type of
//! every planned function component, located by the span recorded in pass 1.
//! Class components get the interface as their base's type argument instead.

use crate::error::ConvertError;
use oxc_allocator::{Allocator, Box as ArenaBox, TakeIn};
use oxc_ast::ast::*;
use oxc_ast::{AstBuilder, NONE};
use oxc_ast_visit::{walk_mut, VisitMut};
use oxc_span::{Span, SPAN};
use oxc_syntax::scope::ScopeFlags;
use std::collections::HashMap;
use tracing::{debug, warn};

pub const PROPS_PARAM: &str = "props";

/// What to do with one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationPlan {
    pub component: String,
    pub interface_name: String,
    /// Whether the file carried a prop declaration for the component.
    pub declared: bool,
    pub span: Span,
}

#[derive(Debug, Default)]
pub struct AnnotationReport {
    pub annotated: Vec<String>,
    /// Per-component failures. The other components are still annotated.
    pub failures: Vec<ConvertError>,
}

pub fn annotate_components<'a>(
    program: &mut Program<'a>,
    allocator: &'a Allocator,
    source: &str,
    plans: &[AnnotationPlan],
) -> AnnotationReport {
    let mut annotator = Annotator {
        ast: AstBuilder::new(allocator),
        source,
        plans: plans.iter().map(|p| ((p.span.start, p.span.end), p)).collect(),
        report: AnnotationReport::default(),
    };
    annotator.visit_program(program);
    annotator.report
}

/// How the first parameter gets rewritten.
enum ParamRewrite {
    Append,
    Keep,
    Replace,
    AnnotateInPlace,
    MoveIntoBody,
    Unsupported(&'static str),
}

struct Annotator<'a, 'p> {
    ast: AstBuilder<'a>,
    source: &'p str,
    plans: HashMap<(u32, u32), &'p AnnotationPlan>,
    report: AnnotationReport,
}

impl<'a, 'p> Annotator<'a, 'p> {
    fn plan_for(&self, span: Span) -> Option<&'p AnnotationPlan> {
        self.plans.get(&(span.start, span.end)).copied()
    }

    fn finish(&mut self, plan: &AnnotationPlan, result: Result<(), ConvertError>) {
        match result {
            Ok(()) => {
                debug!(component = plan.component.as_str(), "annotated");
                self.report.annotated.push(plan.component.clone());
            }
            Err(err) => {
                warn!(component = plan.component.as_str(), error = %err, "annotation skipped");
                self.report.failures.push(err);
            }
        }
    }

    fn annotate(
        &self,
        plan: &AnnotationPlan,
        params: &mut FormalParameters<'a>,
        body: &mut FunctionBody<'a>,
        expression_body: Option<&mut bool>,
        return_type: &mut Option<ArenaBox<'a, TSTypeAnnotation<'a>>>,
    ) -> Result<(), ConvertError> {
        match classify_first_param(params, plan.declared) {
            ParamRewrite::Append => params.items.push(self.props_param(plan)),
            ParamRewrite::Keep => {}
            ParamRewrite::Replace => params.items[0] = self.props_param(plan),
            ParamRewrite::AnnotateInPlace => {
                params.items[0].type_annotation = Some(self.interface_annotation(plan));
            }
            ParamRewrite::MoveIntoBody => {
                let original = params.items.remove(0);
                params.items.insert(0, self.props_param(plan));
                self.bind_from_props(plan, body, expression_body, original.pattern)?;
            }
            ParamRewrite::Unsupported(reason) => {
                return Err(ConvertError::transform_at(
                    format!("Cannot annotate component `{}`: {}", plan.component, reason),
                    self.source,
                    plan.span.start,
                ));
            }
        }

        if return_type.is_none() {
            *return_type = Some(self.jsx_element_annotation());
        }
        Ok(())
    }

    /// Puts `const <pattern> = props;` in front of the body.
    fn bind_from_props(
        &self,
        plan: &AnnotationPlan,
        body: &mut FunctionBody<'a>,
        expression_body: Option<&mut bool>,
        pattern: BindingPattern<'a>,
    ) -> Result<(), ConvertError> {
        let ast = self.ast;
        let declarator = ast.variable_declarator(
            SPAN,
            VariableDeclarationKind::Const,
            pattern,
            NONE,
            Some(ast.expression_identifier(SPAN, PROPS_PARAM)),
            false,
        );
        let binding = Statement::VariableDeclaration(ast.alloc_variable_declaration(
            SPAN,
            VariableDeclarationKind::Const,
            ast.vec1(declarator),
            false,
        ));

        match expression_body {
            Some(is_expression) if *is_expression => {
                let Some(Statement::ExpressionStatement(stmt)) = body.statements.first_mut() else {
                    return Err(ConvertError::transform_at(
                        format!(
                            "Cannot annotate component `{}`: arrow body has an unexpected shape",
                            plan.component
                        ),
                        self.source,
                        plan.span.start,
                    ));
                };
                let value = stmt.expression.take_in(ast.allocator);
                body.statements = ast.vec_from_array([binding, ast.statement_return(SPAN, Some(value))]);
                *is_expression = false;
            }
            _ => body.statements.insert(0, binding),
        }
        Ok(())
    }

    fn props_param(&self, plan: &AnnotationPlan) -> FormalParameter<'a> {
        let ast = self.ast;
        ast.formal_parameter(
            SPAN,
            ast.vec(),
            ast.binding_pattern_binding_identifier(SPAN, PROPS_PARAM),
            Some(self.interface_annotation(plan)),
            NONE,
            false,
            None,
            false,
            false,
        )
    }

    /// `extends React.Component` → `extends React.Component<XProps>`.
    fn annotate_class(&self, plan: &AnnotationPlan, class: &mut Class<'a>) {
        if class.super_type_arguments.is_some() {
            return;
        }
        let ast = self.ast;
        class.super_type_arguments = Some(
            ast.alloc_ts_type_parameter_instantiation(SPAN, ast.vec1(self.interface_type(plan))),
        );
    }

    fn interface_type(&self, plan: &AnnotationPlan) -> TSType<'a> {
        let ast = self.ast;
        let name = ast.ts_type_name_identifier_reference(SPAN, ast.atom(&plan.interface_name));
        ast.ts_type_type_reference(SPAN, name, NONE)
    }

    fn interface_annotation(&self, plan: &AnnotationPlan) -> ArenaBox<'a, TSTypeAnnotation<'a>> {
        self.ast.alloc_ts_type_annotation(SPAN, self.interface_type(plan))
    }

    /// `JSX.Element`
    fn jsx_element_annotation(&self) -> ArenaBox<'a, TSTypeAnnotation<'a>> {
        let ast = self.ast;
        let name = ast.ts_type_name_qualified_name(
            SPAN,
            ast.ts_type_name_identifier_reference(SPAN, "JSX"),
            ast.identifier_name(SPAN, "Element"),
        );
        ast.alloc_ts_type_annotation(SPAN, ast.ts_type_type_reference(SPAN, name, NONE))
    }
}

fn classify_first_param(params: &FormalParameters, declared: bool) -> ParamRewrite {
    let Some(first) = params.items.first() else {
        return if params.rest.is_some() {
            ParamRewrite::Unsupported("a rest parameter cannot carry the props interface")
        } else {
            ParamRewrite::Append
        };
    };
    if first.type_annotation.is_some() {
        return ParamRewrite::Keep;
    }
    match (&first.pattern, declared) {
        (BindingPattern::ObjectPattern(_) | BindingPattern::ArrayPattern(_), true) => {
            ParamRewrite::MoveIntoBody
        }
        (BindingPattern::BindingIdentifier(_), true) => ParamRewrite::Replace,
        (BindingPattern::BindingIdentifier(_), false) => ParamRewrite::AnnotateInPlace,
        (BindingPattern::AssignmentPattern(_), _) => {
            ParamRewrite::Unsupported("unexpected parameter pattern")
        }
        (_, false) => ParamRewrite::Keep,
    }
}

impl<'a, 'p> VisitMut<'a> for Annotator<'a, 'p> {
    fn visit_function(&mut self, it: &mut Function<'a>, flags: ScopeFlags) {
        if let Some(plan) = self.plan_for(it.span) {
            let result = match it.body.as_mut() {
                Some(body) => {
                    self.annotate(plan, &mut it.params, body, None, &mut it.return_type)
                }
                None => Ok(()),
            };
            self.finish(plan, result);
        }
        walk_mut::walk_function(self, it, flags);
    }

    fn visit_class(&mut self, it: &mut Class<'a>) {
        if let Some(plan) = self.plan_for(it.span) {
            self.annotate_class(plan, it);
            self.finish(plan, Ok(()));
        }
        walk_mut::walk_class(self, it);
    }

    fn visit_arrow_function_expression(&mut self, it: &mut ArrowFunctionExpression<'a>) {
        if let Some(plan) = self.plan_for(it.span) {
            let result = self.annotate(
                plan,
                &mut it.params,
                &mut it.body,
                Some(&mut it.expression),
                &mut it.return_type,
            );
            self.finish(plan, result);
        }
        walk_mut::walk_arrow_function_expression(self, it);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::collect_components;
    use oxc_codegen::Codegen;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    /// Annotates every detected component, treating `declared` names as
    /// carrying a prop declaration.
    fn annotate_source(source: &str, declared: &[&str]) -> (String, AnnotationReport) {
        let allocator = Allocator::default();
        let source_type = SourceType::default()
            .with_typescript(true)
            .with_jsx(true)
            .with_module(true);
        let mut program = Parser::new(&allocator, source, source_type).parse().program;
        let plans: Vec<AnnotationPlan> = collect_components(&program)
            .into_iter()
            .map(|r| AnnotationPlan {
                interface_name: format!("{}Props", r.name),
                declared: declared.contains(&r.name.as_str()),
                component: r.name,
                span: r.span,
            })
            .collect();
        let report = annotate_components(&mut program, &allocator, source, &plans);
        (Codegen::new().build(&program).code, report)
    }

    #[test]
    fn test_identifier_param_without_declaration_is_typed_in_place() {
        let (code, report) = annotate_source("function Foo(props) { return <div/>; }", &[]);
        assert!(code.contains("props: FooProps"), "got: {}", code);
        assert!(code.contains("): JSX.Element"), "got: {}", code);
        assert_eq!(report.annotated, vec!["Foo"]);
    }

    #[test]
    fn test_zero_params_gets_props() {
        let (code, _) = annotate_source("const Empty = () => <br/>;", &[]);
        assert!(code.contains("(props: EmptyProps): JSX.Element =>"), "got: {}", code);
    }

    #[test]
    fn test_declared_identifier_is_replaced_with_props() {
        let (code, _) = annotate_source("function Foo(p) { return <div/>; }", &["Foo"]);
        assert!(code.contains("function Foo(props: FooProps)"), "got: {}", code);
    }

    #[test]
    fn test_destructured_arrow_gets_block_body() {
        let (code, report) =
            annotate_source("const Baz = ({a, b}) => <p>{a}{b}</p>;", &["Baz"]);
        assert!(report.failures.is_empty());
        assert!(code.contains("(props: BazProps): JSX.Element =>"), "got: {}", code);
        assert!(code.contains("= props;"), "binding should be injected: {}", code);
        assert!(code.contains("return <p>"), "expression becomes a return: {}", code);
        assert!(code.contains("{a}{b}"), "reads stay intact: {}", code);
    }

    #[test]
    fn test_destructured_block_body_with_default_dropped() {
        let source = "function Card({ title } = {}) {\n  const t = title;\n  return <h1>{t}</h1>;\n}";
        let (code, _) = annotate_source(source, &["Card"]);
        assert!(code.contains("function Card(props: CardProps): JSX.Element"), "got: {}", code);
        let binding = code.find("= props;").expect("binding injected");
        let first_stmt = code.find("const t").expect("original statement kept");
        assert!(binding < first_stmt, "binding must come first: {}", code);
        assert!(!code.contains("= {}"), "parameter default is dropped: {}", code);
    }

    #[test]
    fn test_undeclared_destructuring_is_left_alone() {
        let (code, _) = annotate_source("const Tag = ({ label }) => <i>{label}</i>;", &[]);
        assert!(!code.contains("TagProps"), "got: {}", code);
        assert!(code.contains("JSX.Element"));
    }

    #[test]
    fn test_existing_annotations_are_kept() {
        let source = "function Typed(props: Custom): React.ReactNode { return <div/>; }";
        let (code, _) = annotate_source(source, &["Typed"]);
        assert!(code.contains("props: Custom"), "got: {}", code);
        assert!(code.contains("React.ReactNode"));
        assert!(!code.contains("JSX.Element"));
        assert!(!code.contains("TypedProps"));
    }

    #[test]
    fn test_rest_only_component_fails_alone() {
        let source = "function Bad(...args) { return <div/>; }\nfunction Good() { return <div/>; }";
        let (code, report) = annotate_source(source, &[]);
        assert_eq!(report.failures.len(), 1);
        let message = report.failures[0].to_string();
        assert!(message.contains("Bad"), "got: {}", message);
        assert!(message.contains("line 1"), "location is carried: {}", message);
        assert_eq!(report.annotated, vec!["Good"]);
        assert!(code.contains("function Good(props: GoodProps): JSX.Element"));
    }

    #[test]
    fn test_class_component_gets_type_argument() {
        let source = "class Foo extends React.Component {\n  render() { return <div>{this.props.a}</div>; }\n}";
        let (code, report) = annotate_source(source, &["Foo"]);
        assert_eq!(report.annotated, vec!["Foo"]);
        assert!(code.contains("class Foo extends React.Component<FooProps>"), "got: {}", code);
        assert!(!code.contains("JSX.Element"), "render is left alone: {}", code);
    }

    #[test]
    fn test_class_with_type_argument_is_kept() {
        let source = "class Foo extends Component<Custom> { render() { return <b/>; } }";
        let (code, _) = annotate_source(source, &[]);
        assert!(code.contains("extends Component<Custom>"), "got: {}", code);
        assert!(!code.contains("FooProps"));
    }

    #[test]
    fn test_nested_components_are_reached() {
        let source = "function Outer() {\n  const Inner = () => <b/>;\n  return <Inner/>;\n}";
        let (code, report) = annotate_source(source, &[]);
        assert_eq!(report.annotated, vec!["Outer", "Inner"]);
        assert!(code.contains("props: InnerProps"));
        assert!(code.contains("props: OuterProps"));
    }
}
