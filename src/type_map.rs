//! PropTypes → TypeScript type table.

use oxc_ast::ast::Expression;

pub const DEFAULT_PROP_TYPES_LOCAL: &str = "PropTypes";

/// Recognized forms of a single prop declaration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropShape {
    String,
    Number,
    Bool,
    Func,
    Array,
    Object,
    Symbol,
    Node,
    Element,
    Any,
    /// `arrayOf`, `shape`, `oneOf`, `oneOfType`, `objectOf`, `instanceOf`, `exact`,
    /// called or bare. Never inspected.
    Composite(String),
    Unknown,
}

impl PropShape {
    fn from_validator(name: &str) -> Self {
        match name {
            "string" => PropShape::String,
            "number" => PropShape::Number,
            "bool" => PropShape::Bool,
            "func" => PropShape::Func,
            "array" => PropShape::Array,
            "object" => PropShape::Object,
            "symbol" => PropShape::Symbol,
            "node" => PropShape::Node,
            "element" => PropShape::Element,
            "any" => PropShape::Any,
            "arrayOf" | "shape" | "oneOf" | "oneOfType" | "objectOf" | "instanceOf"
            | "exact" => PropShape::Composite(name.to_string()),
            _ => PropShape::Unknown,
        }
    }

    pub fn ts_type(&self) -> &'static str {
        match self {
            PropShape::String => "string",
            PropShape::Number => "number",
            PropShape::Bool => "boolean",
            PropShape::Func => "(...args: any[]) => any",
            PropShape::Array => "any[]",
            PropShape::Object => "Record<string, any>",
            PropShape::Symbol => "symbol",
            PropShape::Node => "React.ReactNode",
            PropShape::Element => "React.ReactElement",
            PropShape::Any | PropShape::Composite(_) | PropShape::Unknown => "any",
        }
    }
}

/// Splits a trailing `.isRequired` off a declaration value.
pub fn strip_is_required<'e, 'a>(value: &'e Expression<'a>) -> (&'e Expression<'a>, bool) {
    if let Expression::StaticMemberExpression(member) = value {
        if member.property.name == "isRequired" {
            return (&member.object, true);
        }
    }
    (value, false)
}

/// Classifies a declaration value with any `.isRequired` already stripped.
pub fn classify(value: &Expression, prop_types_local: &str) -> PropShape {
    match value {
        Expression::StaticMemberExpression(member) => {
            match validator_namespace(&member.object, prop_types_local) {
                true => PropShape::from_validator(&member.property.name),
                false => PropShape::Unknown,
            }
        }
        Expression::CallExpression(call) => match &call.callee {
            Expression::StaticMemberExpression(member)
                if validator_namespace(&member.object, prop_types_local) =>
            {
                match PropShape::from_validator(&member.property.name) {
                    composite @ PropShape::Composite(_) => composite,
                    _ => PropShape::Unknown,
                }
            }
            _ => PropShape::Unknown,
        },
        _ => PropShape::Unknown,
    }
}

fn validator_namespace(object: &Expression, prop_types_local: &str) -> bool {
    matches!(object, Expression::Identifier(ident) if ident.name == prop_types_local)
}
