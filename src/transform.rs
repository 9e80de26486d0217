//! Single-file conversion pipeline
//!
//! parse → detect → extract prop declarations → annotate → hooks (advanced
//! only) → relocate comments → generate → assemble. Every failure, panics included, ends up as a
//! diagnostic in the returned [`ConversionResult`]; nothing propagates.

use crate::annotate::{annotate_components, AnnotationPlan};
use crate::comments::relocate_comments;
use crate::codegen::{assemble, generate, merge_interfaces, panic_message};
use crate::config::ConversionConfig;
use crate::detect::{collect_components, ComponentRecord, Detection};
use crate::diagnostics::{self, ErrorDetail};
use crate::error::{line_col, ConvertError};
use crate::hooks::scan_hooks;
use crate::interface::SynthesizedInterface;
use crate::parse::parse_module;
use crate::prop_types::{self, Extraction};
use oxc_allocator::Allocator;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

pub const AMBIGUOUS_COMPONENT: &str = "AMBIGUOUS_COMPONENT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub code: String,
    pub errors: Vec<ErrorDetail>,
}

impl ConversionResult {
    fn failed(err: &ConvertError, source: &str) -> Self {
        ConversionResult {
            code: String::new(),
            errors: vec![diagnostics::report(err, source)],
        }
    }

    /// True when the file did not convert.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(ErrorDetail::is_error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ErrorDetail> {
        self.errors.iter().filter(|d| !d.is_error())
    }
}

/// Converts one JSX source file to TSX.
pub fn convert(source: &str, config: &ConversionConfig) -> ConversionResult {
    match panic::catch_unwind(AssertUnwindSafe(|| convert_source(source, config))) {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            debug!(error = %err, "conversion failed");
            ConversionResult::failed(&err, source)
        }
        Err(payload) => {
            let err = ConvertError::Transform(format!(
                "Conversion aborted: {}",
                panic_message(payload.as_ref())
            ));
            warn!(error = %err, "conversion panicked");
            ConversionResult::failed(&err, source)
        }
    }
}

fn convert_source(source: &str, config: &ConversionConfig) -> Result<ConversionResult, ConvertError> {
    let allocator = Allocator::default();
    let mut program = parse_module(&allocator, source)?;

    let records = collect_components(&program);
    let extraction = prop_types::extract(&mut program, source);
    debug!(
        components = records.len(),
        declarations = extraction.declarations.len(),
        removed_imports = extraction.removed_imports,
        "pass 1 complete"
    );

    let mut diagnostics = Vec::new();
    let mut plans = Vec::new();
    for mut record in records {
        record.has_declared_props = extraction.declares(&record.name);
        if record.detection == Detection::Ambiguous && !record.has_declared_props {
            diagnostics.push(ambiguity_warning(&record, source));
            continue;
        }
        plans.push(AnnotationPlan {
            interface_name: config.interface_name(&record.name),
            declared: record.has_declared_props,
            component: record.name,
            span: record.span,
        });
    }

    let report = annotate_components(&mut program, &allocator, source, &plans);
    for failure in &report.failures {
        diagnostics.push(diagnostics::report_isolated(failure, source));
    }

    let props_interfaces = props_interfaces(&extraction, &plans, &report.annotated, config);
    let hook_interfaces = if config.hooks_enabled() {
        scan_hooks(&program).interfaces
    } else {
        Vec::new()
    };

    relocate_comments(
        &mut program,
        &extraction.removed_spans,
        &extraction.absorbed_comments,
    );
    let code = generate(&program)?;
    let interfaces = merge_interfaces(props_interfaces, hook_interfaces);
    Ok(ConversionResult {
        code: assemble(&code, extraction.has_react_import, &interfaces),
        errors: diagnostics,
    })
}

/// One interface per declared component, then an empty one for every
/// annotated component without a declaration.
fn props_interfaces(
    extraction: &Extraction,
    plans: &[AnnotationPlan],
    annotated: &[String],
    config: &ConversionConfig,
) -> Vec<SynthesizedInterface> {
    let mut interfaces: Vec<SynthesizedInterface> = extraction
        .declared_components()
        .into_iter()
        .filter_map(|name| extraction.declaration_for(name))
        .map(|decl| decl.to_interface(config))
        .collect();

    for plan in plans.iter().filter(|p| !p.declared) {
        if annotated.contains(&plan.component) {
            interfaces.push(SynthesizedInterface::empty(plan.interface_name.clone()));
        }
    }
    interfaces
}

fn ambiguity_warning(record: &ComponentRecord, source: &str) -> ErrorDetail {
    let (line, column) = line_col(source, record.span.start);
    warn!(component = record.name.as_str(), line, "ambiguous component left untouched");
    ErrorDetail::warning(
        AMBIGUOUS_COMPONENT,
        format!(
            "`{}` only renders JSX from nested functions and was not annotated (line {}, column {})",
            record.name, line, column
        ),
        source,
        line,
        column,
        vec![
            format!("Add a propTypes declaration for `{}` to convert it as a component.", record.name),
            format!("Return JSX directly from `{}` if it is a component.", record.name),
        ],
    )
}
