//! # JSX → TSX converter
//!
//! Converts untyped React component modules to TSX:
//!
//! 1. **Detection**: named functions whose own body builds JSX are components.
//!    Functions that only build JSX inside nested callbacks are ambiguous and
//!    are converted only when they carry a `propTypes` declaration.
//! 2. **Prop interfaces**: `X.propTypes = { ... }` becomes `interface XProps`;
//!    the declaration and the `prop-types` import are removed.
//! 3. **Signatures**: each component receives a `props: XProps` parameter and a
//!    `JSX.Element` return type. Destructured parameters are moved into a
//!    `const { ... } = props;` binding at the top of the body. Class
//!    components extend `React.Component<XProps>`.
//! 4. **Hooks** (advanced level): `useState`, `useReducer` and `useContext`
//!    calls get scaffold interfaces.
//!
//! A single-file conversion never fails outright: failures come back as
//! structured diagnostics next to the (possibly empty) code.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod annotate;
mod archive;
mod batch;
mod codegen;
mod comments;
mod config;
mod detect;
mod diagnostics;
mod error;
mod hooks;
mod interface;
mod parse;
mod prop_types;
mod transform;
mod type_map;

#[cfg(test)]
mod batch_tests;

pub use archive::{export_archive, write_archive};
pub use batch::{convert_batch, tsx_file_name, BatchResult, FileDiagnostics, SourceFile};
pub use config::{ConversionConfig, ConversionLevel};
pub use detect::{ComponentKind, Detection};
pub use diagnostics::{ErrorDetail, Severity};
pub use error::{ArchiveError, ConvertError};
pub use interface::{InterfaceMember, SynthesizedInterface};
pub use transform::{convert, ConversionResult, AMBIGUOUS_COMPONENT};
pub use type_map::PropShape;

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
fn config_from_json(config_json: Option<String>) -> napi::Result<ConversionConfig> {
    match config_json {
        Some(json) => ConversionConfig::from_json(&json)
            .map_err(|e| napi::Error::from_reason(format!("Invalid conversion config: {}", e))),
        None => Ok(ConversionConfig::default()),
    }
}

#[cfg(feature = "napi")]
fn files_from_json(files_json: &str) -> napi::Result<Vec<SourceFile>> {
    serde_json::from_str(files_json)
        .map_err(|e| napi::Error::from_reason(format!("Invalid file list: {}", e)))
}

#[cfg(feature = "napi")]
#[napi]
pub fn convert_jsx_native(
    source: String,
    config_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let config = config_from_json(config_json)?;
    serde_json::to_value(convert(&source, &config))
        .map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(feature = "napi")]
#[napi]
pub fn convert_batch_native(
    files_json: String,
    config_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let config = config_from_json(config_json)?;
    let files = files_from_json(&files_json)?;
    serde_json::to_value(convert_batch(&files, &config))
        .map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(feature = "napi")]
#[napi]
pub fn export_archive_native(files_json: String) -> napi::Result<napi::bindgen_prelude::Buffer> {
    let files = files_from_json(&files_json)?;
    let bytes = export_archive(&files).map_err(|e| napi::Error::from_reason(e.to_string()))?;
    Ok(bytes.into())
}
