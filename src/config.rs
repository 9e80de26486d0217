//! Conversion settings supplied by the caller.
//!
//! The config is immutable for the duration of one conversion call. It is
//! usually produced by a settings UI and arrives as JSON, so every field has a
//! default and unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_INTERFACE_SUFFIX: &str = "Props";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionLevel {
    /// Props interfaces and signatures only.
    Basic,
    #[default]
    Standard,
    /// Adds hook-based type scaffolding.
    Advanced,
}

impl FromStr for ConversionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(ConversionLevel::Basic),
            "standard" => Ok(ConversionLevel::Standard),
            "advanced" => Ok(ConversionLevel::Advanced),
            other => Err(format!(
                "unknown conversion level `{}` (expected basic, standard or advanced)",
                other
            )),
        }
    }
}

impl fmt::Display for ConversionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConversionLevel::Basic => "basic",
            ConversionLevel::Standard => "standard",
            ConversionLevel::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionConfig {
    pub conversion_level: ConversionLevel,
    pub custom_interface_naming: bool,
    pub interface_prefix: String,
    pub interface_suffix: String,
    /// Reserved. Accepted for compatibility, not read by the transform.
    #[serde(rename = "includeJSDoc")]
    pub include_jsdoc: bool,
    /// Reserved. Accepted for compatibility, not read by the transform.
    pub preserve_formatting: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            conversion_level: ConversionLevel::Standard,
            custom_interface_naming: false,
            interface_prefix: String::new(),
            interface_suffix: DEFAULT_INTERFACE_SUFFIX.to_string(),
            include_jsdoc: false,
            preserve_formatting: false,
        }
    }
}

impl ConversionConfig {
    pub fn with_level(level: ConversionLevel) -> Self {
        Self {
            conversion_level: level,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Name of the props interface synthesized for `component`.
    pub fn interface_name(&self, component: &str) -> String {
        if !self.custom_interface_naming {
            return format!("{}{}", component, DEFAULT_INTERFACE_SUFFIX);
        }
        let suffix = if self.interface_suffix.is_empty() {
            DEFAULT_INTERFACE_SUFFIX
        } else {
            self.interface_suffix.as_str()
        };
        format!("{}{}{}", self.interface_prefix, component, suffix)
    }

    pub fn hooks_enabled(&self) -> bool {
        self.conversion_level == ConversionLevel::Advanced
    }
}
