//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::diagnostics::Severity;
use crate::error::IniError;
use crate::result::Result;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IniConfig {
    /// Diagnostics configuration
    pub diagnostics: Option<DiagnosticsConfiguration>,

    /// Formatter configuration
    pub formatter: Option<FormatterConfiguration>,
}

/// Diagnostics configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsConfiguration {
    /// Enable/disable all analyzers
    pub enabled: Option<bool>,

    /// Severity overrides keyed by diagnostic id
    pub rules: Option<HashMap<String, RuleSeverity>>,
}

/// Formatter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormatterConfiguration {
    /// Enable/disable on-type formatting
    pub format_on_type: Option<bool>,

    /// Remove whitespace inside `[ name ]` when `]` is typed
    pub trim_section_headers: Option<bool>,

    /// Align a property's indentation with its predecessor when `=` is typed
    pub align_properties: Option<bool>,
}

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Disable the rule
    Off,
    /// Informational message
    Info,
    /// Warning
    Warn,
    /// Error
    Error,
}

impl RuleSeverity {
    /// Diagnostic severity, `None` when the rule is off
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            RuleSeverity::Off => None,
            RuleSeverity::Info => Some(Severity::Info),
            RuleSeverity::Warn => Some(Severity::Warning),
            RuleSeverity::Error => Some(Severity::Error),
        }
    }
}

impl IniConfig {
    /// Load configuration from a `.toml` or `.json` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| IniError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(IniError::config_error(format!(
                "Unsupported file extension for '{}' (expected .toml or .json)",
                path.display()
            ))),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| IniError::config_error(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| IniError::config_error(e.to_string()))
    }

    /// Get diagnostics configuration with defaults
    pub fn diagnostics_config(&self) -> DiagnosticsConfiguration {
        self.diagnostics.clone().unwrap_or_default()
    }

    /// Get formatter configuration with defaults
    pub fn formatter_config(&self) -> FormatterConfiguration {
        self.formatter.clone().unwrap_or_default()
    }

    /// Overlay `other` on top of this configuration
    ///
    /// Fields set in `other` win; rule maps are merged key by key.
    pub fn merge(&mut self, other: IniConfig) {
        if let Some(other) = other.diagnostics {
            let diagnostics = self.diagnostics.get_or_insert_with(Default::default);
            if other.enabled.is_some() {
                diagnostics.enabled = other.enabled;
            }
            if let Some(rules) = other.rules {
                diagnostics
                    .rules
                    .get_or_insert_with(HashMap::new)
                    .extend(rules);
            }
        }

        if let Some(other) = other.formatter {
            let formatter = self.formatter.get_or_insert_with(Default::default);
            if other.format_on_type.is_some() {
                formatter.format_on_type = other.format_on_type;
            }
            if other.trim_section_headers.is_some() {
                formatter.trim_section_headers = other.trim_section_headers;
            }
            if other.align_properties.is_some() {
                formatter.align_properties = other.align_properties;
            }
        }
    }
}

impl DiagnosticsConfiguration {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Configured severity for a diagnostic id
    pub fn rule_severity(&self, id: &str) -> Option<RuleSeverity> {
        self.rules.as_ref()?.get(id).copied()
    }
}

impl FormatterConfiguration {
    pub fn format_on_type(&self) -> bool {
        self.format_on_type.unwrap_or(true)
    }

    pub fn trim_section_headers(&self) -> bool {
        self.format_on_type() && self.trim_section_headers.unwrap_or(true)
    }

    pub fn align_properties(&self) -> bool {
        self.format_on_type() && self.align_properties.unwrap_or(true)
    }
}
