//! Configuration for the INI language service
//!
//! Settings are grouped into sections:
//! - `diagnostics`: enable analysis and override per-diagnostic severities
//! - `formatter`: on-type formatting switches
//!
//! ## Configuration Files
//!
//! Two formats are supported, chosen by file extension:
//! - `.inirc.toml` - TOML
//! - `.inirc.json` - JSON
//!
//! When no explicit path is given, [`ConfigLoader::auto_discover`] searches
//! from a start directory up to the filesystem root.
//!
//! ## Example Configuration
//!
//! ```toml
//! [diagnostics]
//! enabled = true
//!
//! [diagnostics.rules]
//! MultipleDeclarationsOfProperty = "off"
//! UnrecognizedContent = "warn"
//!
//! [formatter]
//! formatOnType = true
//! alignProperties = false
//! ```

mod ini_config;
mod loader;

pub use ini_config::{DiagnosticsConfiguration, FormatterConfiguration, IniConfig, RuleSeverity};
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
