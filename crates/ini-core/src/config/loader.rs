//! Configuration file discovery and loading

use super::ini_config::IniConfig;
use crate::error::IniError;
use crate::result::Result;
use std::path::{Path, PathBuf};

/// Config file names in discovery priority order
pub const CONFIG_FILE_NAMES: [&str; 2] = [".inirc.toml", ".inirc.json"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from `start_path`
    ///
    /// Each directory is searched for the names in [`CONFIG_FILE_NAMES`] in
    /// order, moving up the directory tree until a config is found or the
    /// filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| IniError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<IniConfig> {
        IniConfig::load(path).map_err(|e| match e {
            IniError::ConfigError { message } => IniError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                message
            )),
            other => other,
        })
    }

    /// Parse configuration text in the given format (`"toml"` or `"json"`)
    pub fn load_from_str(content: &str, format: &str) -> Result<IniConfig> {
        match format {
            "toml" => IniConfig::from_toml_str(content),
            "json" => IniConfig::from_json_str(content),
            other => Err(IniError::config_error(format!(
                "Unsupported config format: {other}"
            ))),
        }
    }

    /// Load config from path or auto-discover
    ///
    /// Falls back to the default configuration when nothing is found.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<IniConfig> {
        let config_path = if let Some(path) = custom_path {
            if !path.exists() {
                return Err(IniError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        } else {
            let start = match start_dir {
                Some(dir) => dir.to_path_buf(),
                None => std::env::current_dir()
                    .map_err(|e| IniError::io_error(".", e))?,
            };
            Self::auto_discover(&start)?
        };

        match config_path {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(IniConfig::default())
            }
        }
    }
}
