//! Error types and handling for INI language service operations
//!
//! Parsing and analysis never fail: structural problems become missing tokens
//! and diagnostics. The errors here cover configuration loading and contract
//! violations such as applying an edit computed against an outdated snapshot.

use std::path::PathBuf;
use thiserror::Error;

use crate::text::BufferId;

/// Main error type for INI language service operations
#[derive(Debug, Error)]
pub enum IniError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An edit or node reference was computed against a snapshot the buffer has moved past
    #[error("Stale reference: computed against version {expected} of {buffer}, but it is at version {actual}")]
    StaleReference {
        buffer: BufferId,
        expected: u64,
        actual: u64,
    },

    /// An edit was applied to a buffer other than the one it was computed for
    #[error("Edit computed for {expected} cannot be applied to {actual}")]
    ForeignBuffer { expected: BufferId, actual: BufferId },

    /// Edit ranges out of bounds, overlapping or splitting a character
    #[error("Invalid edit: {message}")]
    InvalidEdit { message: String },

    /// Nodes passed to a fix do not belong together
    #[error("Inconsistent nodes: {message}")]
    InconsistentNodes { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    StaleReference,
    Edit,
    Fix,
    Internal,
}

impl IniError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IniError::ConfigError { .. } => ErrorKind::Config,
            IniError::IoError { .. } => ErrorKind::Io,
            IniError::StaleReference { .. } => ErrorKind::StaleReference,
            IniError::ForeignBuffer { .. } | IniError::InvalidEdit { .. } => ErrorKind::Edit,
            IniError::InconsistentNodes { .. } => ErrorKind::Fix,
            IniError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable
    ///
    /// A stale edit can be recomputed from a fresh tree; the caller only has
    /// to ask again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::StaleReference | ErrorKind::Fix)
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a stale reference error
    pub fn stale_reference(buffer: BufferId, expected: u64, actual: u64) -> Self {
        Self::StaleReference {
            buffer,
            expected,
            actual,
        }
    }

    /// Create an invalid edit error
    pub fn invalid_edit(message: impl Into<String>) -> Self {
        Self::InvalidEdit {
            message: message.into(),
        }
    }

    /// Create an inconsistent nodes error
    pub fn inconsistent_nodes(message: impl Into<String>) -> Self {
        Self::InconsistentNodes {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let config_err = IniError::config_error("bad value");
        assert_eq!(config_err.kind(), ErrorKind::Config);
        assert!(!config_err.is_recoverable());

        let stale = IniError::stale_reference(BufferId::new(), 1, 2);
        assert_eq!(stale.kind(), ErrorKind::StaleReference);
        assert!(stale.is_recoverable());

        let edit = IniError::invalid_edit("overlap");
        assert_eq!(edit.kind(), ErrorKind::Edit);
        assert!(!edit.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = IniError::config_error("Invalid rule severity");
        assert_eq!(err.to_string(), "Configuration error: Invalid rule severity");

        let err = IniError::inconsistent_nodes("section belongs to another tree");
        assert_eq!(
            err.to_string(),
            "Inconsistent nodes: section belongs to another tree"
        );
    }

    #[test]
    fn test_stale_reference_display() {
        let buffer = BufferId::new();
        let err = IniError::stale_reference(buffer, 3, 5);
        let message = err.to_string();
        assert!(message.starts_with("Stale reference"));
        assert!(message.contains("version 3"));
        assert!(message.contains("version 5"));
    }
}
