//! Diagnostic records produced by the analyzers

use rowan::TextRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A diagnostic produced by an analyzer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable identifier of the check that produced this diagnostic
    pub id: String,
    /// Severity level of the diagnostic
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Range in the snapshot the tree was parsed from
    pub range: TextRange,
}

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational messages
    Info,
    /// Hints for improvements
    Hint,
    /// Warnings that should be addressed
    Warning,
    /// Errors that must be fixed
    Error,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        range: TextRange,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            range,
        }
    }

    pub fn error(id: impl Into<String>, message: impl Into<String>, range: TextRange) -> Self {
        Self::new(id, Severity::Error, message, range)
    }

    pub fn warning(id: impl Into<String>, message: impl Into<String>, range: TextRange) -> Self {
        Self::new(id, Severity::Warning, message, range)
    }

    /// Override the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether the diagnostic range intersects `range`; touching ranges count
    pub fn intersects(&self, range: TextRange) -> bool {
        self.range.intersect(range).is_some()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}..{}: {}",
            self.severity,
            self.id,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )
    }
}
