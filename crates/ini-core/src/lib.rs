//! INI Core
//!
//! Language service core for INI configuration files. This crate provides a
//! lossless, error-tolerant parser, a per-buffer tree cache, diagnostics,
//! code fixes and refactorings, classification and on-type formatting.
//!
//! # Example
//!
//! ```
//! use ini_core::{IniLanguageService, TextBuffer};
//!
//! let service = IniLanguageService::new();
//! let mut buffer = TextBuffer::new("[a]\nx=1\n[A]\ny=2\n");
//!
//! let snapshot = buffer.snapshot();
//! let diagnostics = service.diagnostics(&snapshot, snapshot.full_range());
//! assert_eq!(diagnostics[0].id, "MultipleDeclarationsOfSection");
//!
//! let actions = service.code_actions(&snapshot, snapshot.full_range());
//! let change = actions[0].apply(&mut buffer).unwrap();
//! service.buffer_changed(&change);
//!
//! assert_eq!(buffer.text(), "[a]\nx=1\ny=2\n");
//! ```

pub mod cache;
pub mod classification;
pub mod config;
pub mod cst; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod diagnostics;
pub mod error;
pub mod fixes;
pub mod formatting;
pub mod navigation;
pub mod result;
pub mod service;
pub mod text;

// Re-export commonly used types
pub use cache::{CacheStats, TreeCache};
pub use classification::{ClassifiedSpan, classify};
pub use config::{
    ConfigLoader, DiagnosticsConfiguration, FormatterConfiguration, IniConfig, RuleSeverity,
};
pub use cst::{
    AstNode, Document, IniSyntaxKind, Preamble, Property, Section, SyntaxTree, Token,
    TokenCategory, parse, parse_text,
};
pub use diagnostics::{Analyzer, Diagnostic, DiagnosticEngine, Severity};
pub use error::{ErrorKind, IniError};
pub use fixes::{CodeAction, CodeActionKind, Fix, code_actions};
pub use formatting::{OnTypeFormatter, format_on_type};
pub use navigation::{BracketPair, FoldingRange, QuickInfo, SymbolKind};
pub use result::{Result, ResultExt};
pub use service::IniLanguageService;
pub use text::{BufferEdit, BufferId, ContentChange, Snapshot, TextBuffer, TextEdit};

/// Initialize the tracing subscriber for logging
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ini_core=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();
}

/// Initialize a subscriber that writes one JSON object per event
pub fn init_json_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ini_core=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
