//! Diagnostics for INI documents
//!
//! Analyzers are pure functions over one node kind. The [`DiagnosticEngine`]
//! runs them over the nodes that intersect a queried range.
//!
//! | Id | Severity | Reported on |
//! |----|----------|-------------|
//! | `SectionNameExpected` | error | missing section name |
//! | `MissingSectionClosingBracket` | error | missing `]` |
//! | `MissingPropertyDelimiter` | error | missing `=` |
//! | `UnrecognizedContent` | error | skipped line content |
//! | `MultipleDeclarationsOfSection` | warning | name of a repeated section |
//! | `RedundantPropertyDeclaration` | warning | whole repeated property |
//! | `MultipleDeclarationsOfProperty` | warning | name of an overriding property |

mod analyzer;
mod engine;
mod types;

pub mod declarations;
pub mod syntax;

pub use analyzer::Analyzer;
pub use declarations::{
    MULTIPLE_DECLARATIONS_OF_PROPERTY, MULTIPLE_DECLARATIONS_OF_SECTION,
    REDUNDANT_PROPERTY_DECLARATION, canonical_section,
};
pub use engine::DiagnosticEngine;
pub use syntax::{
    MISSING_PROPERTY_DELIMITER, MISSING_SECTION_CLOSING_BRACKET, SECTION_NAME_EXPECTED,
    UNRECOGNIZED_CONTENT,
};
pub use types::{Diagnostic, Severity};
