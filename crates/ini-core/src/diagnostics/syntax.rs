//! Structural checks
//!
//! The parser never fails; it records absent header and property pieces as
//! missing tokens and keeps unrecognized lines as skipped trivia. These checks
//! turn those markers into errors.

use crate::cst::{AstNode, Document, IniSyntaxKind, Property, Section};

use super::{Diagnostic, Severity};

/// A `[` without a section name
pub const SECTION_NAME_EXPECTED: &str = "SectionNameExpected";

/// A section name without a `]`
pub const MISSING_SECTION_CLOSING_BRACKET: &str = "MissingSectionClosingBracket";

/// A property name without a `=`
pub const MISSING_PROPERTY_DELIMITER: &str = "MissingPropertyDelimiter";

/// A line that is neither blank, a comment, a header nor a property
pub const UNRECOGNIZED_CONTENT: &str = "UnrecognizedContent";

/// Check a section header for a missing name or closing bracket
///
/// At most one diagnostic is reported: a closing bracket is only expected
/// once a name was read.
pub fn check_section_header(section: &Section) -> Vec<Diagnostic> {
    let Some(name) = section.name_token() else {
        return Vec::new();
    };

    if name.is_missing() {
        return vec![Diagnostic::new(
            SECTION_NAME_EXPECTED,
            Severity::Error,
            "Section name expected",
            name.text_range(),
        )];
    }

    match section.closing_bracket() {
        Some(closing) if closing.is_missing() => vec![Diagnostic::new(
            MISSING_SECTION_CLOSING_BRACKET,
            Severity::Error,
            "']' expected",
            closing.text_range(),
        )],
        _ => Vec::new(),
    }
}

/// Check a property for a missing `=`
pub fn check_property_delimiter(property: &Property) -> Vec<Diagnostic> {
    match property.delimiter() {
        Some(delimiter) if delimiter.is_missing() => vec![Diagnostic::new(
            MISSING_PROPERTY_DELIMITER,
            Severity::Error,
            "'=' expected",
            delimiter.text_range(),
        )],
        _ => Vec::new(),
    }
}

/// Report every skipped line of the document
pub fn check_unrecognized_content(document: &Document) -> Vec<Diagnostic> {
    document
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == IniSyntaxKind::Skipped)
        .map(|t| {
            Diagnostic::new(
                UNRECOGNIZED_CONTENT,
                Severity::Error,
                "Unrecognized content",
                t.text_range(),
            )
        })
        .collect()
}
