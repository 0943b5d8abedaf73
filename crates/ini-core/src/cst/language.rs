//! Rowan language implementation for INI
//!
//! This module implements the `rowan::Language` trait for INI, which connects
//! our IniSyntaxKind enum to Rowan's generic CST infrastructure.

use rowan::Language;

use super::IniSyntaxKind;

/// Language implementation for INI files
///
/// This is a zero-sized type that implements `rowan::Language` to provide
/// the connection between our syntax kinds and Rowan's generic tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IniLanguage;

impl Language for IniLanguage {
    type Kind = IniSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        match raw.0 {
            // Trivia
            0 => IniSyntaxKind::Whitespace,
            1 => IniSyntaxKind::Comment,
            2 => IniSyntaxKind::Newline,
            3 => IniSyntaxKind::Skipped,

            // Delimiters
            100 => IniSyntaxKind::LBracket,
            101 => IniSyntaxKind::RBracket,
            102 => IniSyntaxKind::Equals,

            // Names and values
            150 => IniSyntaxKind::SectionName,
            151 => IniSyntaxKind::PropertyName,
            152 => IniSyntaxKind::PropertyValue,

            // Structure nodes
            200 => IniSyntaxKind::Document,
            201 => IniSyntaxKind::Preamble,
            202 => IniSyntaxKind::Section,
            203 => IniSyntaxKind::Property,

            // Only the parser builds green trees, so any other value is a bug.
            // Skipped keeps the text reachable without giving it structure.
            other => {
                tracing::warn!("Unknown syntax kind: {}", other);
                IniSyntaxKind::Skipped
            }
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

/// Red tree node of an INI document
pub type IniSyntaxNode = rowan::SyntaxNode<IniLanguage>;
/// Red tree token of an INI document
pub type IniSyntaxToken = rowan::SyntaxToken<IniLanguage>;
/// Either a node or a token
pub type IniSyntaxElement = rowan::SyntaxElement<IniLanguage>;
