//! Syntax kind enumeration for the INI CST
//!
//! This module defines all possible node and token types in the INI syntax tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Syntax kind for INI language elements
///
/// Kinds are grouped into numeric ranges:
/// - Trivia (0-9)
/// - Delimiters (100-149)
/// - Names and values (150-199)
/// - Structure nodes (200-299)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum IniSyntaxKind {
    // ==================
    // Trivia (0-9)
    // ==================
    /// Whitespace (spaces, tabs) within a line
    Whitespace = 0,
    /// Comment starting with `;`, up to the end of the line
    Comment = 1,
    /// Line terminator (`\n`, `\r\n` or `\r`)
    Newline = 2,
    /// Line content that is neither a comment, a section header nor a property
    Skipped = 3,

    // ==================
    // Delimiters (100-149)
    // ==================
    /// `[`
    LBracket = 100,
    /// `]`
    RBracket = 101,
    /// `=`
    Equals = 102,

    // ==================
    // Names and values (150-199)
    // ==================
    SectionName = 150,
    PropertyName = 151,
    PropertyValue = 152,

    // ==================
    // Structure nodes (200-299)
    // ==================
    /// Root node
    Document = 200,
    /// Properties declared before the first section header
    Preamble = 201,
    /// `[name]` header and its properties
    Section = 202,
    /// `name=value` line
    Property = 203,
}

/// Classification of a token for highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenCategory {
    Comment,
    Delimiter,
    SectionName,
    PropertyName,
    PropertyValue,
}

impl IniSyntaxKind {
    /// Category used by classifiers; `None` for whitespace, line breaks,
    /// skipped content and nodes
    pub const fn category(self) -> Option<TokenCategory> {
        match self {
            Self::Comment => Some(TokenCategory::Comment),
            Self::LBracket | Self::RBracket | Self::Equals => Some(TokenCategory::Delimiter),
            Self::SectionName => Some(TokenCategory::SectionName),
            Self::PropertyName => Some(TokenCategory::PropertyName),
            Self::PropertyValue => Some(TokenCategory::PropertyValue),
            _ => None,
        }
    }

    /// Check if this is trivia (carries no syntactic weight)
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::Comment | Self::Newline | Self::Skipped
        )
    }

    /// Check if this is one of the structural delimiters
    pub const fn is_delimiter(self) -> bool {
        matches!(self, Self::LBracket | Self::RBracket | Self::Equals)
    }

    /// Check if this is a token kind (as opposed to a node kind)
    pub const fn is_token(self) -> bool {
        (self as u16) < 200
    }

    /// Check if this is a node kind
    pub const fn is_node(self) -> bool {
        (self as u16) >= 200
    }

    /// The character a delimiter kind stands for
    pub const fn delimiter_char(self) -> Option<char> {
        match self {
            Self::LBracket => Some('['),
            Self::RBracket => Some(']'),
            Self::Equals => Some('='),
            _ => None,
        }
    }
}

impl fmt::Display for IniSyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<IniSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: IniSyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivia_classification() {
        assert!(IniSyntaxKind::Whitespace.is_trivia());
        assert!(IniSyntaxKind::Comment.is_trivia());
        assert!(IniSyntaxKind::Newline.is_trivia());
        assert!(IniSyntaxKind::Skipped.is_trivia());
        assert!(!IniSyntaxKind::SectionName.is_trivia());
        assert!(!IniSyntaxKind::Equals.is_trivia());
    }

    #[test]
    fn test_token_and_node_ranges() {
        assert!(IniSyntaxKind::PropertyValue.is_token());
        assert!(!IniSyntaxKind::PropertyValue.is_node());
        assert!(IniSyntaxKind::Section.is_node());
        assert!(IniSyntaxKind::Preamble.is_node());
    }

    #[test]
    fn test_delimiter_chars() {
        assert_eq!(IniSyntaxKind::LBracket.delimiter_char(), Some('['));
        assert_eq!(IniSyntaxKind::RBracket.delimiter_char(), Some(']'));
        assert_eq!(IniSyntaxKind::Equals.delimiter_char(), Some('='));
        assert_eq!(IniSyntaxKind::Comment.delimiter_char(), None);
        assert!(IniSyntaxKind::Equals.is_delimiter());
    }

    #[test]
    fn test_categories() {
        assert_eq!(IniSyntaxKind::Comment.category(), Some(TokenCategory::Comment));
        assert_eq!(IniSyntaxKind::Equals.category(), Some(TokenCategory::Delimiter));
        assert_eq!(
            IniSyntaxKind::PropertyValue.category(),
            Some(TokenCategory::PropertyValue)
        );
        assert_eq!(IniSyntaxKind::Whitespace.category(), None);
        assert_eq!(IniSyntaxKind::Skipped.category(), None);
        assert_eq!(IniSyntaxKind::Section.category(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(IniSyntaxKind::SectionName.to_string(), "SectionName");
    }
}
