//! Typed AST layer over the CST
//!
//! Each wrapper implements [`AstNode`] to safely convert from CST nodes. The
//! wrappers are views: they borrow nothing and never mutate the tree. Back
//! references such as [`Property::section`] walk up the red tree and exist
//! purely for lookup.
//!
//! # Example
//!
//! ```
//! use ini_core::cst::parse_text;
//!
//! let tree = parse_text("[server]\nport = 8080\n");
//! let section = tree.document().sections().next().unwrap();
//! assert_eq!(section.name().as_deref(), Some("server"));
//!
//! let port = section.properties().next().unwrap();
//! assert_eq!(port.name().as_deref(), Some("port"));
//! assert_eq!(port.value(), "8080");
//! ```

use rowan::{TextRange, TextSize};

use super::{IniSyntaxKind, IniSyntaxNode, IniSyntaxToken, TokenCategory};

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: IniSyntaxKind) -> bool;
    fn cast(node: IniSyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &IniSyntaxNode;

    /// Range of the node's structural tokens, see [`structural_span`]
    fn span(&self) -> TextRange {
        structural_span(self.syntax())
    }
}

/// Compare section or property names the way INI readers do: ignoring case
pub fn names_equal(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Union of the non-missing, non-trivia tokens below `node`
///
/// A node without any such token gets an empty range where its first
/// structural token would be.
pub fn structural_span(node: &IniSyntaxNode) -> TextRange {
    let mut structural = node
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia());

    let Some(first) = structural.next() else {
        return TextRange::empty(node.text_range().start());
    };

    let mut span: Option<TextRange> = None;
    for token in std::iter::once(first.clone()).chain(structural) {
        let range = token.text_range();
        if range.is_empty() {
            continue;
        }
        span = Some(match span {
            Some(span) => span.cover(range),
            None => range,
        });
    }
    span.unwrap_or_else(|| TextRange::empty(first.text_range().start()))
}

/// Helper function to find first token of a specific kind
fn token_of_kind(parent: &IniSyntaxNode, kind: IniSyntaxKind) -> Option<Token> {
    parent
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
        .map(Token::new)
}

/// Direct trivia tokens before the first structural child
fn leading_trivia(parent: &IniSyntaxNode) -> Vec<Token> {
    parent
        .children_with_tokens()
        .map_while(|e| e.into_token().filter(|t| t.kind().is_trivia()))
        .map(Token::new)
        .collect()
}

/// Direct trivia tokens after the direct child token of kind `last`
fn trivia_after(parent: &IniSyntaxNode, last: IniSyntaxKind) -> Vec<Token> {
    parent
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .skip_while(|t| t.kind() != last)
        .skip(1)
        .filter(|t| t.kind().is_trivia())
        .map(Token::new)
        .collect()
}

// ============================================================================
// Token
// ============================================================================

/// A token of the tree
///
/// Structural tokens that were expected but absent are present in the tree
/// with an empty range; see [`Token::is_missing`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    syntax: IniSyntaxToken,
}

impl Token {
    pub fn new(syntax: IniSyntaxToken) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> &IniSyntaxToken {
        &self.syntax
    }

    pub fn kind(&self) -> IniSyntaxKind {
        self.syntax.kind()
    }

    pub fn text_range(&self) -> TextRange {
        self.syntax.text_range()
    }

    pub fn text(&self) -> &str {
        self.syntax.text()
    }

    /// True iff the token has zero length
    pub fn is_missing(&self) -> bool {
        self.syntax.text_range().is_empty()
    }

    pub fn is_trivia(&self) -> bool {
        self.kind().is_trivia()
    }

    pub fn category(&self) -> Option<TokenCategory> {
        self.kind().category()
    }

    pub fn start(&self) -> TextSize {
        self.text_range().start()
    }

    pub fn end(&self) -> TextSize {
        self.text_range().end()
    }

    /// Text of a present token
    fn present_text(&self) -> Option<String> {
        (!self.is_missing()).then(|| self.text().to_string())
    }
}

// ============================================================================
// Document
// ============================================================================

/// Root of an INI document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    syntax: IniSyntaxNode,
}

impl AstNode for Document {
    fn can_cast(kind: IniSyntaxKind) -> bool {
        kind == IniSyntaxKind::Document
    }

    fn cast(node: IniSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &IniSyntaxNode {
        &self.syntax
    }

    /// The whole text
    fn span(&self) -> TextRange {
        self.syntax.text_range()
    }
}

impl Document {
    /// The parser always roots a tree in a Document node
    pub(crate) fn from_root(syntax: IniSyntaxNode) -> Self {
        debug_assert_eq!(syntax.kind(), IniSyntaxKind::Document);
        Self { syntax }
    }

    /// Sections in source order
    pub fn sections(&self) -> impl Iterator<Item = Section> + use<> {
        self.syntax.children().filter_map(Section::cast)
    }

    /// Properties declared before the first section header
    pub fn preamble(&self) -> Option<Preamble> {
        self.syntax.children().find_map(Preamble::cast)
    }

    /// Every property of the document in source order
    pub fn properties(&self) -> impl Iterator<Item = Property> + use<> {
        self.syntax.descendants().filter_map(Property::cast)
    }

    /// Sections whose name matches `name`, ignoring case, in source order
    pub fn sections_named(&self, name: &str) -> impl Iterator<Item = Section> + use<> {
        let name = name.to_string();
        self.sections()
            .filter(move |s| s.name_text().is_some_and(|n| names_equal(&n, &name)))
    }

    /// Every token of the document, trivia included, in source order
    pub fn tokens(&self) -> impl Iterator<Item = Token> + use<> {
        self.syntax
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .map(Token::new)
    }

    /// Trivia owned by the document itself
    ///
    /// Only non-empty when the text has no section and no property.
    pub fn trivia(&self) -> Vec<Token> {
        leading_trivia(&self.syntax)
    }
}

// ============================================================================
// Preamble
// ============================================================================

/// Properties that appear before any section header
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Preamble {
    syntax: IniSyntaxNode,
}

impl AstNode for Preamble {
    fn can_cast(kind: IniSyntaxKind) -> bool {
        kind == IniSyntaxKind::Preamble
    }

    fn cast(node: IniSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &IniSyntaxNode {
        &self.syntax
    }
}

impl Preamble {
    pub fn properties(&self) -> impl Iterator<Item = Property> + use<> {
        self.syntax.children().filter_map(Property::cast)
    }

    /// Trivia after the last property, when nothing else follows
    pub fn trailing_trivia(&self) -> Vec<Token> {
        self.syntax
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .map(Token::new)
            .collect()
    }

    pub fn document(&self) -> Option<Document> {
        self.syntax.parent().and_then(Document::cast)
    }
}

// ============================================================================
// Section
// ============================================================================

/// A `[name]` header and the properties that follow it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Section {
    syntax: IniSyntaxNode,
}

impl AstNode for Section {
    fn can_cast(kind: IniSyntaxKind) -> bool {
        kind == IniSyntaxKind::Section
    }

    fn cast(node: IniSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &IniSyntaxNode {
        &self.syntax
    }
}

impl Section {
    pub fn opening_bracket(&self) -> Option<Token> {
        token_of_kind(&self.syntax, IniSyntaxKind::LBracket)
    }

    pub fn name_token(&self) -> Option<Token> {
        token_of_kind(&self.syntax, IniSyntaxKind::SectionName)
    }

    pub fn closing_bracket(&self) -> Option<Token> {
        token_of_kind(&self.syntax, IniSyntaxKind::RBracket)
    }

    /// Section name, `None` when missing
    pub fn name(&self) -> Option<String> {
        self.name_token().and_then(|t| t.present_text())
    }

    /// Section name text; empty when missing
    pub fn name_text(&self) -> Option<String> {
        self.name_token().map(|t| t.text().to_string())
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + use<> {
        self.syntax.children().filter_map(Property::cast)
    }

    pub fn has_properties(&self) -> bool {
        self.properties().next().is_some()
    }

    /// True if any header token is missing
    pub fn has_missing_tokens(&self) -> bool {
        [
            self.opening_bracket(),
            self.name_token(),
            self.closing_bracket(),
        ]
        .iter()
        .any(|t| t.as_ref().is_none_or(Token::is_missing))
    }

    /// Comments, blank lines and indentation before the header
    pub fn leading_trivia(&self) -> Vec<Token> {
        leading_trivia(&self.syntax)
    }

    /// Trivia after the closing bracket: the rest of the header line and,
    /// for the last section, trailing comments and blank lines
    pub fn trailing_trivia(&self) -> Vec<Token> {
        trivia_after(&self.syntax, IniSyntaxKind::RBracket)
    }

    /// Range of the header tokens, from `[` to `]`
    pub fn header_span(&self) -> TextRange {
        let start = self
            .opening_bracket()
            .map(|t| t.start())
            .unwrap_or_else(|| self.span().start());
        let end = [self.opening_bracket(), self.name_token(), self.closing_bracket()]
            .into_iter()
            .flatten()
            .filter(|t| !t.is_missing())
            .map(|t| t.end())
            .max()
            .unwrap_or(start);
        TextRange::new(start, end.max(start))
    }

    pub fn document(&self) -> Option<Document> {
        self.syntax.parent().and_then(Document::cast)
    }

    /// Whether `other` has the same name, ignoring case
    pub fn name_matches(&self, other: &Section) -> bool {
        match (self.name_text(), other.name_text()) {
            (Some(a), Some(b)) => names_equal(&a, &b),
            _ => false,
        }
    }
}

// ============================================================================
// Property
// ============================================================================

/// A `name=value` declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    syntax: IniSyntaxNode,
}

impl AstNode for Property {
    fn can_cast(kind: IniSyntaxKind) -> bool {
        kind == IniSyntaxKind::Property
    }

    fn cast(node: IniSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &IniSyntaxNode {
        &self.syntax
    }
}

impl Property {
    pub fn name_token(&self) -> Option<Token> {
        token_of_kind(&self.syntax, IniSyntaxKind::PropertyName)
    }

    pub fn delimiter(&self) -> Option<Token> {
        token_of_kind(&self.syntax, IniSyntaxKind::Equals)
    }

    pub fn value_token(&self) -> Option<Token> {
        token_of_kind(&self.syntax, IniSyntaxKind::PropertyValue)
    }

    /// Property name, `None` when missing
    pub fn name(&self) -> Option<String> {
        self.name_token().and_then(|t| t.present_text())
    }

    /// Property value; empty when missing
    pub fn value(&self) -> String {
        self.value_token()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn has_delimiter(&self) -> bool {
        self.delimiter().is_some_and(|t| !t.is_missing())
    }

    pub fn has_value(&self) -> bool {
        self.value_token().is_some_and(|t| !t.is_missing())
    }

    /// Comments, blank lines and indentation before the property
    pub fn leading_trivia(&self) -> Vec<Token> {
        leading_trivia(&self.syntax)
    }

    /// Whitespace, comment and line break after the value
    pub fn trailing_trivia(&self) -> Vec<Token> {
        trivia_after(&self.syntax, IniSyntaxKind::PropertyValue)
    }

    /// Owning section; `None` for preamble properties
    pub fn section(&self) -> Option<Section> {
        self.syntax.parent().and_then(Section::cast)
    }

    /// Owning preamble; `None` for properties inside a section
    pub fn preamble(&self) -> Option<Preamble> {
        self.syntax.parent().and_then(Preamble::cast)
    }

    /// Sibling properties of the same owner, this one included
    pub fn siblings(&self) -> impl Iterator<Item = Property> + use<> {
        self.syntax
            .parent()
            .into_iter()
            .flat_map(|parent| parent.children().filter_map(Property::cast))
    }
}
