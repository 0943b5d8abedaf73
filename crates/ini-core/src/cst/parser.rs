//! Line-oriented parser for INI documents
//!
//! The parser makes one pass over the physical lines of the text. Each line is
//! a blank line, a comment, a section header, a property or unrecognized
//! content. Blank lines, comments and unrecognized lines are buffered as
//! pending trivia and become the leading children of the next Section or
//! Property. A header or property with absent pieces still produces its node,
//! with a zero-length token where the piece was expected. Parsing never fails.

use rowan::{GreenNode, GreenNodeBuilder, TextRange};
use tracing::trace;

use super::IniSyntaxKind;
use super::scanner::{
    COMMENT_MARKER, SECTION_OPEN, peek, read_comment, read_delimiter, read_line_break,
    read_property_name, read_property_value, read_rest_of_line, read_section_name,
    read_whitespace,
};
use crate::text::{Line, lines};

/// Parse INI text into a green tree
///
/// The text of the resulting tree is always identical to `text`.
///
/// # Example
///
/// ```
/// use ini_core::cst::{IniSyntaxNode, parse_green};
///
/// let source = "; settings\n[server]\nport = 8080\n";
/// let root = IniSyntaxNode::new_root(parse_green(source));
/// assert_eq!(root.text().to_string(), source);
/// ```
pub fn parse_green(text: &str) -> GreenNode {
    let mut parser = Parser::new(text);
    for line in lines(text) {
        parser.parse_line(line);
    }
    parser.finish()
}

/// Node currently open below the Document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    None,
    Preamble,
    Section,
}

struct Parser<'a> {
    text: &'a str,
    builder: GreenNodeBuilder<'static>,
    /// Trivia waiting for the next node
    pending: Vec<(IniSyntaxKind, TextRange)>,
    container: Container,
    sections: usize,
    properties: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(IniSyntaxKind::Document.into());
        Self {
            text,
            builder,
            pending: Vec::new(),
            container: Container::None,
            sections: 0,
            properties: 0,
        }
    }

    fn finish(mut self) -> GreenNode {
        // Whatever trivia is left trails the last node, or the document itself
        self.flush_pending();
        if self.container != Container::None {
            self.builder.finish_node();
        }
        self.builder.finish_node(); // DOCUMENT

        trace!(
            sections = self.sections,
            properties = self.properties,
            "Built INI green tree"
        );
        self.builder.finish()
    }

    fn parse_line(&mut self, line: Line) {
        let mut cursor = usize::from(line.start());
        let indent = read_whitespace(self.text, &mut cursor);
        self.push_trivia(IniSyntaxKind::Whitespace, indent);

        if cursor >= usize::from(line.end()) {
            // Blank line
            let line_break = read_line_break(self.text, &mut cursor);
            self.push_trivia(IniSyntaxKind::Newline, line_break);
            return;
        }

        match peek(self.text, cursor) {
            Some(COMMENT_MARKER) => {
                let comment = read_comment(self.text, &mut cursor);
                self.push_trivia(IniSyntaxKind::Comment, comment);
                let line_break = read_line_break(self.text, &mut cursor);
                self.push_trivia(IniSyntaxKind::Newline, line_break);
            }
            Some(SECTION_OPEN) => self.parse_section_header(&mut cursor),
            Some(c) if c.is_alphabetic() => self.parse_property(&mut cursor),
            _ => {
                let skipped = read_rest_of_line(self.text, &mut cursor);
                trace!(range = ?skipped, "Skipping unrecognized line content");
                self.push_trivia(IniSyntaxKind::Skipped, skipped);
                let line_break = read_line_break(self.text, &mut cursor);
                self.push_trivia(IniSyntaxKind::Newline, line_break);
            }
        }
    }

    /// Grammar: '[' ws* name ws* ']' ws* comment?
    ///
    /// The Section node stays open so that following properties become its
    /// children.
    fn parse_section_header(&mut self, cursor: &mut usize) {
        self.close_container();
        self.builder.start_node(IniSyntaxKind::Section.into());
        self.container = Container::Section;
        self.flush_pending();

        self.expect_delimiter(cursor, IniSyntaxKind::LBracket);
        self.whitespace(cursor);
        let name = read_section_name(self.text, cursor);
        self.token(IniSyntaxKind::SectionName, name);
        self.whitespace(cursor);
        self.expect_delimiter(cursor, IniSyntaxKind::RBracket);
        self.finish_line(cursor);

        self.sections += 1;
    }

    /// Grammar: name ws* '=' ws* value ws* comment?
    fn parse_property(&mut self, cursor: &mut usize) {
        if self.container == Container::None {
            self.builder.start_node(IniSyntaxKind::Preamble.into());
            self.container = Container::Preamble;
        }
        self.builder.start_node(IniSyntaxKind::Property.into());
        self.flush_pending();

        let name = read_property_name(self.text, cursor);
        self.token(IniSyntaxKind::PropertyName, name);
        self.whitespace(cursor);
        self.expect_delimiter(cursor, IniSyntaxKind::Equals);
        self.whitespace(cursor);
        let value = read_property_value(self.text, cursor);
        self.token(IniSyntaxKind::PropertyValue, value);
        self.finish_line(cursor);

        self.builder.finish_node(); // PROPERTY
        self.properties += 1;
    }

    /// Trailing whitespace, comment, leftovers and the line break of a node's line
    fn finish_line(&mut self, cursor: &mut usize) {
        self.whitespace(cursor);
        let comment = read_comment(self.text, cursor);
        self.trivia_token(IniSyntaxKind::Comment, comment);
        let rest = read_rest_of_line(self.text, cursor);
        self.trivia_token(IniSyntaxKind::Skipped, rest);
        let line_break = read_line_break(self.text, cursor);
        self.trivia_token(IniSyntaxKind::Newline, line_break);
    }

    /// Emit `kind` if the delimiter at the cursor is the expected one,
    /// otherwise a missing token of `kind` at the cursor
    fn expect_delimiter(&mut self, cursor: &mut usize, kind: IniSyntaxKind) {
        let mut probe = *cursor;
        let range = read_delimiter(self.text, &mut probe);
        let matches = !range.is_empty() && peek(self.text, *cursor) == kind.delimiter_char();
        if matches {
            *cursor = probe;
            self.token(kind, range);
        } else {
            self.token(kind, TextRange::empty(range.start()));
        }
    }

    fn whitespace(&mut self, cursor: &mut usize) {
        let range = read_whitespace(self.text, cursor);
        self.trivia_token(IniSyntaxKind::Whitespace, range);
    }

    fn close_container(&mut self) {
        if self.container != Container::None {
            self.builder.finish_node();
            self.container = Container::None;
        }
    }

    /// Emit a token, even an empty (missing) one
    fn token(&mut self, kind: IniSyntaxKind, range: TextRange) {
        self.builder.token(kind.into(), &self.text[range]);
    }

    /// Emit a trivia token unless it is empty
    fn trivia_token(&mut self, kind: IniSyntaxKind, range: TextRange) {
        if !range.is_empty() {
            self.token(kind, range);
        }
    }

    fn push_trivia(&mut self, kind: IniSyntaxKind, range: TextRange) {
        if !range.is_empty() {
            self.pending.push((kind, range));
        }
    }

    fn flush_pending(&mut self) {
        for (kind, range) in std::mem::take(&mut self.pending) {
            self.token(kind, range);
        }
    }
}
