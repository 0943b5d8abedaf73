//! Concrete Syntax Tree (CST) for INI documents
//!
//! This module implements a lossless, error-tolerant syntax tree using the
//! Rowan library. Every character of the input, including whitespace,
//! comments, line breaks and unrecognized content, belongs to exactly one
//! token, so the tree text always equals the source text.
//!
//! ## Architecture
//!
//! - **Green Tree**: immutable, position-independent storage. Cheap to clone
//!   and safe to share between threads. Two trees parsed from equal text have
//!   equal green trees.
//! - **Red Tree**: views with parent pointers and absolute offsets, created on
//!   demand for traversal. The typed wrappers in [`ast`] sit on top of it.
//!
//! ## Shape
//!
//! ```text
//! Document
//!   Preamble?            properties before the first header
//!     Property*
//!   Section*             one per `[...]` header, in source order
//!     <leading trivia>   comments and blank lines above the header
//!     LBracket SectionName RBracket
//!     <trailing trivia>  rest of the header line
//!     Property*
//!       <leading trivia>
//!       PropertyName Equals PropertyValue
//!       <trailing trivia>
//! ```
//!
//! Structural tokens that are absent in the source are still present in the
//! tree, with an empty range at the point where parsing expected them.
//!
//! ## Example
//!
//! ```
//! use ini_core::cst::{AstNode, parse_text};
//!
//! let tree = parse_text("[section");
//! let section = tree.document().sections().next().unwrap();
//! let closing = section.closing_bracket().unwrap();
//!
//! assert!(closing.is_missing());
//! assert_eq!(u32::from(closing.start()), 8);
//! assert_eq!(tree.syntax().text().to_string(), "[section");
//! ```

mod language;
mod parser;
mod syntax_kind;
mod tree;

pub mod ast;
pub mod scanner;

pub use ast::{AstNode, Document, Preamble, Property, Section, Token, names_equal};
pub use language::{IniLanguage, IniSyntaxElement, IniSyntaxNode, IniSyntaxToken};
pub use parser::parse_green;
pub use syntax_kind::{IniSyntaxKind, TokenCategory};
pub use tree::{SyntaxTree, parse, parse_text};
