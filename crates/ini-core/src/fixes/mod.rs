//! Code fixes and refactorings
//!
//! Every fix is a function from captured nodes to a [`BufferEdit`]. Nothing
//! is applied here: callers decide when and whether to apply an edit, and a
//! buffer rejects edits computed against an outdated version with
//! [`IniError::StaleReference`].
//!
//! [`CodeAction`] wraps a fix with its title and the tree it was discovered
//! on, so the edit can be computed lazily.

mod actions;
mod lines;

pub mod declarations;
pub mod refactorings;
pub mod syntax;

pub use actions::{CodeAction, CodeActionKind, Fix, code_actions};
pub use declarations::{
    merge_declarations_into_first_section, merge_sections, remove_redundant_property_declaration,
};
pub use lines::line_deletion_range;
pub use refactorings::{
    is_empty_property, is_empty_section, remove_empty_property_declaration, remove_empty_section,
};
pub use syntax::{insert_missing_property_delimiter, insert_missing_section_closing_bracket};

use crate::cst::{IniSyntaxNode, SyntaxTree};
use crate::error::IniError;
use crate::result::Result;

/// Fail unless `node` was taken from `tree`
fn ensure_in_tree(tree: &SyntaxTree, node: &IniSyntaxNode) -> Result<()> {
    if tree.contains(node) {
        Ok(())
    } else {
        Err(IniError::inconsistent_nodes(format!(
            "{} at {:?} does not belong to version {} of {}",
            node.kind(),
            node.text_range(),
            tree.version(),
            tree.buffer_id()
        )))
    }
}
