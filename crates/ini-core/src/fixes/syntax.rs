//! Quick fixes for structural errors

use crate::cst::{AstNode, Property, Section, SyntaxTree};
use crate::result::Result;
use crate::text::BufferEdit;

use super::ensure_in_tree;

/// Insert `=` right after the property name
///
/// Empty when the property already has a delimiter.
pub fn insert_missing_property_delimiter(
    tree: &SyntaxTree,
    property: &Property,
) -> Result<BufferEdit> {
    ensure_in_tree(tree, property.syntax())?;

    let mut edit = BufferEdit::new(tree.snapshot());
    if property.has_delimiter() {
        return Ok(edit);
    }
    if let Some(name) = property.name_token() {
        edit.insert(name.end(), "=");
    }
    Ok(edit)
}

/// Insert `]` right after the section name
///
/// Empty when the section already has a closing bracket.
pub fn insert_missing_section_closing_bracket(
    tree: &SyntaxTree,
    section: &Section,
) -> Result<BufferEdit> {
    ensure_in_tree(tree, section.syntax())?;

    let mut edit = BufferEdit::new(tree.snapshot());
    if section.closing_bracket().is_some_and(|t| !t.is_missing()) {
        return Ok(edit);
    }
    if let Some(name) = section.name_token() {
        edit.insert(name.end(), "]");
    }
    Ok(edit)
}
