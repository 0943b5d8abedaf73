//! Fixes for duplicate declarations

use rowan::TextRange;

use crate::cst::{AstNode, Property, Section, SyntaxTree};
use crate::diagnostics::canonical_section;
use crate::error::IniError;
use crate::result::Result;
use crate::text::BufferEdit;

use super::ensure_in_tree;
use super::lines::line_deletion_range;

/// Move the properties of `duplicate` into the first section with its name
/// and delete the duplicate header
///
/// Empty when `duplicate` is itself the first section with its name.
pub fn merge_declarations_into_first_section(
    tree: &SyntaxTree,
    duplicate: &Section,
) -> Result<BufferEdit> {
    ensure_in_tree(tree, duplicate.syntax())?;

    match canonical_section(duplicate) {
        Some(first) if first != *duplicate => merge_sections(tree, duplicate, &first),
        _ => Ok(BufferEdit::new(tree.snapshot())),
    }
}

/// Move the lines after the header of `duplicate` behind the last line of
/// `first`, then delete the lines of `duplicate`
///
/// The header line, its comment included, goes away with the duplicate. The
/// moved lines keep their trailing comments.
///
/// Fails when the sections belong to another tree, do not share a name or
/// `first` does not precede `duplicate`.
pub fn merge_sections(
    tree: &SyntaxTree,
    duplicate: &Section,
    first: &Section,
) -> Result<BufferEdit> {
    ensure_in_tree(tree, duplicate.syntax())?;
    ensure_in_tree(tree, first.syntax())?;

    if !duplicate.name_matches(first) {
        return Err(IniError::inconsistent_nodes(format!(
            "sections '{}' and '{}' do not share a name",
            duplicate.name_text().unwrap_or_default(),
            first.name_text().unwrap_or_default()
        )));
    }
    let first_span = first.span();
    let duplicate_span = duplicate.span();
    if first_span.end() > duplicate_span.start() {
        return Err(IniError::inconsistent_nodes(
            "the target section must precede the merged section",
        ));
    }

    let snapshot = tree.snapshot();
    let body_start = snapshot.line_at(duplicate.header_span().end()).end();
    let body_end = snapshot.line_at(duplicate_span.end()).end();
    let body_range = TextRange::new(body_start.min(body_end), body_end);
    let body = snapshot.slice(body_range).unwrap_or_default();

    let insert_at = snapshot.line_at(first_span.end()).end();

    let mut edit = BufferEdit::new(snapshot);
    edit.insert(insert_at, body);
    edit.delete(line_deletion_range(snapshot, duplicate_span));

    tracing::debug!(
        section = %duplicate.name_text().unwrap_or_default(),
        from = ?duplicate_span,
        into = ?first_span,
        "Merging section declarations"
    );
    Ok(edit)
}

/// Delete the line of a property that repeats an earlier declaration
pub fn remove_redundant_property_declaration(
    tree: &SyntaxTree,
    property: &Property,
) -> Result<BufferEdit> {
    ensure_in_tree(tree, property.syntax())?;

    let mut edit = BufferEdit::new(tree.snapshot());
    edit.delete(line_deletion_range(tree.snapshot(), property.span()));
    Ok(edit)
}
