//! Refactorings offered without a diagnostic

use crate::cst::{AstNode, Property, Section, SyntaxTree};
use crate::result::Result;
use crate::text::BufferEdit;

use super::ensure_in_tree;
use super::lines::line_deletion_range;

/// Whether [`remove_empty_section`] applies: a complete header and no properties
pub fn is_empty_section(section: &Section) -> bool {
    !section.has_missing_tokens() && !section.has_properties()
}

/// Whether [`remove_empty_property_declaration`] applies: a `=` and no value
pub fn is_empty_property(property: &Property) -> bool {
    property.has_delimiter() && !property.has_value()
}

/// Delete the span of a section without properties
///
/// Comments around the header are kept. Empty when the section has
/// properties.
pub fn remove_empty_section(tree: &SyntaxTree, section: &Section) -> Result<BufferEdit> {
    ensure_in_tree(tree, section.syntax())?;

    let mut edit = BufferEdit::new(tree.snapshot());
    if !section.has_properties() {
        edit.delete(section.span());
    }
    Ok(edit)
}

/// Delete the line of a property declared without a value
pub fn remove_empty_property_declaration(
    tree: &SyntaxTree,
    property: &Property,
) -> Result<BufferEdit> {
    ensure_in_tree(tree, property.syntax())?;

    let mut edit = BufferEdit::new(tree.snapshot());
    edit.delete(line_deletion_range(tree.snapshot(), property.span()));
    Ok(edit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_text;

    #[test]
    fn test_empty_section_predicate() {
        let tree = parse_text("[a]\n[b]\nx=1\n[c\n");
        let flags: Vec<bool> = tree.document().sections().map(|s| is_empty_section(&s)).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn test_remove_empty_section() {
        let tree = parse_text("[a] ; note\n[b]\nx=1\n");
        let section = tree.document().sections().next().unwrap();
        let edit = remove_empty_section(&tree, &section).unwrap();
        assert_eq!(edit.apply_to(tree.snapshot()).unwrap(), " ; note\n[b]\nx=1\n");
    }

    #[test]
    fn test_remove_section_with_properties_is_noop() {
        let tree = parse_text("[b]\nx=1\n");
        let section = tree.document().sections().next().unwrap();
        assert!(remove_empty_section(&tree, &section).unwrap().is_empty());
    }

    #[test]
    fn test_empty_property_predicate() {
        let tree = parse_text("[a]\nx=\ny\nz=1\nw = ; c\n");
        let flags: Vec<bool> = tree
            .document()
            .properties()
            .map(|p| is_empty_property(&p))
            .collect();
        assert_eq!(flags, vec![true, false, false, true]);
    }

    #[test]
    fn test_remove_empty_property() {
        let tree = parse_text("[a]\nx=1\ny =\n");
        let property = tree.document().properties().nth(1).unwrap();
        let edit = remove_empty_property_declaration(&tree, &property).unwrap();
        assert_eq!(edit.apply_to(tree.snapshot()).unwrap(), "[a]\nx=1\n");
    }
}
