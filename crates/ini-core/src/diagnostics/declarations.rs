//! Duplicate declaration checks
//!
//! Sections and properties use a first-wins policy: among declarations that
//! share a key, the earliest in source order is canonical and is never
//! flagged. Names are compared ignoring case, values exactly.
//!
//! Sections that share a name act as one scope for their properties.
//! Properties before the first header form their own scope.

use crate::cst::{AstNode, Property, Section, names_equal};

use super::{Diagnostic, Severity};

/// A section whose name was already declared by an earlier section
pub const MULTIPLE_DECLARATIONS_OF_SECTION: &str = "MultipleDeclarationsOfSection";

/// A property repeating an earlier declaration with the same value
pub const REDUNDANT_PROPERTY_DECLARATION: &str = "RedundantPropertyDeclaration";

/// A property overriding an earlier declaration with another value
pub const MULTIPLE_DECLARATIONS_OF_PROPERTY: &str = "MultipleDeclarationsOfProperty";

/// First section of the document with the same name as `section`
///
/// `None` for sections without a name.
pub fn canonical_section(section: &Section) -> Option<Section> {
    let name = section.name()?;
    let document = section.document()?;
    document.sections_named(&name).next()
}

/// Flag a section that is not the first one with its name
pub fn check_section_declarations(section: &Section) -> Vec<Diagnostic> {
    let (Some(name), Some(name_token)) = (section.name(), section.name_token()) else {
        return Vec::new();
    };

    match canonical_section(section) {
        Some(first) if first != *section => vec![Diagnostic::new(
            MULTIPLE_DECLARATIONS_OF_SECTION,
            Severity::Warning,
            format!("Multiple declarations of section '{name}'"),
            name_token.text_range(),
        )],
        _ => Vec::new(),
    }
}

/// Properties sharing a scope with `property`, in source order
///
/// The scope is every section whose name matches the owning section's name,
/// or the preamble.
pub fn declaration_scope(property: &Property) -> Vec<Property> {
    if let Some(section) = property.section() {
        let name = section.name_text().unwrap_or_default();
        return match section.document() {
            Some(document) => document
                .sections()
                .filter(|s| names_equal(&s.name_text().unwrap_or_default(), &name))
                .flat_map(|s| s.properties())
                .collect(),
            None => section.properties().collect(),
        };
    }

    property.siblings().collect()
}

/// Earlier declaration of the same property with the same value, if any
pub fn redundant_with(property: &Property) -> Option<Property> {
    let name = property.name()?;
    let value = property.value();
    declaration_scope(property)
        .into_iter()
        .filter(|p| p.name().is_some_and(|n| names_equal(&n, &name)))
        .find(|p| p.value() == value)
        .filter(|first| first != property)
}

/// Flag a property that repeats or overrides an earlier declaration
///
/// A repeat with the same value is redundant and flagged on the whole
/// property. Otherwise a property that is not the first with its name is
/// flagged on its name.
pub fn check_property_declarations(property: &Property) -> Vec<Diagnostic> {
    let (Some(name), Some(name_token)) = (property.name(), property.name_token()) else {
        return Vec::new();
    };

    let same_name: Vec<Property> = declaration_scope(property)
        .into_iter()
        .filter(|p| p.name().is_some_and(|n| names_equal(&n, &name)))
        .collect();

    let value = property.value();
    if let Some(first_same_value) = same_name.iter().find(|p| p.value() == value)
        && first_same_value != property
    {
        return vec![Diagnostic::new(
            REDUNDANT_PROPERTY_DECLARATION,
            Severity::Warning,
            format!("Redundant declaration of property '{name}'"),
            property.span(),
        )];
    }

    match same_name.first() {
        Some(first) if first != property => vec![Diagnostic::new(
            MULTIPLE_DECLARATIONS_OF_PROPERTY,
            Severity::Warning,
            format!("Multiple declarations of property '{name}'"),
            name_token.text_range(),
        )],
        _ => Vec::new(),
    }
}
