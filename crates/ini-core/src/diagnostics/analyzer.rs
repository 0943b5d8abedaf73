//! Analyzer registry
//!
//! Analyzers form a closed set. Each variant names the node kind it inspects
//! and dispatches to one of the `check_*` functions.

use std::fmt;

use crate::cst::{AstNode, Document, IniSyntaxKind, IniSyntaxNode, Property, Section};

use super::Diagnostic;
use super::declarations::{
    MULTIPLE_DECLARATIONS_OF_PROPERTY, MULTIPLE_DECLARATIONS_OF_SECTION,
    REDUNDANT_PROPERTY_DECLARATION, check_property_declarations, check_section_declarations,
};
use super::syntax::{
    MISSING_PROPERTY_DELIMITER, MISSING_SECTION_CLOSING_BRACKET, SECTION_NAME_EXPECTED,
    UNRECOGNIZED_CONTENT, check_property_delimiter, check_section_header,
    check_unrecognized_content,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analyzer {
    /// Missing section name or closing bracket
    SectionHeader,
    /// Missing `=`
    PropertyDelimiter,
    /// Sections declared more than once
    SectionDeclarations,
    /// Redundant or overriding property declarations
    PropertyDeclarations,
    /// Lines the parser skipped
    UnrecognizedContent,
}

impl Analyzer {
    /// Every analyzer, in the order they run on a node
    pub const ALL: [Analyzer; 5] = [
        Analyzer::SectionHeader,
        Analyzer::PropertyDelimiter,
        Analyzer::SectionDeclarations,
        Analyzer::PropertyDeclarations,
        Analyzer::UnrecognizedContent,
    ];

    /// Node kind this analyzer inspects
    pub fn target(self) -> IniSyntaxKind {
        match self {
            Analyzer::SectionHeader | Analyzer::SectionDeclarations => IniSyntaxKind::Section,
            Analyzer::PropertyDelimiter | Analyzer::PropertyDeclarations => {
                IniSyntaxKind::Property
            }
            Analyzer::UnrecognizedContent => IniSyntaxKind::Document,
        }
    }

    /// Ids of the diagnostics this analyzer can report
    pub fn diagnostic_ids(self) -> &'static [&'static str] {
        match self {
            Analyzer::SectionHeader => &[SECTION_NAME_EXPECTED, MISSING_SECTION_CLOSING_BRACKET],
            Analyzer::PropertyDelimiter => &[MISSING_PROPERTY_DELIMITER],
            Analyzer::SectionDeclarations => &[MULTIPLE_DECLARATIONS_OF_SECTION],
            Analyzer::PropertyDeclarations => &[
                REDUNDANT_PROPERTY_DECLARATION,
                MULTIPLE_DECLARATIONS_OF_PROPERTY,
            ],
            Analyzer::UnrecognizedContent => &[UNRECOGNIZED_CONTENT],
        }
    }

    pub fn applies_to(self, kind: IniSyntaxKind) -> bool {
        self.target() == kind
    }

    /// Run the analyzer on `node`; nodes of another kind yield nothing
    pub fn analyze(self, node: &IniSyntaxNode) -> Vec<Diagnostic> {
        if !self.applies_to(node.kind()) {
            return Vec::new();
        }

        let node = node.clone();
        let diagnostics = match self {
            Analyzer::SectionHeader => Section::cast(node).map(|s| check_section_header(&s)),
            Analyzer::PropertyDelimiter => {
                Property::cast(node).map(|p| check_property_delimiter(&p))
            }
            Analyzer::SectionDeclarations => {
                Section::cast(node).map(|s| check_section_declarations(&s))
            }
            Analyzer::PropertyDeclarations => {
                Property::cast(node).map(|p| check_property_declarations(&p))
            }
            Analyzer::UnrecognizedContent => {
                Document::cast(node).map(|d| check_unrecognized_content(&d))
            }
        };
        diagnostics.unwrap_or_default()
    }
}

impl fmt::Display for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Analyzer::SectionHeader => "section-header",
            Analyzer::PropertyDelimiter => "property-delimiter",
            Analyzer::SectionDeclarations => "section-declarations",
            Analyzer::PropertyDeclarations => "property-declarations",
            Analyzer::UnrecognizedContent => "unrecognized-content",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_text;

    #[test]
    fn test_targets() {
        assert_eq!(Analyzer::SectionHeader.target(), IniSyntaxKind::Section);
        assert_eq!(Analyzer::PropertyDeclarations.target(), IniSyntaxKind::Property);
        assert_eq!(Analyzer::UnrecognizedContent.target(), IniSyntaxKind::Document);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = Analyzer::ALL
            .iter()
            .flat_map(|a| a.diagnostic_ids().iter().copied())
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 7);
    }

    #[test]
    fn test_wrong_node_kind_yields_nothing() {
        let tree = parse_text("[a\nx\n");
        let section = tree.document().sections().next().unwrap();
        assert!(Analyzer::PropertyDelimiter.analyze(section.syntax()).is_empty());
        assert_eq!(Analyzer::SectionHeader.analyze(section.syntax()).len(), 1);

        let property = section.properties().next().unwrap();
        assert_eq!(Analyzer::PropertyDelimiter.analyze(property.syntax()).len(), 1);
    }
}
