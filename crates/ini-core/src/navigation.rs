//! Position-based editor queries: folding, bracket matching, reference
//! highlighting and hover information

use rowan::{TextRange, TextSize};
use serde::{Deserialize, Serialize};

use crate::cst::{AstNode, IniSyntaxKind, Section, SyntaxTree, Token, names_equal};
use crate::diagnostics::declarations::declaration_scope;

/// A collapsible region: the body of a section with properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldingRange {
    pub range: TextRange,
    /// Trimmed text of the region
    pub hint: String,
}

/// The bracket pair of a section header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketPair {
    pub open: TextRange,
    pub close: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolKind {
    Section,
    Property,
}

/// Hover content for a section or property name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickInfo {
    pub kind: SymbolKind,
    pub name: String,
    /// Comments attached to the declaration, one line each
    pub documentation: Option<String>,
    /// Range of the name the information applies to
    pub range: TextRange,
}

/// Folding ranges of the sections intersecting `range`
///
/// A region runs from the closing bracket to the end of the last property,
/// its trailing comment included.
pub fn folding_ranges(tree: &SyntaxTree, range: TextRange) -> Vec<FoldingRange> {
    tree.document()
        .sections()
        .filter(|s| s.span().intersect(range).is_some())
        .filter_map(|section| {
            let last = section.properties().last()?;
            let start = section.closing_bracket()?.end();
            let end = last
                .trailing_trivia()
                .iter()
                .rev()
                .find(|t| t.kind() == IniSyntaxKind::Comment)
                .map(Token::end)
                .unwrap_or_else(|| last.span().end());
            let region = TextRange::new(start, end.max(start));
            let hint = tree.snapshot().slice(region)?.trim().to_string();
            Some(FoldingRange {
                range: region,
                hint,
            })
        })
        .collect()
}

/// The brackets of the header whose `[` starts or whose `]` ends at `offset`
pub fn matching_brackets(tree: &SyntaxTree, offset: TextSize) -> Option<BracketPair> {
    tree.document().sections().find_map(|section| {
        let open = section.opening_bracket().filter(|t| !t.is_missing())?;
        let close = section.closing_bracket().filter(|t| !t.is_missing())?;
        (open.start() == offset || close.end() == offset).then(|| BracketPair {
            open: open.text_range(),
            close: close.text_range(),
        })
    })
}

/// Names declaring the same section or property as the name at `offset`
///
/// Empty unless the name is declared more than once.
pub fn highlight_references(tree: &SyntaxTree, offset: TextSize) -> Vec<TextRange> {
    let document = tree.document();

    if let Some(section) = document.sections().find(|s| touches_name(s.name_token(), offset))
        && let Some(name) = section.name()
    {
        let ranges: Vec<TextRange> = document
            .sections_named(&name)
            .filter_map(|s| s.name_token())
            .map(|t| t.text_range())
            .collect();
        return if ranges.len() > 1 { ranges } else { Vec::new() };
    }

    if let Some(property) = document.properties().find(|p| touches_name(p.name_token(), offset))
        && let Some(name) = property.name()
    {
        let ranges: Vec<TextRange> = declaration_scope(&property)
            .into_iter()
            .filter(|p| p.name().is_some_and(|n| names_equal(&n, &name)))
            .filter_map(|p| p.name_token())
            .map(|t| t.text_range())
            .collect();
        return if ranges.len() > 1 { ranges } else { Vec::new() };
    }

    Vec::new()
}

/// Name and attached comments of the section or property named at `offset`
pub fn quick_info(tree: &SyntaxTree, offset: TextSize) -> Option<QuickInfo> {
    let document = tree.document();

    if let Some(section) = document.sections().find(|s| contains_name(s.name_token(), offset)) {
        return Some(QuickInfo {
            kind: SymbolKind::Section,
            name: section.name()?,
            documentation: documentation(&section.leading_trivia(), &header_comments(&section)),
            range: section.name_token()?.text_range(),
        });
    }

    let property = document
        .properties()
        .find(|p| contains_name(p.name_token(), offset))?;
    Some(QuickInfo {
        kind: SymbolKind::Property,
        name: property.name()?,
        documentation: documentation(&property.leading_trivia(), &property.trailing_trivia()),
        range: property.name_token()?.text_range(),
    })
}

fn touches_name(name: Option<Token>, offset: TextSize) -> bool {
    name.is_some_and(|t| !t.is_missing() && t.text_range().contains_inclusive(offset))
}

fn contains_name(name: Option<Token>, offset: TextSize) -> bool {
    name.is_some_and(|t| t.text_range().contains(offset))
}

/// Trivia on the header line only, not the blank lines and comments that
/// trail the last section
fn header_comments(section: &Section) -> Vec<Token> {
    section
        .trailing_trivia()
        .into_iter()
        .take_while(|t| t.kind() != IniSyntaxKind::Newline)
        .collect()
}

/// Comments of `leading`, or of `trailing` when there are none
fn documentation(leading: &[Token], trailing: &[Token]) -> Option<String> {
    let comments = |trivia: &[Token]| -> Vec<String> {
        trivia
            .iter()
            .filter(|t| t.kind() == IniSyntaxKind::Comment)
            .map(|t| t.text().trim_start_matches(';').trim().to_string())
            .collect()
    };

    let mut lines = comments(leading);
    if lines.is_empty() {
        lines = comments(trailing);
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}
