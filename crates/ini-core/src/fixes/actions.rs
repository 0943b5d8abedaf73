//! Discovering code actions for diagnostics and ranges

use std::fmt;
use std::sync::Arc;

use rowan::TextRange;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cst::{AstNode, Document, IniSyntaxKind, IniSyntaxNode, Property, Section, SyntaxTree};
use crate::diagnostics::{
    Diagnostic, MISSING_PROPERTY_DELIMITER, MISSING_SECTION_CLOSING_BRACKET,
    MULTIPLE_DECLARATIONS_OF_SECTION, REDUNDANT_PROPERTY_DECLARATION, canonical_section,
};
use crate::error::IniError;
use crate::result::Result;
use crate::text::{BufferEdit, ContentChange, TextBuffer};

use super::declarations::{
    merge_declarations_into_first_section, remove_redundant_property_declaration,
};
use super::refactorings::{
    is_empty_property, is_empty_section, remove_empty_property_declaration, remove_empty_section,
};
use super::syntax::{insert_missing_property_delimiter, insert_missing_section_closing_bracket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CodeActionKind {
    /// Resolves a diagnostic
    QuickFix,
    /// Restructures valid content
    Refactor,
}

/// The available fixes and refactorings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fix {
    InsertMissingPropertyDelimiter,
    InsertMissingSectionClosingBracket,
    MergeDeclarationsIntoFirstSection,
    RemoveRedundantPropertyDeclaration,
    RemoveEmptySection,
    RemoveEmptyPropertyDeclaration,
}

impl Fix {
    pub const ALL: [Fix; 6] = [
        Fix::InsertMissingPropertyDelimiter,
        Fix::InsertMissingSectionClosingBracket,
        Fix::MergeDeclarationsIntoFirstSection,
        Fix::RemoveRedundantPropertyDeclaration,
        Fix::RemoveEmptySection,
        Fix::RemoveEmptyPropertyDeclaration,
    ];

    pub fn kind(self) -> CodeActionKind {
        match self.diagnostic_id() {
            Some(_) => CodeActionKind::QuickFix,
            None => CodeActionKind::Refactor,
        }
    }

    /// Diagnostic resolved by this fix; `None` for refactorings
    pub fn diagnostic_id(self) -> Option<&'static str> {
        match self {
            Fix::InsertMissingPropertyDelimiter => Some(MISSING_PROPERTY_DELIMITER),
            Fix::InsertMissingSectionClosingBracket => Some(MISSING_SECTION_CLOSING_BRACKET),
            Fix::MergeDeclarationsIntoFirstSection => Some(MULTIPLE_DECLARATIONS_OF_SECTION),
            Fix::RemoveRedundantPropertyDeclaration => Some(REDUNDANT_PROPERTY_DECLARATION),
            Fix::RemoveEmptySection | Fix::RemoveEmptyPropertyDeclaration => None,
        }
    }

    /// The fix resolving diagnostics with `id`
    pub fn for_diagnostic(id: &str) -> Option<Fix> {
        Fix::ALL
            .into_iter()
            .find(|fix| fix.diagnostic_id() == Some(id))
    }

    /// Node kind the fix operates on
    pub fn target(self) -> IniSyntaxKind {
        match self {
            Fix::InsertMissingSectionClosingBracket
            | Fix::MergeDeclarationsIntoFirstSection
            | Fix::RemoveEmptySection => IniSyntaxKind::Section,
            Fix::InsertMissingPropertyDelimiter
            | Fix::RemoveRedundantPropertyDeclaration
            | Fix::RemoveEmptyPropertyDeclaration => IniSyntaxKind::Property,
        }
    }

    /// Title shown to the user for a fix applied to the section or
    /// property called `name`
    pub fn title(self, name: &str) -> String {
        match self {
            Fix::InsertMissingPropertyDelimiter => {
                "Fix syntax error: Insert missing '='".to_string()
            }
            Fix::InsertMissingSectionClosingBracket => {
                "Fix syntax error: Insert missing ']'".to_string()
            }
            Fix::MergeDeclarationsIntoFirstSection => {
                format!("Merge declarations into the first '{name}' section")
            }
            Fix::RemoveRedundantPropertyDeclaration => {
                format!("Remove redundant property declaration '{name}'")
            }
            Fix::RemoveEmptySection => format!("Remove empty section '{name}'"),
            Fix::RemoveEmptyPropertyDeclaration => {
                format!("Remove empty property declaration '{name}'")
            }
        }
    }

    /// Find the node a diagnostic of this fix was reported on
    fn locate(self, document: &Document, range: TextRange) -> Option<IniSyntaxNode> {
        match self {
            Fix::InsertMissingPropertyDelimiter => document
                .properties()
                .find(|p| p.delimiter().is_some_and(|t| t.text_range() == range))
                .map(|p| p.syntax().clone()),
            Fix::InsertMissingSectionClosingBracket => document
                .sections()
                .find(|s| s.closing_bracket().is_some_and(|t| t.text_range() == range))
                .map(|s| s.syntax().clone()),
            Fix::MergeDeclarationsIntoFirstSection => document
                .sections()
                .find(|s| s.name_token().is_some_and(|t| t.text_range() == range))
                .map(|s| s.syntax().clone()),
            Fix::RemoveRedundantPropertyDeclaration => document
                .properties()
                .find(|p| p.span() == range)
                .map(|p| p.syntax().clone()),
            Fix::RemoveEmptySection | Fix::RemoveEmptyPropertyDeclaration => None,
        }
    }

    /// Compute the edit for `node` of `tree`
    pub fn compute(self, tree: &SyntaxTree, node: &IniSyntaxNode) -> Result<BufferEdit> {
        let mismatch = || {
            IniError::inconsistent_nodes(format!(
                "{self} expects a {} node, got {}",
                self.target(),
                node.kind()
            ))
        };

        match self.target() {
            IniSyntaxKind::Section => {
                let section = Section::cast(node.clone()).ok_or_else(mismatch)?;
                match self {
                    Fix::InsertMissingSectionClosingBracket => {
                        insert_missing_section_closing_bracket(tree, &section)
                    }
                    Fix::MergeDeclarationsIntoFirstSection => {
                        merge_declarations_into_first_section(tree, &section)
                    }
                    _ => remove_empty_section(tree, &section),
                }
            }
            _ => {
                let property = Property::cast(node.clone()).ok_or_else(mismatch)?;
                match self {
                    Fix::InsertMissingPropertyDelimiter => {
                        insert_missing_property_delimiter(tree, &property)
                    }
                    Fix::RemoveRedundantPropertyDeclaration => {
                        remove_redundant_property_declaration(tree, &property)
                    }
                    _ => remove_empty_property_declaration(tree, &property),
                }
            }
        }
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Position-based handle to a node, valid for one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodePtr {
    kind: IniSyntaxKind,
    range: TextRange,
}

impl NodePtr {
    fn new(node: &IniSyntaxNode) -> Self {
        Self {
            kind: node.kind(),
            range: node.text_range(),
        }
    }

    fn resolve(&self, root: &IniSyntaxNode) -> Option<IniSyntaxNode> {
        root.descendants()
            .find(|n| n.kind() == self.kind && n.text_range() == self.range)
    }
}

/// A suggested fix or refactoring
///
/// The action keeps the tree it was discovered on alive. Its edit is always
/// computed against that tree, even after the buffer moved on.
#[derive(Debug, Clone)]
pub struct CodeAction {
    fix: Fix,
    title: String,
    tree: Arc<SyntaxTree>,
    target: NodePtr,
    diagnostic: Option<Diagnostic>,
}

impl CodeAction {
    /// Capture `node` of `tree` for `fix`
    pub fn new(fix: Fix, tree: Arc<SyntaxTree>, node: &IniSyntaxNode) -> Result<Self> {
        if node.kind() != fix.target() || !tree.contains(node) {
            return Err(IniError::inconsistent_nodes(format!(
                "{fix} cannot target {} at {:?}",
                node.kind(),
                node.text_range()
            )));
        }

        // A merge is named after the section that receives the properties
        let name = match node.kind() {
            IniSyntaxKind::Section => Section::cast(node.clone()).and_then(|s| {
                let named = match fix {
                    Fix::MergeDeclarationsIntoFirstSection => canonical_section(&s).unwrap_or(s),
                    _ => s,
                };
                named.name_text()
            }),
            _ => Property::cast(node.clone()).and_then(|p| p.name()),
        }
        .unwrap_or_default();

        Ok(Self {
            fix,
            title: fix.title(&name),
            tree,
            target: NodePtr::new(node),
            diagnostic: None,
        })
    }

    fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostic = Some(diagnostic);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> CodeActionKind {
        self.fix.kind()
    }

    pub fn fix(&self) -> Fix {
        self.fix
    }

    /// The diagnostic this action resolves
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostic.as_ref()
    }

    pub fn diagnostic_id(&self) -> Option<&'static str> {
        self.fix.diagnostic_id()
    }

    /// The tree the action was discovered on
    pub fn tree(&self) -> &Arc<SyntaxTree> {
        &self.tree
    }

    /// Range of the captured node
    pub fn target_range(&self) -> TextRange {
        self.target.range
    }

    /// Compute the edit against the captured tree
    ///
    /// Computing twice yields the same edit.
    pub fn compute_edit(&self) -> Result<BufferEdit> {
        let node = self.target.resolve(&self.tree.syntax()).ok_or_else(|| {
            IniError::inconsistent_nodes(format!(
                "{} at {:?} is not part of the captured tree",
                self.target.kind, self.target.range
            ))
        })?;
        self.fix.compute(&self.tree, &node)
    }

    /// Compute the edit and apply it to `buffer`
    ///
    /// Fails with a stale reference error when `buffer` is no longer at the
    /// version the action was discovered on.
    pub fn apply(&self, buffer: &mut TextBuffer) -> Result<ContentChange> {
        if buffer.id() != self.tree.buffer_id() {
            return Err(IniError::ForeignBuffer {
                expected: self.tree.buffer_id(),
                actual: buffer.id(),
            });
        }
        if buffer.version() != self.tree.version() {
            return Err(IniError::stale_reference(
                buffer.id(),
                self.tree.version(),
                buffer.version(),
            ));
        }

        let edit = self.compute_edit()?;
        buffer.apply(&edit)
    }
}

/// Code actions available in `range`
///
/// Quick fixes are offered for `diagnostics` intersecting `range` that were
/// computed on `tree`; refactorings for sections and properties intersecting
/// `range`.
pub fn code_actions(
    tree: &Arc<SyntaxTree>,
    diagnostics: &[Diagnostic],
    range: TextRange,
) -> Vec<CodeAction> {
    let document = tree.document();
    let mut actions = Vec::new();

    for diagnostic in diagnostics.iter().filter(|d| d.intersects(range)) {
        let Some(fix) = Fix::for_diagnostic(&diagnostic.id) else {
            continue;
        };
        let Some(node) = fix.locate(&document, diagnostic.range) else {
            debug!(id = %diagnostic.id, range = ?diagnostic.range, "No node found for diagnostic");
            continue;
        };
        if let Ok(action) = CodeAction::new(fix, tree.clone(), &node) {
            actions.push(action.with_diagnostic(diagnostic.clone()));
        }
    }

    for section in document.sections() {
        if section.span().intersect(range).is_some()
            && is_empty_section(&section)
            && let Ok(action) =
                CodeAction::new(Fix::RemoveEmptySection, tree.clone(), section.syntax())
        {
            actions.push(action);
        }
    }

    for property in document.properties() {
        if property.span().intersect(range).is_some()
            && is_empty_property(&property)
            && let Ok(action) = CodeAction::new(
                Fix::RemoveEmptyPropertyDeclaration,
                tree.clone(),
                property.syntax(),
            )
        {
            actions.push(action);
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse;
    use crate::diagnostics::DiagnosticEngine;
    use crate::text::TextBuffer;
    use rowan::TextSize;

    fn actions_for(buffer: &TextBuffer) -> Vec<CodeAction> {
        let tree = Arc::new(parse(&buffer.snapshot()));
        let diagnostics = DiagnosticEngine::new().analyze_all(&tree);
        code_actions(&tree, &diagnostics, tree.snapshot().full_range())
    }

    fn titles(actions: &[CodeAction]) -> Vec<&str> {
        actions.iter().map(|a| a.title()).collect()
    }

    #[test]
    fn test_quick_fix_titles() {
        let buffer = TextBuffer::new("[a\nx\n[A]\ny=1\ny=1\n");
        let actions = actions_for(&buffer);
        assert_eq!(
            titles(&actions),
            vec![
                "Fix syntax error: Insert missing ']'",
                "Fix syntax error: Insert missing '='",
                "Merge declarations into the first 'a' section",
                "Remove redundant property declaration 'y'",
            ]
        );
        assert!(actions.iter().all(|a| a.kind() == CodeActionKind::QuickFix));
        assert_eq!(actions[0].diagnostic_id(), Some(MISSING_SECTION_CLOSING_BRACKET));
        assert_eq!(actions[0].diagnostic().unwrap().id, MISSING_SECTION_CLOSING_BRACKET);
    }

    #[test]
    fn test_refactoring_titles() {
        let buffer = TextBuffer::new("[empty]\n[b]\nkey =\n");
        let actions = actions_for(&buffer);
        assert_eq!(
            titles(&actions),
            vec![
                "Remove empty section 'empty'",
                "Remove empty property declaration 'key'",
            ]
        );
        assert!(actions.iter().all(|a| a.kind() == CodeActionKind::Refactor));
        assert!(actions.iter().all(|a| a.diagnostic().is_none()));
    }

    #[test]
    fn test_apply_merge() {
        let mut buffer = TextBuffer::new("[a]\nx=1\n[A]\ny=2\n");
        let actions = actions_for(&buffer);
        let merge = actions
            .iter()
            .find(|a| a.fix() == Fix::MergeDeclarationsIntoFirstSection)
            .unwrap();

        assert_eq!(merge.compute_edit().unwrap(), merge.compute_edit().unwrap());
        merge.apply(&mut buffer).unwrap();
        assert_eq!(buffer.text(), "[a]\nx=1\ny=2\n");

        let after = actions_for(&buffer);
        assert!(after.iter().all(|a| a.fix() != Fix::MergeDeclarationsIntoFirstSection));
    }

    #[test]
    fn test_stale_action() {
        let mut buffer = TextBuffer::new("[a\n");
        let actions = actions_for(&buffer);
        buffer.insert(TextSize::from(0), "; header\n").unwrap();

        let err = actions[0].apply(&mut buffer).unwrap_err();
        assert!(matches!(err, IniError::StaleReference { expected: 0, actual: 1, .. }));
        assert_eq!(buffer.text(), "; header\n[a\n");

        // The edit itself is still computed against the captured tree
        let edit = actions[0].compute_edit().unwrap();
        assert_eq!(edit.version(), 0);
        assert!(buffer.apply(&edit).is_err());
    }

    #[test]
    fn test_range_filters_actions() {
        let buffer = TextBuffer::new("[a]\nx\n[b]\ny\n");
        let tree = Arc::new(parse(&buffer.snapshot()));
        let diagnostics = DiagnosticEngine::new().analyze_all(&tree);
        let range = TextRange::new(TextSize::from(10), TextSize::from(12));
        let actions = code_actions(&tree, &diagnostics, range);
        assert_eq!(actions.len(), 1);
        assert_eq!(u32::from(actions[0].target_range().start()), 10);
    }

    #[test]
    fn test_new_rejects_wrong_kind() {
        let tree = Arc::new(crate::cst::parse_text("[a]\nx=1\n"));
        let section = tree.document().sections().next().unwrap();
        assert!(
            CodeAction::new(
                Fix::RemoveEmptyPropertyDeclaration,
                tree.clone(),
                section.syntax()
            )
            .is_err()
        );

        let property = tree.document().properties().next().unwrap();
        let err = Fix::RemoveEmptySection.compute(&tree, property.syntax()).unwrap_err();
        assert!(matches!(err, IniError::InconsistentNodes { .. }));
    }
}
