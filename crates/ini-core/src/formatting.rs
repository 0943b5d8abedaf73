//! On-type formatting
//!
//! Reacts to a character that was just typed:
//! - `]` closing a section header removes the whitespace inside the brackets
//! - `=` after a property name aligns the property's indentation with the
//!   previous property of the section, or with the section header

use rowan::{TextRange, TextSize};
use tracing::trace;

use crate::config::FormatterConfiguration;
use crate::cst::{AstNode, Property, Section, SyntaxTree};
use crate::text::BufferEdit;

/// Formats a line after a character was typed
#[derive(Debug, Clone, Default)]
pub struct OnTypeFormatter {
    config: FormatterConfiguration,
}

impl OnTypeFormatter {
    pub fn new(config: FormatterConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfiguration {
        &self.config
    }

    /// Edit to apply after `ch` was typed, ending at `offset` in `tree`
    ///
    /// `None` when there is nothing to format.
    pub fn format_on_type(
        &self,
        tree: &SyntaxTree,
        offset: TextSize,
        ch: char,
    ) -> Option<BufferEdit> {
        let edit = match ch {
            ']' if self.config.trim_section_headers() => trim_section_header(tree, offset),
            '=' if self.config.align_properties() => align_property(tree, offset),
            _ => None,
        }?;

        trace!(?offset, %ch, edits = edit.edits().len(), "Formatting on type");
        Some(edit)
    }
}

/// [`OnTypeFormatter::format_on_type`] with the default configuration
pub fn format_on_type(tree: &SyntaxTree, offset: TextSize, ch: char) -> Option<BufferEdit> {
    OnTypeFormatter::default().format_on_type(tree, offset, ch)
}

fn trim_section_header(tree: &SyntaxTree, offset: TextSize) -> Option<BufferEdit> {
    let section = tree.document().sections().find(|s| {
        s.closing_bracket()
            .is_some_and(|t| !t.is_missing() && t.end() == offset)
    })?;
    let opening = section.opening_bracket()?;
    let name = section.name_token()?;
    let closing = section.closing_bracket()?;

    let mut edit = BufferEdit::new(tree.snapshot());
    if opening.end() < name.start() {
        edit.delete(TextRange::new(opening.end(), name.start()));
    }
    if name.end() < closing.start() {
        edit.delete(TextRange::new(name.end(), closing.start()));
    }
    (!edit.is_empty()).then_some(edit)
}

fn align_property(tree: &SyntaxTree, offset: TextSize) -> Option<BufferEdit> {
    let property = tree.document().properties().find(|p| {
        p.delimiter()
            .is_some_and(|t| !t.is_missing() && t.end() == offset)
    })?;
    let name = property.name_token()?;

    let reference = match previous_property(&property) {
        Some(before) => before.name_token()?.start(),
        None => property
            .section()
            .as_ref()
            .and_then(Section::opening_bracket)?
            .start(),
    };

    let snapshot = tree.snapshot();
    let reference_indent =
        snapshot.slice(TextRange::new(snapshot.line_at(reference).start(), reference))?;
    let indent_range = TextRange::new(snapshot.line_at(name.start()).start(), name.start());
    let indent = snapshot.slice(indent_range)?;

    if indent == reference_indent {
        return None;
    }

    let mut edit = BufferEdit::new(snapshot);
    edit.replace(indent_range, reference_indent);
    Some(edit)
}

/// The property declared right before `property` in the same section or preamble
fn previous_property(property: &Property) -> Option<Property> {
    property
        .siblings()
        .take_while(|p| p.syntax() != property.syntax())
        .last()
}
