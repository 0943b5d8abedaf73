//! Text edit descriptions
//!
//! Fixes never mutate a buffer directly. They describe the change as a
//! [`BufferEdit`], a set of non-overlapping [`TextEdit`]s expressed in the
//! coordinates of the snapshot they were computed from.

use rowan::{TextRange, TextSize};
use serde::{Deserialize, Serialize};

use super::snapshot::{BufferId, Snapshot, text_size};
use crate::error::IniError;
use crate::result::Result;

/// Represents a single text replacement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextEdit {
    /// Range to replace
    pub range: TextRange,
    /// New text to insert
    pub new_text: String,
}

impl TextEdit {
    /// Create a new text edit
    pub fn new(range: TextRange, new_text: String) -> Self {
        Self { range, new_text }
    }

    /// Create a replacement edit
    pub fn replace(range: TextRange, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// Create an insertion edit
    pub fn insert(position: TextSize, text: impl Into<String>) -> Self {
        Self {
            range: TextRange::empty(position),
            new_text: text.into(),
        }
    }

    /// Create a deletion edit
    pub fn delete(range: TextRange) -> Self {
        Self {
            range,
            new_text: String::new(),
        }
    }

    /// Check if this edit is an insertion
    pub fn is_insertion(&self) -> bool {
        self.range.is_empty() && !self.new_text.is_empty()
    }

    /// Check if this edit is a deletion
    pub fn is_deletion(&self) -> bool {
        !self.range.is_empty() && self.new_text.is_empty()
    }

    /// Check if this edit changes nothing
    pub fn is_noop(&self) -> bool {
        self.range.is_empty() && self.new_text.is_empty()
    }
}

/// An old span and the span its replacement occupies after the edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeSpan {
    pub old: TextRange,
    pub new: TextRange,
}

/// A group of edits computed against one snapshot version of one buffer
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct BufferEdit {
    buffer: BufferId,
    version: u64,
    edits: Vec<TextEdit>,
}

impl BufferEdit {
    /// An empty edit against `snapshot`
    pub fn new(snapshot: &Snapshot) -> Self {
        Self {
            buffer: snapshot.buffer_id(),
            version: snapshot.version(),
            edits: Vec::new(),
        }
    }

    pub fn with_edit(mut self, edit: TextEdit) -> Self {
        self.push(edit);
        self
    }

    pub fn push(&mut self, edit: TextEdit) {
        if !edit.is_noop() {
            self.edits.push(edit);
        }
    }

    pub fn insert(&mut self, position: TextSize, text: impl Into<String>) {
        self.push(TextEdit::insert(position, text));
    }

    pub fn delete(&mut self, range: TextRange) {
        self.push(TextEdit::delete(range));
    }

    pub fn replace(&mut self, range: TextRange, text: impl Into<String>) {
        self.push(TextEdit::replace(range, text));
    }

    pub fn buffer_id(&self) -> BufferId {
        self.buffer
    }

    /// Version of the snapshot the edit was computed against
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Preview the result of applying this edit to `snapshot`
    pub fn apply_to(&self, snapshot: &Snapshot) -> Result<String> {
        if snapshot.buffer_id() != self.buffer {
            return Err(IniError::ForeignBuffer {
                expected: self.buffer,
                actual: snapshot.buffer_id(),
            });
        }
        if snapshot.version() != self.version {
            return Err(IniError::stale_reference(
                self.buffer,
                self.version,
                snapshot.version(),
            ));
        }
        apply_edits(snapshot.text(), &self.edits).map(|(text, _)| text)
    }
}

/// Apply non-overlapping edits to `text`
///
/// Edits may be given in any order. An insertion at the start of a deleted
/// range lands in front of it. Returns the new text and the old/new span of
/// every edit in ascending order.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<(String, Vec<ChangeSpan>)> {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|edit| (edit.range.start(), edit.range.end()));

    let len = text_size(text.len());
    let mut previous_end = TextSize::from(0);
    for edit in &ordered {
        let range = edit.range;
        if range.end() > len {
            return Err(IniError::invalid_edit(format!(
                "range {range:?} is out of bounds for text of length {len:?}"
            )));
        }
        if !text.is_char_boundary(range.start().into())
            || !text.is_char_boundary(range.end().into())
        {
            return Err(IniError::invalid_edit(format!(
                "range {range:?} does not lie on character boundaries"
            )));
        }
        if range.start() < previous_end {
            return Err(IniError::invalid_edit(format!(
                "range {range:?} overlaps a previous edit"
            )));
        }
        previous_end = range.end();
    }

    let mut output = String::with_capacity(text.len());
    let mut changes = Vec::with_capacity(ordered.len());
    let mut copied_up_to = 0usize;
    for edit in ordered {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        output.push_str(&text[copied_up_to..start]);
        let new_start = output.len();
        output.push_str(&edit.new_text);
        changes.push(ChangeSpan {
            old: edit.range,
            new: TextRange::new(text_size(new_start), text_size(output.len())),
        });
        copied_up_to = end;
    }
    output.push_str(&text[copied_up_to..]);

    Ok((output, changes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn test_text_edit_constructors() {
        let insert = TextEdit::insert(3.into(), "=");
        assert!(insert.is_insertion());
        assert!(!insert.is_deletion());

        let delete = TextEdit::delete(range(0, 4));
        assert!(delete.is_deletion());

        assert!(TextEdit::insert(0.into(), "").is_noop());
    }

    #[test]
    fn test_apply_edits_out_of_order() {
        let edits = vec![
            TextEdit::delete(range(8, 16)),
            TextEdit::insert(7.into(), "\ny=2"),
        ];
        let (text, changes) = apply_edits("[a]\nx=1\n[A]\ny=2\n", &edits).unwrap();
        assert_eq!(text, "[a]\nx=1\ny=2\n");
        assert_eq!(changes[0].old, range(7, 7));
        assert_eq!(changes[0].new, range(7, 11));
        assert_eq!(changes[1].old, range(8, 16));
        assert_eq!(changes[1].new, range(12, 12));
    }

    #[test]
    fn test_insert_before_delete_at_same_offset() {
        let edits = vec![
            TextEdit::insert(2.into(), "X"),
            TextEdit::delete(range(2, 4)),
        ];
        let (text, _) = apply_edits("abcdef", &edits).unwrap();
        assert_eq!(text, "abXef");
    }

    #[test]
    fn test_rejects_overlap_and_bounds() {
        let overlapping = vec![TextEdit::delete(range(0, 3)), TextEdit::delete(range(2, 4))];
        assert!(apply_edits("abcdef", &overlapping).is_err());

        let out_of_bounds = vec![TextEdit::delete(range(4, 10))];
        assert!(apply_edits("abcdef", &out_of_bounds).is_err());

        let split_char = vec![TextEdit::insert(1.into(), "x")];
        assert!(apply_edits("é", &split_char).is_err());
    }

    #[test]
    fn test_buffer_edit_apply_to_checks_version() {
        let snapshot = Snapshot::from_text("x");
        let edit = BufferEdit::new(&snapshot).with_edit(TextEdit::insert(1.into(), "=1"));
        assert_eq!(edit.apply_to(&snapshot).unwrap(), "x=1");

        let newer = Snapshot::new(snapshot.buffer_id(), 1, "x");
        assert!(matches!(
            edit.apply_to(&newer),
            Err(IniError::StaleReference { expected: 0, actual: 1, .. })
        ));

        let other = Snapshot::from_text("x");
        assert!(matches!(
            edit.apply_to(&other),
            Err(IniError::ForeignBuffer { .. })
        ));
    }

    #[test]
    fn test_noop_edits_are_dropped() {
        let snapshot = Snapshot::from_text("x");
        let mut edit = BufferEdit::new(&snapshot);
        edit.insert(0.into(), "");
        assert!(edit.is_empty());
    }
}
