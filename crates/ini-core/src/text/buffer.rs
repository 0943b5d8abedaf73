//! Versioned, editable text buffer

use rowan::{TextRange, TextSize};
use tracing::debug;

use super::edit::{BufferEdit, ChangeSpan, TextEdit, apply_edits};
use super::snapshot::{BufferId, Snapshot};
use crate::error::IniError;
use crate::result::Result;

/// Notification describing one applied edit
#[derive(Debug, Clone)]
pub struct ContentChange {
    pub before: Snapshot,
    pub after: Snapshot,
    /// Old/new span pairs, ascending
    pub changes: Vec<ChangeSpan>,
}

impl ContentChange {
    pub fn buffer_id(&self) -> BufferId {
        self.after.buffer_id()
    }

    /// True when the edit changed nothing and the version did not move
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// A text buffer whose content changes only through versioned edits
#[derive(Debug)]
pub struct TextBuffer {
    current: Snapshot,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            current: Snapshot::new(BufferId::new(), 0, text),
        }
    }

    pub fn id(&self) -> BufferId {
        self.current.buffer_id()
    }

    pub fn version(&self) -> u64 {
        self.current.version()
    }

    pub fn text(&self) -> &str {
        self.current.text()
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    /// Apply an edit computed against the current version
    ///
    /// Fails without touching the buffer when the edit targets another buffer,
    /// was computed against an older version, or has invalid ranges. An empty
    /// edit leaves the version unchanged.
    pub fn apply(&mut self, edit: &BufferEdit) -> Result<ContentChange> {
        if edit.buffer_id() != self.id() {
            return Err(IniError::ForeignBuffer {
                expected: edit.buffer_id(),
                actual: self.id(),
            });
        }
        if edit.version() != self.version() {
            return Err(IniError::stale_reference(
                self.id(),
                edit.version(),
                self.version(),
            ));
        }

        let before = self.current.clone();
        if edit.is_empty() {
            return Ok(ContentChange {
                after: before.clone(),
                before,
                changes: Vec::new(),
            });
        }

        let (text, changes) = apply_edits(before.text(), edit.edits())?;
        let after = Snapshot::new(self.id(), before.version() + 1, text);
        debug!(
            buffer = %self.id(),
            version = after.version(),
            changes = changes.len(),
            "Applied buffer edit"
        );
        self.current = after.clone();

        Ok(ContentChange {
            before,
            after,
            changes,
        })
    }

    pub fn insert(&mut self, position: TextSize, text: &str) -> Result<ContentChange> {
        self.apply_single(TextEdit::insert(position, text))
    }

    pub fn delete(&mut self, range: TextRange) -> Result<ContentChange> {
        self.apply_single(TextEdit::delete(range))
    }

    pub fn replace(&mut self, range: TextRange, text: &str) -> Result<ContentChange> {
        self.apply_single(TextEdit::replace(range, text))
    }

    /// Replace the whole content
    pub fn set_text(&mut self, text: &str) -> Result<ContentChange> {
        self.apply_single(TextEdit::replace(self.current.full_range(), text))
    }

    fn apply_single(&mut self, edit: TextEdit) -> Result<ContentChange> {
        let edit = BufferEdit::new(&self.current).with_edit(edit);
        self.apply(&edit)
    }
}
