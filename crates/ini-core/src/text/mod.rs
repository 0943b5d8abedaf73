//! Host text buffer model
//!
//! A [`TextBuffer`] owns an immutable, versioned [`Snapshot`] of its content.
//! Every applied edit produces a brand-new snapshot with a higher version and a
//! [`ContentChange`] notification listing old/new span pairs. Edits are
//! described by [`BufferEdit`]s that remember the snapshot version they were
//! computed against; applying one to a buffer that has moved on fails with a
//! stale reference error instead of touching unrelated text.

mod buffer;
mod edit;
mod snapshot;

pub use buffer::{ContentChange, TextBuffer};
pub use edit::{BufferEdit, ChangeSpan, TextEdit, apply_edits};
pub use snapshot::{BufferId, Line, Lines, Snapshot, lines};
pub(crate) use snapshot::text_range;
