//! Immutable, versioned views of buffer content

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rowan::{TextRange, TextSize};

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(u64);

impl BufferId {
    /// Allocate a fresh buffer identity
    pub fn new() -> Self {
        Self(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for BufferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer #{}", self.0)
    }
}

/// A physical line of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    number: usize,
    range: TextRange,
    range_including_break: TextRange,
}

impl Line {
    /// Zero-based line number
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    /// End of the line content, before the line terminator
    pub fn end(&self) -> TextSize {
        self.range.end()
    }

    /// End of the line including its terminator
    pub fn end_including_break(&self) -> TextSize {
        self.range_including_break.end()
    }

    /// Line content without the terminator
    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn range_including_break(&self) -> TextRange {
        self.range_including_break
    }

    /// The terminator itself; empty for the last line
    pub fn line_break(&self) -> TextRange {
        TextRange::new(self.range.end(), self.range_including_break.end())
    }

    pub fn has_line_break(&self) -> bool {
        !self.line_break().is_empty()
    }
}

/// Iterator over the physical lines of a text
///
/// Lines are terminated by `\n`, `\r\n` or `\r`. There is always at least one
/// line, and a text ending with a terminator has an empty last line.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    text: &'a str,
    pos: usize,
    number: usize,
    done: bool,
}

/// Enumerate the lines of `text`
pub fn lines(text: &str) -> Lines<'_> {
    Lines {
        text,
        pos: 0,
        number: 0,
        done: false,
    }
}

impl Iterator for Lines<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.done {
            return None;
        }

        let start = self.pos;
        let rest = self.text.get(start..).unwrap_or_default();
        let (end, break_len) = match rest.find(['\r', '\n']) {
            Some(index) => {
                let end = start + index;
                let break_len = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
                (end, break_len)
            }
            None => {
                self.done = true;
                (self.text.len(), 0)
            }
        };

        let line = Line {
            number: self.number,
            range: text_range(start, end),
            range_including_break: text_range(start, end + break_len),
        };
        self.pos = end + break_len;
        self.number += 1;
        Some(line)
    }
}

pub(crate) fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(text_size(start), text_size(end))
}

pub(crate) fn text_size(offset: usize) -> TextSize {
    TextSize::try_from(offset).unwrap_or(TextSize::from(u32::MAX))
}

#[derive(Debug)]
struct SnapshotData {
    buffer: BufferId,
    version: u64,
    text: String,
    lines: Vec<Line>,
}

/// Immutable view of a buffer's content at one version
///
/// Cloning is cheap; clones share the text.
#[derive(Debug, Clone)]
pub struct Snapshot {
    data: Arc<SnapshotData>,
}

impl Snapshot {
    pub fn new(buffer: BufferId, version: u64, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = lines(&text).collect();
        Self {
            data: Arc::new(SnapshotData {
                buffer,
                version,
                text,
                lines,
            }),
        }
    }

    /// A snapshot of a fresh, unnamed buffer at version 0
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(BufferId::new(), 0, text)
    }

    pub fn buffer_id(&self) -> BufferId {
        self.data.buffer
    }

    pub fn version(&self) -> u64 {
        self.data.version
    }

    pub fn text(&self) -> &str {
        &self.data.text
    }

    pub fn len(&self) -> TextSize {
        text_size(self.data.text.len())
    }

    pub fn is_empty(&self) -> bool {
        self.data.text.is_empty()
    }

    pub fn full_range(&self) -> TextRange {
        TextRange::up_to(self.len())
    }

    /// Text of `range`, or `None` when out of bounds or not on char boundaries
    pub fn slice(&self, range: TextRange) -> Option<&str> {
        self.data
            .text
            .get(usize::from(range.start())..usize::from(range.end()))
    }

    pub fn char_at(&self, offset: TextSize) -> Option<char> {
        self.data.text.get(usize::from(offset)..)?.chars().next()
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.data.lines.iter().copied()
    }

    pub fn line_count(&self) -> usize {
        self.data.lines.len()
    }

    pub fn line(&self, number: usize) -> Option<Line> {
        self.data.lines.get(number).copied()
    }

    /// The line containing `offset`; offsets past the end map to the last line
    pub fn line_at(&self, offset: TextSize) -> Line {
        let offset = offset.min(self.len());
        let index = match self
            .data
            .lines
            .binary_search_by(|line| line.start().cmp(&offset))
        {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        };
        // A line break belongs to the line it terminates
        self.data.lines[index.min(self.data.lines.len() - 1)]
    }

    /// Whether both snapshots are the same version of the same buffer
    pub fn same_version(&self, other: &Snapshot) -> bool {
        self.buffer_id() == other.buffer_id() && self.version() == other.version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(text: &str) -> Vec<(u32, u32, u32)> {
        lines(text)
            .map(|l| {
                (
                    l.start().into(),
                    l.end().into(),
                    l.end_including_break().into(),
                )
            })
            .collect()
    }

    #[test]
    fn test_lines_mixed_terminators() {
        assert_eq!(
            ranges("a\nbb\r\nc\rd"),
            vec![(0, 1, 2), (2, 4, 6), (6, 7, 8), (8, 9, 9)]
        );
    }

    #[test]
    fn test_lines_trailing_terminator_and_empty() {
        assert_eq!(ranges("a\n"), vec![(0, 1, 2), (2, 2, 2)]);
        assert_eq!(ranges(""), vec![(0, 0, 0)]);
    }

    #[test]
    fn test_line_at() {
        let snapshot = Snapshot::from_text("[a]\r\nx=1\n");
        assert_eq!(snapshot.line_count(), 3);
        assert_eq!(snapshot.line_at(0.into()).number(), 0);
        assert_eq!(snapshot.line_at(4.into()).number(), 0);
        assert_eq!(snapshot.line_at(5.into()).number(), 1);
        assert_eq!(snapshot.line_at(9.into()).number(), 2);
        assert_eq!(snapshot.line_at(100.into()).number(), 2);
    }

    #[test]
    fn test_slice_and_char_at() {
        let snapshot = Snapshot::from_text("[é]");
        assert_eq!(snapshot.char_at(1.into()), Some('é'));
        assert_eq!(snapshot.slice(TextRange::new(1.into(), 3.into())), Some("é"));
        assert_eq!(snapshot.slice(TextRange::new(1.into(), 2.into())), None);
        assert_eq!(snapshot.char_at(10.into()), None);
    }

    #[test]
    fn test_buffer_ids_are_unique() {
        let a = BufferId::new();
        let b = BufferId::new();
        assert_ne!(a, b);
        assert!(!Snapshot::from_text("").same_version(&Snapshot::from_text("")));
    }
}
