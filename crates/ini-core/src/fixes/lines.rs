//! Whole-line ranges for deletions

use rowan::TextRange;

use crate::text::Snapshot;

/// Range covering the lines that `range` touches, line break included
///
/// When the last line has no line break, the break that precedes the first
/// line is removed instead so that no empty line is left behind.
pub fn line_deletion_range(snapshot: &Snapshot, range: TextRange) -> TextRange {
    let first = snapshot.line_at(range.start());
    let last = snapshot.line_at(range.end());

    if last.has_line_break() {
        return TextRange::new(first.start(), last.end_including_break());
    }

    match first.number().checked_sub(1).and_then(|n| snapshot.line(n)) {
        Some(previous) => TextRange::new(previous.end(), last.end()),
        None => TextRange::new(first.start(), last.end()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::TextSize;

    fn delete(text: &str, start: u32, end: u32) -> String {
        let snapshot = Snapshot::from_text(text);
        let range = line_deletion_range(
            &snapshot,
            TextRange::new(TextSize::from(start), TextSize::from(end)),
        );
        let mut result = text.to_string();
        result.replace_range(usize::from(range.start())..usize::from(range.end()), "");
        result
    }

    #[test]
    fn test_middle_line() {
        assert_eq!(delete("a\nbb\nc\n", 2, 4), "a\nc\n");
    }

    #[test]
    fn test_crlf_line() {
        assert_eq!(delete("a\r\nbb\r\nc", 3, 5), "a\r\nc");
    }

    #[test]
    fn test_last_line_without_break() {
        assert_eq!(delete("a\nbb", 2, 4), "a");
        assert_eq!(delete("a\r\nbb", 3, 5), "a");
    }

    #[test]
    fn test_only_line() {
        assert_eq!(delete("  bb", 2, 4), "");
    }

    #[test]
    fn test_multiple_lines() {
        assert_eq!(delete("a\nb\nc\nd\n", 2, 5), "a\nd\n");
    }
}
