//! Line-local span readers
//!
//! Every reader takes the full text and a byte cursor, returns the span it
//! consumed and advances the cursor past it. Readers never cross a line
//! terminator, treat the end of the text like the end of a line, and return an
//! empty span at the cursor when nothing matches. An empty span from
//! [`read_delimiter`] is how the parser represents a missing token.

use rowan::TextRange;

use crate::text::text_range;

/// Starts a comment that runs to the end of the line
pub const COMMENT_MARKER: char = ';';
/// Opens a section header
pub const SECTION_OPEN: char = '[';
/// Closes a section header
pub const SECTION_CLOSE: char = ']';
/// Separates a property name from its value
pub const PROPERTY_DELIMITER: char = '=';

const DELIMITERS: [char; 3] = [SECTION_OPEN, SECTION_CLOSE, PROPERTY_DELIMITER];

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// The character at `cursor`, if any
pub fn peek(text: &str, cursor: usize) -> Option<char> {
    text.get(cursor..)?.chars().next()
}

/// Read characters matching `predicate` up to the end of the line
///
/// With `rewind_whitespace`, trailing whitespace is given back so that it can
/// be read as a separate token.
pub fn read_to_line_end_while(
    text: &str,
    cursor: &mut usize,
    predicate: impl Fn(char) -> bool,
    rewind_whitespace: bool,
) -> TextRange {
    let start = (*cursor).min(text.len());
    let Some(rest) = text.get(start..) else {
        return text_range(start, start);
    };

    let mut end = start;
    for c in rest.chars() {
        if is_line_break(c) || !predicate(c) {
            break;
        }
        end += c.len_utf8();
    }

    if rewind_whitespace {
        end = start + text[start..end].trim_end().len();
    }

    *cursor = end;
    text_range(start, end)
}

/// Read a run of whitespace, never crossing a line terminator
pub fn read_whitespace(text: &str, cursor: &mut usize) -> TextRange {
    read_to_line_end_while(text, cursor, char::is_whitespace, false)
}

/// Read one of `[`, `]` or `=`
pub fn read_delimiter(text: &str, cursor: &mut usize) -> TextRange {
    let start = (*cursor).min(text.len());
    match peek(text, start) {
        Some(c) if DELIMITERS.contains(&c) => {
            *cursor = start + c.len_utf8();
            text_range(start, *cursor)
        }
        _ => {
            *cursor = start;
            text_range(start, start)
        }
    }
}

/// Read a section name, stopping at `]` or a comment
pub fn read_section_name(text: &str, cursor: &mut usize) -> TextRange {
    read_to_line_end_while(
        text,
        cursor,
        |c| c != SECTION_CLOSE && c != COMMENT_MARKER,
        true,
    )
}

/// Read a property name, stopping at `=` or a comment
pub fn read_property_name(text: &str, cursor: &mut usize) -> TextRange {
    read_to_line_end_while(
        text,
        cursor,
        |c| c != PROPERTY_DELIMITER && c != COMMENT_MARKER,
        true,
    )
}

/// Read a property value, stopping at a comment
pub fn read_property_value(text: &str, cursor: &mut usize) -> TextRange {
    read_to_line_end_while(text, cursor, |c| c != COMMENT_MARKER, true)
}

/// Read a comment including its marker, up to the line terminator
pub fn read_comment(text: &str, cursor: &mut usize) -> TextRange {
    if peek(text, *cursor) != Some(COMMENT_MARKER) {
        *cursor = (*cursor).min(text.len());
        return text_range(*cursor, *cursor);
    }
    read_to_line_end_while(text, cursor, |_| true, false)
}

/// Read whatever is left on the line
pub fn read_rest_of_line(text: &str, cursor: &mut usize) -> TextRange {
    read_to_line_end_while(text, cursor, |_| true, false)
}

/// Read a line terminator: `\r\n`, `\n` or `\r`
pub fn read_line_break(text: &str, cursor: &mut usize) -> TextRange {
    let start = (*cursor).min(text.len());
    let rest = text.get(start..).unwrap_or_default();
    let len = if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with(['\n', '\r']) {
        1
    } else {
        0
    };
    *cursor = start + len;
    text_range(start, *cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(
        reader: fn(&str, &mut usize) -> TextRange,
        text: &str,
        start: usize,
    ) -> (String, usize) {
        let mut cursor = start;
        let range = reader(text, &mut cursor);
        (text[range].to_string(), cursor)
    }

    #[test]
    fn test_whitespace_stops_at_line_break() {
        assert_eq!(read(read_whitespace, "  \t\nx", 0), ("  \t".into(), 3));
        assert_eq!(read(read_whitespace, "x", 0), ("".into(), 0));
    }

    #[test]
    fn test_delimiter_present_and_missing() {
        assert_eq!(read(read_delimiter, "[a]", 0), ("[".into(), 1));
        assert_eq!(read(read_delimiter, "[a]", 2), ("]".into(), 3));
        assert_eq!(read(read_delimiter, "a=b", 1), ("=".into(), 2));

        let mut cursor = 1;
        let missing = read_delimiter("[a", &mut cursor);
        assert!(missing.is_empty());
        assert_eq!(u32::from(missing.start()), 1);
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_section_name_trims_trailing_whitespace() {
        assert_eq!(read(read_section_name, "[my section  ]", 1), ("my section".into(), 11));
        assert_eq!(read(read_section_name, "[a;c", 1), ("a".into(), 2));
        assert_eq!(read(read_section_name, "[]", 1), ("".into(), 1));
    }

    #[test]
    fn test_property_name_and_value() {
        let text = "key name = some value ; note";
        assert_eq!(read(read_property_name, text, 0), ("key name".into(), 8));
        assert_eq!(read(read_property_value, text, 11), ("some value".into(), 21));
    }

    #[test]
    fn test_value_may_contain_delimiters() {
        assert_eq!(read(read_property_value, "a=b=[c]", 2), ("b=[c]".into(), 7));
    }

    #[test]
    fn test_comment() {
        assert_eq!(read(read_comment, "x ; note  \r\n", 2), ("; note  ".into(), 10));
        assert_eq!(read(read_comment, "x", 0), ("".into(), 0));
    }

    #[test]
    fn test_line_break() {
        assert_eq!(read(read_line_break, "a\r\nb", 1), ("\r\n".into(), 3));
        assert_eq!(read(read_line_break, "a\rb", 1), ("\r".into(), 2));
        assert_eq!(read(read_line_break, "a", 1), ("".into(), 1));
    }

    #[test]
    fn test_reading_past_end_returns_empty() {
        assert_eq!(read(read_section_name, "[a", 10), ("".into(), 2));
        assert_eq!(read(read_delimiter, "", 0), ("".into(), 0));
        assert_eq!(read(read_comment, "", 5), ("".into(), 0));
    }

    #[test]
    fn test_non_ascii_names() {
        assert_eq!(read(read_section_name, "[größe]", 1), ("größe".into(), 8));
    }
}
