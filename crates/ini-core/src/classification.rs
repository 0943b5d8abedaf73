//! Token classification for syntax highlighting

use rowan::TextRange;
use serde::{Deserialize, Serialize};

use crate::cst::{SyntaxTree, TokenCategory};

/// A classified range of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedSpan {
    pub range: TextRange,
    pub category: TokenCategory,
}

/// Classify the tokens intersecting `range`, in source order
///
/// Tokens that only touch `range` are included.
///
/// Missing tokens, whitespace, line breaks and skipped content are not
/// classified.
pub fn classify(tree: &SyntaxTree, range: TextRange) -> Vec<ClassifiedSpan> {
    tree.document()
        .tokens()
        .filter(|t| !t.is_missing())
        .filter(|t| t.text_range().intersect(range).is_some())
        .filter_map(|t| {
            t.category().map(|category| ClassifiedSpan {
                range: t.text_range(),
                category,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_text;
    use rowan::TextSize;

    fn render(source: &str, range: TextRange) -> Vec<(String, TokenCategory)> {
        let tree = parse_text(source);
        classify(&tree, range)
            .into_iter()
            .map(|span| (source[span.range].to_string(), span.category))
            .collect()
    }

    #[test]
    fn test_classify_document() {
        let source = "; top\n[ main ] ; c\nkey = some value\n#?\nflag\n";
        let spans = render(source, TextRange::up_to(TextSize::of(source)));
        assert_eq!(
            spans,
            vec![
                ("; top".to_string(), TokenCategory::Comment),
                ("[".to_string(), TokenCategory::Delimiter),
                ("main".to_string(), TokenCategory::SectionName),
                ("]".to_string(), TokenCategory::Delimiter),
                ("; c".to_string(), TokenCategory::Comment),
                ("key".to_string(), TokenCategory::PropertyName),
                ("=".to_string(), TokenCategory::Delimiter),
                ("some value".to_string(), TokenCategory::PropertyValue),
                ("flag".to_string(), TokenCategory::PropertyName),
            ]
        );
    }

    #[test]
    fn test_classify_range() {
        let source = "[a]\nx=1\n[b]\ny=2\n";
        let spans = render(source, TextRange::new(TextSize::from(12), TextSize::from(14)));
        assert_eq!(
            spans,
            vec![
                ("y".to_string(), TokenCategory::PropertyName),
                ("=".to_string(), TokenCategory::Delimiter),
                ("2".to_string(), TokenCategory::PropertyValue),
            ]
        );
    }
}
