//! Plain substring search for anchor keywords (`required_providers`, `provider`, `metal`, ...).
//!
//! No lexing happens here: a keyword inside a comment or a string is found like any other.

/// Byte range `[start, end)` of a keyword match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Returns the extent of the first occurrence of `token` in `text`.
pub fn find_token(token: &str, text: &str) -> Option<Span> {
    text.find(token).map(|start| Span {
        start,
        end: start + token.len(),
    })
}

/// Like [`find_token`], but only searches `text[from..]`.
///
/// The returned span is relative to `from`. Returns `None` when `from` is past the end of
/// `text` or does not sit on a `char` boundary.
pub fn find_token_after(token: &str, text: &str, from: usize) -> Option<Span> {
    find_token(token, text.get(from..)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_token() {
        assert_eq!(
            find_token("metal", r#"provider "metal" {}"#),
            Some(Span { start: 10, end: 15 })
        );
        assert_eq!(find_token("packet", r#"provider "metal" {}"#), None);
    }

    #[test]
    fn test_find_token_after_is_relative() {
        let text = "provider a {} provider b {}";
        assert_eq!(
            find_token_after("provider", text, 1),
            Some(Span { start: 13, end: 21 })
        );
        assert_eq!(find_token_after("provider", text, 15), None);
    }

    #[test]
    fn test_find_token_after_out_of_range() {
        assert_eq!(find_token_after("a", "abc", 4), None);
        assert_eq!(find_token_after("a", "abc", 3), None);
    }

    #[test]
    fn test_keyword_inside_comment_is_found() {
        assert_eq!(
            find_token("provider", "# the provider"),
            Some(Span { start: 6, end: 14 })
        );
    }
}
