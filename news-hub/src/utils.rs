/// Text processing utilities
pub mod text {
    /// First `max_chars` characters of `text`, or `None` when it already fits.
    ///
    /// Counts Unicode scalar values, never splitting a code point.
    pub fn truncate_chars(text: &str, max_chars: usize) -> Option<&str> {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => Some(&text[..byte_index]),
            None => None,
        }
    }

    /// Cut `text` to at most `max_chars` characters, no marker.
    pub fn clip(text: &str, max_chars: usize) -> &str {
        truncate_chars(text, max_chars).unwrap_or(text)
    }

    /// Cut `text` to `max_chars` characters and append `marker` if anything was dropped.
    pub fn truncate_with_marker(text: &str, max_chars: usize, marker: &str) -> String {
        match truncate_chars(text, max_chars) {
            Some(head) => format!("{}{}", head, marker),
            None => text.to_string(),
        }
    }

    /// Key used to compare titles: surrounding whitespace dropped, lowercased.
    pub fn title_key(title: &str) -> String {
        title.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::text::*;

    #[test]
    fn test_truncate_chars_boundaries() {
        assert_eq!(truncate_chars("abc", 3), None);
        assert_eq!(truncate_chars("abcd", 3), Some("abc"));
        assert_eq!(truncate_chars("", 0), None);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(5);
        assert_eq!(truncate_chars(&text, 4), Some("éééé"));
        assert_eq!(clip(&text, 10), text);
    }

    #[test]
    fn test_truncate_with_marker() {
        assert_eq!(truncate_with_marker("hello world", 5, "..."), "hello...");
        assert_eq!(truncate_with_marker("hello", 5, "..."), "hello");
    }

    #[test]
    fn test_title_key_normalizes_case_and_whitespace() {
        assert_eq!(title_key("  AI Wins Award \t"), "ai wins award");
    }
}
