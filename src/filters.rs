//! Composable text filters for resource content.

use once_cell::sync::Lazy;
use regex::Regex;

static NEW_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<newline>\n\r?)").expect("invalid newline regex"));

/// A `text -> text` transform applied to resource content before insertion.
pub struct TextFilter {
    apply: Box<dyn Fn(&str) -> String>,
}

impl TextFilter {
    pub fn new(apply: impl Fn(&str) -> String + 'static) -> Self {
        Self {
            apply: Box::new(apply),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        (self.apply)(text)
    }

    /// Apply a filter chain left to right.
    pub fn apply_all(filters: &[TextFilter], text: String) -> String {
        filters
            .iter()
            .fold(text, |current, filter| filter.apply(&current))
    }
}

impl std::fmt::Debug for TextFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TextFilter")
    }
}

/// Prefix every line, blank lines included.
///
/// A trailing newline does not open a new line, so nothing is appended
/// after it.
pub fn line_prefix(prefix: &str) -> TextFilter {
    let prefix = prefix.to_string();
    TextFilter::new(move |text| {
        let mut prefixed = String::new();
        let mut last_end = 0;
        for matched in NEW_LINE.find_iter(text) {
            prefixed.push_str(&prefix);
            prefixed.push_str(&text[last_end..matched.start()]);
            prefixed.push_str(matched.as_str());
            last_end = matched.end();
        }
        if last_end < text.len() {
            prefixed.push_str(&prefix);
            prefixed.push_str(&text[last_end..]);
        }
        prefixed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_every_line() {
        let prefixed = line_prefix("-->").apply("123\n\r456\n\r\n\r789");
        assert_eq!(prefixed, "-->123\n\r-->456\n\r-->\n\r-->789");
    }

    #[test]
    fn test_no_prefix_after_trailing_newline() {
        let prefixed = line_prefix("-->").apply("123\n456\n");
        assert_eq!(prefixed, "-->123\n-->456\n");
    }

    #[test]
    fn test_plain_newlines() {
        let prefixed = line_prefix("\t").apply("a\nb");
        assert_eq!(prefixed, "\ta\n\tb");
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(line_prefix("-->").apply(""), "");
    }

    #[test]
    fn test_apply_all_runs_left_to_right() {
        let filters = vec![line_prefix("b"), line_prefix("a")];
        assert_eq!(TextFilter::apply_all(&filters, "x".to_string()), "abx");
    }
}
