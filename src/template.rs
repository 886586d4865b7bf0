//! Placeholder substitution.
//!
//! A template is plain text with embedded placeholders, `${label}` by
//! default or `{{label}}` with the alternate pattern. Rendering is a single
//! left-to-right pass: matched placeholders are replaced, everything else is
//! copied verbatim, and substituted text is never re-scanned. Anything that
//! does not match the pattern, an unclosed `${` included, stays literal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{TestdocError, TestdocResult};
use crate::namespace::Namespace;

static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{(?P<label>[a-zA-Z0-9\-_:.]+)\}").expect("invalid default pattern")
});

static DOUBLE_CURLY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(?P<label>[a-zA-Z0-9\-_:.]+)\}\}").expect("invalid double curly pattern")
});

/// Delimiter syntax for placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplacementPattern {
    /// `${name}`
    Default,
    /// `{{name}}`
    DoubleCurly,
}

impl ReplacementPattern {
    fn regex(self) -> &'static Regex {
        match self {
            ReplacementPattern::Default => &DEFAULT_PATTERN,
            ReplacementPattern::DoubleCurly => &DOUBLE_CURLY_PATTERN,
        }
    }
}

impl Default for ReplacementPattern {
    fn default() -> Self {
        ReplacementPattern::Default
    }
}

/// Template source plus its delimiter pattern.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    pattern: ReplacementPattern,
}

impl Template {
    pub fn of(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            pattern: ReplacementPattern::Default,
        }
    }

    pub fn with_pattern(source: impl Into<String>, pattern: ReplacementPattern) -> Self {
        Self {
            source: source.into(),
            pattern,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn pattern(&self) -> ReplacementPattern {
        self.pattern
    }

    /// Render with an arbitrary label resolver.
    pub fn render_with(
        &self,
        mut resolve: impl FnMut(&str) -> TestdocResult<String>,
    ) -> TestdocResult<String> {
        let mut rendered = String::new();
        let mut last_end = 0;

        for captures in self.pattern.regex().captures_iter(&self.source) {
            let matched = match captures.get(0) {
                Some(matched) => matched,
                None => continue,
            };
            rendered.push_str(&self.source[last_end..matched.start()]);
            rendered.push_str(&resolve(&captures["label"])?);
            last_end = matched.end();
        }

        rendered.push_str(&self.source[last_end..]);
        Ok(rendered)
    }

    /// Render under the strict policy: a missing label is fatal and the
    /// error names the label and every known one.
    pub fn render(&self, replacements: &Namespace) -> TestdocResult<String> {
        self.render_with(|label| {
            replacements
                .get(label)
                .map(str::to_string)
                .ok_or_else(|| TestdocError::UnresolvedLabel {
                    label: label.to_string(),
                    known: replacements.labels().collect::<Vec<_>>().join(", "),
                })
        })
    }

    /// Render with a fallback for missing labels.
    ///
    /// The fallback receives the unresolved label and the known labels;
    /// returning `None` is fatal.
    pub fn render_with_fallback(
        &self,
        replacements: &Namespace,
        fallback: impl Fn(&str, &[String]) -> Option<String>,
    ) -> TestdocResult<String> {
        self.render_with(|label| match replacements.get(label) {
            Some(value) => Ok(value.to_string()),
            None => {
                let known: Vec<String> =
                    replacements.labels().map(str::to_string).collect();
                fallback(label, &known).ok_or_else(|| TestdocError::FallbackFailed {
                    label: label.to_string(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str, resolve: impl Fn(&str) -> String) -> String {
        Template::of(source)
            .render_with(|label| Ok(resolve(label)))
            .unwrap()
    }

    #[test]
    fn test_no_placeholder_no_replacement() {
        assert_eq!(render("foo", |_| "NOOP".to_string()), "foo");
    }

    #[test]
    fn test_placeholder_full_replacement() {
        assert_eq!(render("${foo}", |_| "NOOP".to_string()), "NOOP");
    }

    #[test]
    fn test_placeholder_at_start() {
        assert_eq!(render("${foo}BAR", |_| "NOOP".to_string()), "NOOPBAR");
    }

    #[test]
    fn test_placeholder_at_end() {
        assert_eq!(render("BAR${foo}", |_| "NOOP".to_string()), "BARNOOP");
    }

    #[test]
    fn test_double_replacement() {
        let rendered = render("${foo}${bar}", |label| format!("[{}]", label));
        assert_eq!(rendered, "[foo][bar]");
    }

    #[test]
    fn test_multiple_replacements_with_space() {
        let rendered = render("space${foo} ${bar} and more", |label| {
            format!("[{}]", label)
        });
        assert_eq!(rendered, "space[foo] [bar] and more");
    }

    #[test]
    fn test_multiple_replacements_with_every_pattern() {
        for (pattern, source) in [
            (ReplacementPattern::Default, "space${foo} ${bar} and more"),
            (ReplacementPattern::DoubleCurly, "space{{foo}} {{bar}} and more"),
        ] {
            let rendered = Template::with_pattern(source, pattern)
                .render_with(|label| Ok(format!("[{}]", label)))
                .unwrap();
            assert_eq!(rendered, "space[foo] [bar] and more");
        }
    }

    #[test]
    fn test_label_charset() {
        let label = "abc091.-:_2123ya23";
        let mut replacements = Namespace::new();
        replacements.insert("output", label, "DONE").unwrap();

        let rendered = Template::of(format!(">>${{{}}}<<", label))
            .render(&replacements)
            .unwrap();
        assert_eq!(rendered, ">>DONE<<");
    }

    #[test]
    fn test_unclosed_delimiter_stays_literal() {
        assert_eq!(render("${foo", |_| "NOOP".to_string()), "${foo");
        assert_eq!(render("a${}b", |_| "NOOP".to_string()), "a${}b");
    }

    #[test]
    fn test_double_curly_with_map() {
        let mut replacements = Namespace::new();
        replacements.insert("output", "x", "Y").unwrap();
        let rendered = Template::with_pattern("a{{x}}b", ReplacementPattern::DoubleCurly)
            .render(&replacements)
            .unwrap();
        assert_eq!(rendered, "aYb");
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let mut replacements = Namespace::new();
        replacements.insert("output", "outer", "${inner}").unwrap();
        let rendered = Template::of("${outer}").render(&replacements).unwrap();
        assert_eq!(rendered, "${inner}");
    }

    #[test]
    fn test_strict_policy_names_label_and_known_labels() {
        let mut replacements = Namespace::new();
        replacements.insert("output", "a", "1").unwrap();
        replacements.insert("output", "b", "2").unwrap();

        let error = Template::of("${k}").render(&replacements).unwrap_err();
        assert_eq!(error.to_string(), "could not resolve k in [a, b]");
    }

    #[test]
    fn test_fallback_substitutes_missing_labels() {
        let mut replacements = Namespace::new();
        replacements.insert("output", "a", "1").unwrap();

        let rendered = Template::of("${a}${k}")
            .render_with_fallback(&replacements, |_, _| Some("MISSING".to_string()))
            .unwrap();
        assert_eq!(rendered, "1MISSING");
    }

    #[test]
    fn test_fallback_sees_known_labels() {
        let mut replacements = Namespace::new();
        replacements.insert("output", "a", "1").unwrap();

        let rendered = Template::of("${k}")
            .render_with_fallback(&replacements, |label, known| {
                Some(format!("{} not in {:?}", label, known))
            })
            .unwrap();
        assert_eq!(rendered, "k not in [\"a\"]");
    }

    #[test]
    fn test_fallback_returning_none_fails() {
        let replacements = Namespace::new();
        let error = Template::of("${k}")
            .render_with_fallback(&replacements, |_, _| None)
            .unwrap_err();
        assert_eq!(error.to_string(), "fallback returned nothing for k");
    }
}
