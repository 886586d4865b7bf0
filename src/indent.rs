//! Indentation normalization for captured blocks.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*").expect("invalid leading whitespace regex"));

/// Strip the common leading whitespace from a block of lines.
///
/// The width is the minimum leading-whitespace length among non-blank lines,
/// counted in characters. Exactly that many characters are removed from
/// every line; lines shorter than the width become empty. A block of only
/// blank lines is returned unchanged, so the operation is idempotent.
pub fn shift_left(lines: &[String]) -> Vec<String> {
    let min_width = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace_width(line))
        .min();

    match min_width {
        Some(offset) if offset > 0 => lines
            .iter()
            .map(|line| line.chars().skip(offset).collect())
            .collect(),
        _ => lines.to_vec(),
    }
}

fn leading_whitespace_width(line: &str) -> usize {
    match LEADING_WHITESPACE.find(line) {
        Some(matched) => line[..matched.end()].chars().count(),
        None => 0,
    }
}
