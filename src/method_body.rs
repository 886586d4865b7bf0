//! Locating the textual body of an already-written method.
//!
//! This backs the "include this method" capture, which records a single call
//! site instead of a begin/end pair. The search is heuristic line matching,
//! not parsing; unconventional brace styles can defeat it, which is a
//! documented limitation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{TestdocError, TestdocResult};
use crate::indent::shift_left;
use crate::location::Location;

static CLOSING_BRACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\}\s*$").expect("invalid closing brace regex"));

/// Return the de-indented body of the method enclosing `call`.
///
/// The declaration is the nearest line above the call containing the
/// method's name. The body ends either at the first blank line after the
/// call whose preceding line is a lone closing brace, or at end of input
/// when the last two lines are both lone closing braces. The recorded call
/// line itself is excluded from the result.
pub fn enclosing_method_body(lines: &[String], call: &Location) -> TestdocResult<String> {
    let call_index = call.line_index();
    if call_index >= lines.len() {
        return Err(TestdocError::LineOutsideSource {
            file_name: call.file_name().to_string(),
            line_number: call.line_number(),
            line_count: lines.len(),
        });
    }

    let method_name = call.method_name();

    let start = (0..call_index)
        .rev()
        .find(|index| lines[*index].contains(method_name))
        .ok_or_else(|| TestdocError::DeclarationNotFound {
            method: method_name.to_string(),
        })?;

    let mut end = None;
    for index in call_index..lines.len() {
        let previous = if index > 0 {
            lines[index - 1].as_str()
        } else {
            "{}"
        };
        let line = &lines[index];

        if line.trim().is_empty() && index > call_index {
            if CLOSING_BRACE.is_match(previous) {
                end = Some(index);
                break;
            }
        } else if index + 1 == lines.len()
            && CLOSING_BRACE.is_match(line)
            && CLOSING_BRACE.is_match(previous)
        {
            end = Some(index);
        }
    }

    let end = end.ok_or_else(|| TestdocError::MethodEndNotFound {
        method: method_name.to_string(),
    })?;

    // declaration through the line before `end`, without the call line
    let mut body: Vec<String> = Vec::new();
    body.extend_from_slice(&lines[start..call_index]);
    body.extend_from_slice(&lines[call_index + 1..=end]);
    body.pop();

    Ok(shift_left(&body).join("\n"))
}
