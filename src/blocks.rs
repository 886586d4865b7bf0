//! Pairing begin/end markers into code blocks.

use crate::errors::{TestdocError, TestdocResult};
use crate::indent::shift_left;
use crate::location::Location;
use crate::marker::Marker;

/// Separator between a method's blocks when they render joined under the
/// method-name key.
pub const BLOCK_SEPARATOR: &str = "\n...\n\n";

/// The de-indented text captured between one begin/end pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub content: String,
    pub label: Option<String>,
}

/// Pair all markers of one method into blocks, in ascending start order.
///
/// Markers are sorted by line number (stable, so emission order decides
/// ties), must come in an even count, and must strictly alternate starting
/// with a begin. The captured text is the half-open line range between the
/// two call lines; the call lines themselves never appear in a block.
pub fn extract_blocks(markers: &[Marker], lines: &[String]) -> TestdocResult<Vec<CodeBlock>> {
    let mut sorted: Vec<&Marker> = markers.iter().collect();
    sorted.sort_by_key(|marker| marker.location().line_number());

    if sorted.len() % 2 != 0 {
        let method = sorted
            .first()
            .map(|marker| marker.location().method_name().to_string())
            .unwrap_or_default();
        return Err(TestdocError::UnevenMarkers {
            method,
            markers: format_markers(&sorted),
        });
    }

    let mut blocks = Vec::new();
    let mut pending: Option<(&Location, &Option<String>)> = None;

    for marker in sorted {
        match marker {
            Marker::Start { location, label } => {
                if let Some((pending_start, _)) = pending {
                    return Err(TestdocError::StartAfterStart {
                        pending: pending_start.to_string(),
                        next: marker.to_string(),
                    });
                }
                pending = Some((location, label));
            }
            Marker::End { location } => match pending.take() {
                Some((start, label)) => blocks.push(CodeBlock {
                    content: block_of(lines, start, location)?,
                    label: label.clone(),
                }),
                None => {
                    return Err(TestdocError::EndWithoutStart {
                        marker: marker.to_string(),
                    })
                }
            },
        }
    }

    Ok(blocks)
}

/// Extract and de-indent the lines strictly between two marker calls.
fn block_of(lines: &[String], start: &Location, end: &Location) -> TestdocResult<String> {
    let from = start.line_number();
    let to = end.line_number().saturating_sub(1).max(from);
    if to > lines.len() {
        return Err(TestdocError::LineOutsideSource {
            file_name: end.file_name().to_string(),
            line_number: end.line_number(),
            line_count: lines.len(),
        });
    }
    Ok(shift_left(&lines[from..to]).join("\n"))
}

fn format_markers(markers: &[&Marker]) -> String {
    markers
        .iter()
        .map(|marker| marker.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
