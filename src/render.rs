//! Merging everything a recording captured and rendering the template.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::blocks::extract_blocks;
use crate::errors::{TestdocError, TestdocResult};
use crate::location::Location;
use crate::marker::Marker;
use crate::method_body::enclosing_method_body;
use crate::namespace::Namespace;
use crate::sources::read_template;
use crate::template::{ReplacementPattern, Template};

pub(crate) type FallbackFn = dyn Fn(&str, &[String]) -> Option<String>;

/// Stands in for the document while no template file exists yet. Lists the
/// recorded labels so writing the real template is a copy job.
const MISSING_TEMPLATE: &str = "# missing template `${templateName}`

Create `${templatePath}` to render this document.

Recorded parts:

${recordedParts}
";

/// Everything a finished recording hands to the renderer.
pub(crate) struct RenderInputs<'a> {
    pub template_name: &'a str,
    pub template_path: &'a Path,
    pub pattern: ReplacementPattern,
    pub source_lines: &'a [String],
    pub markers: &'a [Marker],
    pub method_calls: &'a [(String, Location)],
    pub classes: &'a [(String, String)],
    pub resources: &'a [(String, String)],
    pub output: &'a [(String, String)],
    pub fallback: Option<&'a FallbackFn>,
}

pub(crate) fn render_document(inputs: &RenderInputs<'_>) -> TestdocResult<String> {
    check_single_file(inputs.markers)?;
    let replacements = merge(inputs)?;

    let template = match read_template(inputs.template_path) {
        Some(content) => Template::with_pattern(content, inputs.pattern),
        None => {
            debug!(
                template = inputs.template_name,
                "no template file, rendering a placeholder document"
            );
            return missing_template_document(inputs, &replacements);
        }
    };

    match inputs.fallback {
        Some(fallback) => template.render_with_fallback(&replacements, fallback),
        None => template.render(&replacements),
    }
}

fn check_single_file(markers: &[Marker]) -> TestdocResult<()> {
    let mut files: Vec<&str> = markers
        .iter()
        .map(|marker| marker.location().file_name())
        .collect();
    files.sort_unstable();
    files.dedup();
    if files.len() > 1 {
        return Err(TestdocError::MultipleSourceFiles {
            files: files.join(", "),
        });
    }
    Ok(())
}

/// Build the label namespace: every method's blocks first, then class
/// sources, resources, free-form output and recorded method bodies.
fn merge(inputs: &RenderInputs<'_>) -> TestdocResult<Namespace> {
    let mut replacements = Namespace::new();

    for (method, markers) in markers_by_method(inputs.markers) {
        let blocks = extract_blocks(&markers, inputs.source_lines)?;
        replacements.insert_method_blocks(method, &blocks)?;
    }
    for (label, content) in inputs.classes {
        replacements.insert("classes", label, content)?;
    }
    for (label, content) in inputs.resources {
        replacements.insert("resources", label, content)?;
    }
    for (label, content) in inputs.output {
        replacements.insert("output", label, content)?;
    }
    for (label, call) in inputs.method_calls {
        let body = enclosing_method_body(inputs.source_lines, call)?;
        replacements.insert("methods", label, body)?;
    }

    Ok(replacements)
}

fn markers_by_method(markers: &[Marker]) -> BTreeMap<&str, Vec<Marker>> {
    let mut by_method: BTreeMap<&str, Vec<Marker>> = BTreeMap::new();
    for marker in markers {
        by_method
            .entry(marker.location().method_name())
            .or_default()
            .push(marker.clone());
    }
    by_method
}

fn missing_template_document(
    inputs: &RenderInputs<'_>,
    replacements: &Namespace,
) -> TestdocResult<String> {
    let recorded_parts = replacements
        .labels()
        .map(|label| format!("* `{}`", label))
        .collect::<Vec<_>>()
        .join("\n");

    let mut known = Namespace::new();
    known.insert("fallback", "templateName", inputs.template_name)?;
    known.insert(
        "fallback",
        "templatePath",
        inputs.template_path.display().to_string(),
    )?;
    known.insert("fallback", "recordedParts", recorded_parts)?;

    Template::of(MISSING_TEMPLATE).render(&known)
}
