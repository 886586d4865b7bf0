//! Locating and reading source files, resources and templates.
//!
//! Source references are resolved relative to the working directory, which
//! is the manifest directory when cargo runs the tests. A reference is
//! either a relative path (the shape `file!()` produces) or a bare name
//! tried as `<root>/<name>.rs` under the conventional roots `tests/` and
//! `src/`, with `::` mapping to a directory separator. Resources and
//! templates live next to the source file that anchors them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{TestdocError, TestdocResult};

const SOURCE_ROOTS: [&str; 2] = ["tests", "src"];

/// Width used when expanding tabs in loaded source lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSize {
    spaces: usize,
}

impl TabSize {
    pub fn spaces(spaces: usize) -> Self {
        Self { spaces }
    }

    pub fn as_spaces(&self) -> String {
        " ".repeat(self.spaces)
    }

    fn expand(&self, line: &str) -> String {
        line.replace('\t', &self.as_spaces())
    }
}

/// Options controlling what parts of an included source file are kept.
///
/// Options are applied in a fixed order (header, imports, trim) regardless
/// of their order in the argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Include {
    /// Drop the leading run of blank, comment and inner-attribute lines.
    WithoutHeader,
    /// Drop top-level `use` and `extern crate` lines.
    WithoutImports,
    /// Drop blank lines at both ends.
    Trim,
}

/// Resolve a source reference to an existing file.
pub fn find_source(name: &str) -> TestdocResult<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }

    let roots: Vec<PathBuf> = SOURCE_ROOTS
        .iter()
        .map(PathBuf::from)
        .filter(|root| root.is_dir())
        .collect();
    if roots.is_empty() {
        return Err(TestdocError::NoSourceRoots {
            working_dir: working_dir(),
        });
    }

    for root in &roots {
        let resolved = root.join(name);
        if resolved.is_file() {
            return Ok(resolved);
        }
        let as_module = root.join(name.replace("::", "/")).with_extension("rs");
        if as_module.is_file() {
            return Ok(as_module);
        }
    }

    Err(TestdocError::SourceNotFound {
        name: name.to_string(),
    })
}

/// Load a source file as lines, expanding tabs when a width is set.
pub fn load_source_lines(name: &str, tab_size: Option<TabSize>) -> TestdocResult<Vec<String>> {
    let path = find_source(name)?;
    let content = read_file(&path)?;
    Ok(content
        .lines()
        .map(|line| match tab_size {
            Some(tab_size) => tab_size.expand(line),
            None => line.to_string(),
        })
        .collect())
}

/// Apply include options, in fixed order, to loaded source lines.
pub fn apply_includes(lines: Vec<String>, options: &[Include]) -> Vec<String> {
    if options.is_empty() {
        return lines;
    }
    let mut lines = lines;
    if options.contains(&Include::WithoutHeader) {
        lines = strip_header(lines);
    }
    if options.contains(&Include::WithoutImports) {
        lines = strip_imports(lines);
    }
    if options.contains(&Include::Trim) {
        lines = trim_block(lines);
    }
    lines
}

fn strip_header(lines: Vec<String>) -> Vec<String> {
    let first_code = lines
        .iter()
        .position(|line| {
            let trimmed = line.trim();
            !(trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with("#!["))
        })
        .unwrap_or(lines.len());
    lines[first_code..].to_vec()
}

fn strip_imports(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !(line.starts_with("use ") || line.starts_with("extern crate ")))
        .collect()
}

fn trim_block(lines: Vec<String>) -> Vec<String> {
    let first = match lines.iter().position(|line| !line.trim().is_empty()) {
        Some(first) => first,
        None => return Vec::new(),
    };
    let last = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .unwrap_or(first);
    lines[first..=last].to_vec()
}

/// Read a resource located next to its anchoring source file.
pub fn load_resource(source_name: &str, resource_name: &str) -> TestdocResult<String> {
    let source_path = find_source(source_name)?;
    let path = sibling_path(&source_path, resource_name);
    if !path.is_file() {
        return Err(TestdocError::ResourceNotFound {
            name: resource_name.to_string(),
            anchor: source_path.display().to_string(),
        });
    }
    read_file(&path)
}

/// Path a template of the given name would have next to a source file.
pub fn template_path_for(source_name: &str, template_name: &str) -> TestdocResult<PathBuf> {
    let source_path = find_source(source_name)?;
    Ok(sibling_path(&source_path, template_name))
}

/// Read a template, `None` when it does not exist yet.
pub fn read_template(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(error) => {
            debug!(path = %path.display(), %error, "no template content");
            None
        }
    }
}

fn sibling_path(source_path: &Path, name: &str) -> PathBuf {
    source_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(name)
}

fn read_file(path: &Path) -> TestdocResult<String> {
    fs::read_to_string(path).map_err(|source| TestdocError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn working_dir() -> String {
    std::env::current_dir()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| ".".to_string())
}
