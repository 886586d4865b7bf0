//! Delivering rendered documents.

use std::env;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::errors::{TestdocError, TestdocResult};
use crate::redirect::current_redirect;
use crate::session::RenderedDoc;

/// Environment variable naming the directory rendered documents are
/// written to.
pub const DEST_DIR_ENV: &str = "TESTDOC_DEST_DIR";

/// Deliver one rendered document.
///
/// An installed redirect delegate takes precedence, then the destination
/// directory from the environment. With neither, the document is logged
/// and nothing is written, so ordinary test runs stay free of side
/// effects.
pub(crate) fn write_result(rendered: &RenderedDoc) -> TestdocResult<()> {
    deliver(rendered, env::var(DEST_DIR_ENV).ok().as_deref())
}

fn deliver(rendered: &RenderedDoc, destination: Option<&str>) -> TestdocResult<()> {
    if let Some(delegate) = current_redirect() {
        delegate(rendered);
        return Ok(());
    }
    match destination {
        Some(destination) => write_to_directory(Path::new(destination), rendered),
        None => {
            log_result(rendered);
            Ok(())
        }
    }
}

/// Write the document and every attached file below `destination`.
///
/// The destination itself must already exist and be a directory. Parent
/// directories of attached files are created as needed, existing files
/// are overwritten.
pub fn write_to_directory(destination: &Path, rendered: &RenderedDoc) -> TestdocResult<()> {
    if !destination.exists() {
        return Err(TestdocError::DestinationMissing {
            path: destination.display().to_string(),
        });
    }
    if !destination.is_dir() {
        return Err(TestdocError::DestinationNotADirectory {
            path: destination.display().to_string(),
        });
    }

    write_file(
        &destination.join(rendered.name()),
        rendered.document().as_bytes(),
    )?;
    for (name, content) in rendered.files() {
        write_file(&destination.join(name), content)?;
    }
    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> TestdocResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| TestdocError::Write {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }
    fs::write(path, content).map_err(|source| TestdocError::Write {
        path: path.display().to_string(),
        source,
    })
}

fn log_result(rendered: &RenderedDoc) {
    info!(env = DEST_DIR_ENV, "destination directory not set");
    info!(name = rendered.name(), "would write:\n{}", rendered.document());
    for (name, content) in rendered.files() {
        info!(file = name.as_str(), bytes = content.len(), "attached file");
    }
}
