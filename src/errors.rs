//! Error types for capture and rendering.
//!
//! Every failure is terminal for the render step. Broken marker protocols,
//! colliding labels and unresolved placeholders indicate a structurally
//! broken test, so nothing here is retried or papered over.

use thiserror::Error;

/// Errors that can occur while recording or rendering documentation.
#[derive(Debug, Error)]
pub enum TestdocError {
    /// A method recorded an odd number of begin/end markers.
    #[error("odd number of markers for {method}: {markers}")]
    UnevenMarkers { method: String, markers: String },

    /// Two begin markers without an end between them.
    #[error("start after start: {pending} - {next}")]
    StartAfterStart { pending: String, next: String },

    /// An end marker with no begin before it.
    #[error("end but no start: {marker}")]
    EndWithoutStart { marker: String },

    /// Markers of one recording must come from a single source file.
    #[error("markers cover more than one file: {files}")]
    MultipleSourceFiles { files: String },

    /// A label was inserted twice, from any source.
    #[error("{scope}: {label} already set to {previous}")]
    DuplicateLabel {
        scope: String,
        label: String,
        previous: String,
    },

    /// The same file name was attached twice.
    #[error("file {file_name} already attached")]
    DuplicateFile { file_name: String },

    /// A placeholder had no replacement under the strict policy.
    #[error("could not resolve {label} in [{known}]")]
    UnresolvedLabel { label: String, known: String },

    /// The replacement fallback declined to produce a value.
    #[error("fallback returned nothing for {label}")]
    FallbackFailed { label: String },

    /// No line containing the method name above the recorded call.
    #[error("could not find method declaration for {method}")]
    DeclarationNotFound { method: String },

    /// Neither end-of-body heuristic matched below the recorded call.
    #[error("could not find end of method declaration for {method}")]
    MethodEndNotFound { method: String },

    /// A recorded line number points past the end of the loaded source.
    #[error("line {line_number} is outside {file_name} ({line_count} lines)")]
    LineOutsideSource {
        file_name: String,
        line_number: usize,
        line_count: usize,
    },

    /// Neither `tests/` nor `src/` exists under the working directory.
    #[error("no source roots found under {working_dir}")]
    NoSourceRoots { working_dir: String },

    /// A source reference did not resolve to a file.
    #[error("could not find source for {name}")]
    SourceNotFound { name: String },

    /// A resource was not found next to its anchoring source file.
    #[error("could not find resource {name} near {anchor}")]
    ResourceNotFound { name: String, anchor: String },

    /// The destination directory does not exist.
    #[error("destination {path} does not exist")]
    DestinationMissing { path: String },

    /// The destination path exists but is not a directory.
    #[error("destination {path} is not a directory")]
    DestinationNotADirectory { path: String },

    /// Reading a source, resource or template failed.
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the rendered document or an attached file failed.
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for recording and rendering operations.
pub type TestdocResult<T> = Result<T, TestdocError>;
