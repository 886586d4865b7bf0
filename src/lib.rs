//! Documentation captured from running tests.
//!
//! Tests record the source blocks they execute, together with method
//! bodies, other source files, resources and produced output, and render
//! everything through a markdown template that lives next to the test
//! source. Documentation written this way cannot drift: the snippets in
//! it are the lines the test actually ran.
//!
//! ## Overview
//!
//! A test opens a [`Recording`] naming its template, brackets the lines
//! worth showing with [`begin`](Recording::begin) and
//! [`end`](Recording::end), and finishes the session when it is done.
//! Every captured piece becomes a label, the template references labels
//! as `${label}` placeholders, and an unresolved placeholder fails the
//! test instead of producing a document with holes.
//!
//! ```ignore
//! let mut recording = recording!("howto.md")?;
//!
//! recording.begin(here!());
//! let answer = 6 * 7;
//! recording.end(here!());
//!
//! recording.set_output(here!(), "answer", answer.to_string());
//! recording.finish_and_write()?;
//! ```
//!
//! ## Modules
//!
//! - [`session`] - Recording sessions and the rendered result
//! - [`marker`] - Begin/end markers recorded during a test
//! - [`blocks`] - Pairing markers into captured code blocks
//! - [`template`] - Placeholder substitution
//! - [`namespace`] - The collision-checked label namespace
//! - [`sources`] - Source, resource and template loading
//! - [`filters`] - Text filters applied to included resources
//! - [`writer`] - Delivering rendered documents
//! - [`redirect`] - Routing rendered documents to an in-process delegate
//! - [`errors`] - Error types for capture and rendering

pub mod blocks;
pub mod errors;
pub mod filters;
pub mod indent;
pub mod location;
pub mod marker;
pub mod method_body;
pub mod namespace;
pub mod redirect;
mod render;
pub mod session;
pub mod sources;
pub mod template;
pub mod writer;

// Re-exports for convenient access to core types
pub use blocks::{CodeBlock, BLOCK_SEPARATOR};
pub use errors::{TestdocError, TestdocResult};
pub use filters::{line_prefix, TextFilter};
pub use location::Location;
pub use marker::Marker;
pub use namespace::Namespace;
pub use redirect::{redirect_output, RedirectGuard};
pub use session::{Recording, RecordingBuilder, RenderedDoc};
pub use sources::{Include, TabSize};
pub use template::{ReplacementPattern, Template};
pub use writer::{write_to_directory, DEST_DIR_ENV};
