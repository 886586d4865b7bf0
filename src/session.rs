//! Recording sessions.
//!
//! A [`Recording`] collects everything one test contributes to a document:
//! begin/end marked source blocks, whole method bodies, other source
//! files, resources, free-form output and attached files. Finishing the
//! session merges all of it into a label namespace and renders the
//! template that sits next to the test source.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{TestdocError, TestdocResult};
use crate::filters::TextFilter;
use crate::location::Location;
use crate::marker::Marker;
use crate::render::{render_document, FallbackFn, RenderInputs};
use crate::sources::{
    apply_includes, load_resource, load_source_lines, template_path_for, Include, TabSize,
};
use crate::template::ReplacementPattern;
use crate::writer::write_result;

/// An in-progress documentation recording for one test source file.
///
/// Created through [`Recording::of`] or the [`recording!`](crate::recording)
/// macro. Capture calls take a [`Location`], usually produced with
/// [`here!`](crate::here) at the call site.
pub struct Recording {
    template_name: String,
    template_path: PathBuf,
    pattern: ReplacementPattern,
    render_to: Option<String>,
    tab_size: Option<TabSize>,
    source_name: String,
    source_lines: Vec<String>,
    markers: Vec<Marker>,
    method_calls: Vec<(String, Location)>,
    classes: Vec<(String, String)>,
    resources: Vec<(String, String)>,
    output: Vec<(String, String)>,
    files: BTreeMap<String, Vec<u8>>,
    fallback: Option<Box<FallbackFn>>,
}

impl Recording {
    /// Start configuring a recording that renders `template_name`.
    pub fn of(template_name: impl Into<String>) -> RecordingBuilder {
        RecordingBuilder {
            template_name: template_name.into(),
            pattern: ReplacementPattern::Default,
            tab_size: None,
            render_to: None,
            fallback: None,
            class_sources: Vec::new(),
            resource_seeds: Vec::new(),
        }
    }

    /// Open an unlabeled block. The lines between this call and the
    /// matching [`end`](Recording::end) become the block's content.
    pub fn begin(&mut self, location: Location) {
        self.markers.push(Marker::start(location));
    }

    /// Open a block that is also addressable as `method.label`.
    pub fn begin_labeled(&mut self, location: Location, label: impl Into<String>) {
        self.markers.push(Marker::start_labeled(location, label));
    }

    /// Close the currently open block.
    pub fn end(&mut self, location: Location) {
        self.markers.push(Marker::end(location));
    }

    /// Record the enclosing method's body under `method.label`.
    ///
    /// The body is located with line heuristics when the session
    /// finishes; unconventional brace placement can defeat them.
    pub fn include_method(&mut self, location: Location, label: &str) {
        let scoped = scoped_label(&location, label);
        self.method_calls.push((scoped, location));
    }

    /// Record another source file's content under `method.label`.
    pub fn include_class_source(
        &mut self,
        location: Location,
        label: &str,
        source_name: &str,
        options: &[Include],
    ) -> TestdocResult<()> {
        let content = self.load_class_source(source_name, options)?;
        self.classes.push((scoped_label(&location, label), content));
        Ok(())
    }

    /// Record a resource next to this test's source file under
    /// `method.label`, with the filters applied left to right.
    pub fn include_resource(
        &mut self,
        location: Location,
        label: &str,
        resource_name: &str,
        filters: &[TextFilter],
    ) -> TestdocResult<()> {
        let content = self.load_filtered_resource(resource_name, filters)?;
        self.resources.push((scoped_label(&location, label), content));
        Ok(())
    }

    /// Record free-form text under `method.label`.
    pub fn set_output(&mut self, location: Location, label: &str, content: impl Into<String>) {
        self.output
            .push((scoped_label(&location, label), content.into()));
    }

    /// Attach a file to the rendered document.
    ///
    /// The file is written next to the document on delivery; the template
    /// sees the file name under `method.label`.
    pub fn attach_file(
        &mut self,
        location: Location,
        label: &str,
        file_name: &str,
        content: impl Into<Vec<u8>>,
    ) -> TestdocResult<()> {
        if self.files.contains_key(file_name) {
            return Err(TestdocError::DuplicateFile {
                file_name: file_name.to_string(),
            });
        }
        self.output
            .push((scoped_label(&location, label), file_name.to_string()));
        self.files.insert(file_name.to_string(), content.into());
        Ok(())
    }

    /// Render the recording into a document.
    pub fn finish(self) -> TestdocResult<RenderedDoc> {
        let document = render_document(&RenderInputs {
            template_name: &self.template_name,
            template_path: &self.template_path,
            pattern: self.pattern,
            source_lines: &self.source_lines,
            markers: &self.markers,
            method_calls: &self.method_calls,
            classes: &self.classes,
            resources: &self.resources,
            output: &self.output,
            fallback: self.fallback.as_deref(),
        })?;

        let name = self.render_to.unwrap_or(self.template_name);
        Ok(RenderedDoc::new(name, document, self.files))
    }

    /// Render the recording and deliver it: to the active redirect
    /// delegate if one is installed, to the directory named by
    /// [`DEST_DIR_ENV`](crate::writer::DEST_DIR_ENV) if set, otherwise to
    /// the log.
    pub fn finish_and_write(self) -> TestdocResult<RenderedDoc> {
        let rendered = self.finish()?;
        write_result(&rendered)?;
        Ok(rendered)
    }

    fn load_class_source(&self, source_name: &str, options: &[Include]) -> TestdocResult<String> {
        let lines = load_source_lines(source_name, self.tab_size)?;
        Ok(apply_includes(lines, options).join("\n"))
    }

    fn load_filtered_resource(
        &self,
        resource_name: &str,
        filters: &[TextFilter],
    ) -> TestdocResult<String> {
        let content = load_resource(&self.source_name, resource_name)?;
        Ok(TextFilter::apply_all(filters, content))
    }
}

impl std::fmt::Debug for Recording {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recording")
            .field("template_name", &self.template_name)
            .field("source_name", &self.source_name)
            .field("markers", &self.markers)
            .finish()
    }
}

/// Configuration collected before the test source is loaded.
///
/// Labels set here are kept verbatim, they are not scoped by a method
/// name the way capture calls on [`Recording`] scope theirs.
pub struct RecordingBuilder {
    template_name: String,
    pattern: ReplacementPattern,
    tab_size: Option<TabSize>,
    render_to: Option<String>,
    fallback: Option<Box<FallbackFn>>,
    class_sources: Vec<(String, String, Vec<Include>)>,
    resource_seeds: Vec<(String, String, Vec<TextFilter>)>,
}

impl RecordingBuilder {
    /// Use `{{label}}` placeholders instead of `${label}`.
    pub fn with_pattern(mut self, pattern: ReplacementPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Expand tabs in loaded sources to this many spaces.
    pub fn with_tab_size(mut self, tab_size: TabSize) -> Self {
        self.tab_size = Some(tab_size);
        self
    }

    /// Deliver the document under this name instead of the template name.
    pub fn render_to(mut self, name: impl Into<String>) -> Self {
        self.render_to = Some(name.into());
        self
    }

    /// Resolve labels the namespace does not know.
    ///
    /// The fallback receives the label and the known labels; returning
    /// `None` fails the render.
    pub fn replacement_fallback(
        mut self,
        fallback: impl Fn(&str, &[String]) -> Option<String> + 'static,
    ) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Record another source file's content under `label`.
    pub fn class_source(
        mut self,
        label: impl Into<String>,
        source_name: impl Into<String>,
        options: &[Include],
    ) -> Self {
        self.class_sources
            .push((label.into(), source_name.into(), options.to_vec()));
        self
    }

    /// Record a resource next to the test source under `label`.
    pub fn resource(
        mut self,
        label: impl Into<String>,
        resource_name: impl Into<String>,
        filters: Vec<TextFilter>,
    ) -> Self {
        self.resource_seeds
            .push((label.into(), resource_name.into(), filters));
        self
    }

    /// Load the test source and start the recording.
    ///
    /// `source_name` is usually `file!()`, handed in by the
    /// [`recording!`](crate::recording) macro.
    pub fn build(self, source_name: &str) -> TestdocResult<Recording> {
        let source_lines = load_source_lines(source_name, self.tab_size)?;
        let template_path = template_path_for(source_name, &self.template_name)?;

        let mut recording = Recording {
            template_name: self.template_name,
            template_path,
            pattern: self.pattern,
            render_to: self.render_to,
            tab_size: self.tab_size,
            source_name: source_name.to_string(),
            source_lines,
            markers: Vec::new(),
            method_calls: Vec::new(),
            classes: Vec::new(),
            resources: Vec::new(),
            output: Vec::new(),
            files: BTreeMap::new(),
            fallback: self.fallback,
        };
        for (label, name, options) in self.class_sources {
            let content = recording.load_class_source(&name, &options)?;
            recording.classes.push((label, content));
        }
        for (label, name, filters) in self.resource_seeds {
            let content = recording.load_filtered_resource(&name, &filters)?;
            recording.resources.push((label, content));
        }
        Ok(recording)
    }
}

/// A rendered document plus the files attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDoc {
    name: String,
    document: String,
    files: BTreeMap<String, Vec<u8>>,
}

impl RenderedDoc {
    pub(crate) fn new(name: String, document: String, files: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            name,
            document,
            files,
        }
    }

    /// Name the document is delivered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rendered document text.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Attached files, keyed by file name.
    pub fn files(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.files
    }
}

fn scoped_label(location: &Location, label: &str) -> String {
    format!("{}.{}", location.method_name(), label)
}

/// Builds a [`Recording`] for the current source file.
///
/// # Example
///
/// ```ignore
/// let mut recording = recording!("howto.md")?;
/// recording.begin(here!());
/// let sum = 1 + 2;
/// recording.end(here!());
/// recording.finish_and_write()?;
/// ```
#[macro_export]
macro_rules! recording {
    ($template:expr) => {
        $crate::Recording::of($template).build(file!())
    };
}
