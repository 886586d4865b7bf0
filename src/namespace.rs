//! The flat label namespace used to resolve template placeholders.

use std::collections::BTreeMap;

use crate::blocks::{CodeBlock, BLOCK_SEPARATOR};
use crate::errors::{TestdocError, TestdocResult};

/// A collision-checked label→text map, built fresh for every render.
///
/// Inserting a label twice is a fatal configuration error, never a silent
/// overwrite, whichever sources the two insertions came from.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: BTreeMap<String, String>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one label, failing on collision.
    ///
    /// `scope` names the kind of content being added (blocks, classes,
    /// resources, output, methods) and only appears in the error message.
    pub fn insert(
        &mut self,
        scope: &str,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> TestdocResult<()> {
        let label = label.into();
        if let Some(previous) = self.entries.get(&label) {
            return Err(TestdocError::DuplicateLabel {
                scope: scope.to_string(),
                label,
                previous: previous.clone(),
            });
        }
        self.entries.insert(label, value.into());
        Ok(())
    }

    /// Add one method's blocks: the joined text under the method name, each
    /// block's own text under `method.N` (1-based), and under
    /// `method.<label>` as well when the block is labeled.
    pub fn insert_method_blocks(
        &mut self,
        method: &str,
        blocks: &[CodeBlock],
    ) -> TestdocResult<()> {
        self.insert("blocks", method, joined_content(blocks))?;
        for (index, block) in blocks.iter().enumerate() {
            self.insert("blocks", format!("{}.{}", method, index + 1), &block.content)?;
            if let Some(label) = &block.label {
                self.insert("blocks", format!("{}.{}", method, label), &block.content)?;
            }
        }
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn joined_content(blocks: &[CodeBlock]) -> String {
    blocks
        .iter()
        .map(|block| block.content.as_str())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(content: &str, label: Option<&str>) -> CodeBlock {
        CodeBlock {
            content: content.to_string(),
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut namespace = Namespace::new();
        namespace.insert("output", "label", "text").unwrap();
        assert_eq!(namespace.get("label"), Some("text"));
        assert_eq!(namespace.get("missing"), None);
    }

    #[test]
    fn test_duplicate_label_fails_with_prior_value() {
        let mut namespace = Namespace::new();
        namespace.insert("classes", "label", "first").unwrap();
        let error = namespace.insert("resources", "label", "second").unwrap_err();
        assert_eq!(
            error.to_string(),
            "resources: label already set to first"
        );
        // prior value stays in place
        assert_eq!(namespace.get("label"), Some("first"));
    }

    #[test]
    fn test_method_blocks_produce_method_ordinal_and_label_keys() {
        let mut namespace = Namespace::new();
        namespace
            .insert_method_blocks(
                "m",
                &[block("first block", None), block("second block", Some("named"))],
            )
            .unwrap();

        assert_eq!(namespace.get("m"), Some("first block\n...\n\nsecond block"));
        assert_eq!(namespace.get("m.1"), Some("first block"));
        assert_eq!(namespace.get("m.2"), Some("second block"));
        assert_eq!(namespace.get("m.named"), Some("second block"));
        assert_eq!(namespace.len(), 4);
    }

    #[test]
    fn test_block_label_colliding_with_ordinal_fails() {
        let mut namespace = Namespace::new();
        let error = namespace
            .insert_method_blocks(
                "m",
                &[block("first", Some("2")), block("second", None)],
            )
            .unwrap_err();
        assert!(matches!(error, TestdocError::DuplicateLabel { .. }));
    }

    #[test]
    fn test_collisions_fail_in_either_insertion_order() {
        let mut first_blocks = Namespace::new();
        first_blocks
            .insert_method_blocks("m", &[block("text", None)])
            .unwrap();
        assert!(first_blocks.insert("output", "m.1", "other").is_err());

        let mut first_output = Namespace::new();
        first_output.insert("output", "m.1", "other").unwrap();
        assert!(first_output
            .insert_method_blocks("m", &[block("text", None)])
            .is_err());
    }

    #[test]
    fn test_labels_are_sorted() {
        let mut namespace = Namespace::new();
        namespace.insert("output", "b", "2").unwrap();
        namespace.insert("output", "a", "1").unwrap();
        let labels: Vec<&str> = namespace.labels().collect();
        assert_eq!(labels, vec!["a", "b"]);
    }
}
