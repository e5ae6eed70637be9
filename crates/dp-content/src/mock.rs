//! Mock content source for testing.
//!
//! Provides [`MockContentSource`] for unit testing without filesystem access.

use crate::document::{Document, DocumentMetadata, NodeId};
use crate::source::{ContentError, ContentSource};

/// In-memory content source.
///
/// Documents are returned in insertion order.
///
/// # Example
///
/// ```ignore
/// use dp_content::{ContentSource, MockContentSource};
///
/// let source = MockContentSource::new()
///     .with_document("doc-1", "src/docs/index.mdx")
///     .with_document("api-1", "src/api/button.mdx");
///
/// let docs = source.documents().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockContentSource {
    documents: Vec<Document>,
}

impl MockContentSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document; the directory is derived from the path.
    #[must_use]
    pub fn with_document(mut self, id: &str, relative_path: &str) -> Self {
        self.documents
            .push(Document::new(NodeId::new(id), relative_path));
        self
    }

    /// Add a document with metadata.
    #[must_use]
    pub fn with_titled_document(
        mut self,
        id: &str,
        relative_path: &str,
        order: i64,
        title: &str,
    ) -> Self {
        let metadata = DocumentMetadata {
            order: Some(order),
            title: Some(title.to_owned()),
        };
        self.documents
            .push(Document::new(NodeId::new(id), relative_path).with_metadata(metadata));
        self
    }
}

impl ContentSource for MockContentSource {
    fn documents(&self) -> Result<Vec<Document>, ContentError> {
        Ok(self.documents.clone())
    }
}
