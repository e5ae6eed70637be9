//! Document records.
//!
//! A [`Document`] describes one discovered content file. Paths are relative to
//! the content source's base directory and always use `/` separators:
//! - `relative_path`: `"src/docs/guide.mdx"`
//! - `relative_directory`: `"src/docs"` (empty for top-level files)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of the content node backing a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata supplied alongside a document. Carried, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Sort order within navigation.
    pub order: Option<i64>,
    /// Display title.
    pub title: Option<String>,
}

/// One discovered content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Content node identifier. Absent when the host produced no child node
    /// for the file; only reference documents require one.
    #[serde(default)]
    pub id: Option<NodeId>,
    /// Path including filename and extension.
    pub relative_path: String,
    /// Directory part of `relative_path`.
    pub relative_directory: String,
    /// Externally supplied metadata.
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Create a document, deriving `relative_directory` from `relative_path`.
    #[must_use]
    pub fn new(id: NodeId, relative_path: impl Into<String>) -> Self {
        Self::with_optional_id(Some(id), relative_path.into())
    }

    /// Create a document with no content node identifier.
    #[must_use]
    pub fn without_id(relative_path: impl Into<String>) -> Self {
        Self::with_optional_id(None, relative_path.into())
    }

    fn with_optional_id(id: Option<NodeId>, relative_path: String) -> Self {
        let relative_directory = parent_dir(&relative_path).to_owned();
        Self {
            id,
            relative_path,
            relative_directory,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Attach metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Directory portion of a `/`-separated relative path.
fn parent_dir(relative_path: &str) -> &str {
    relative_path
        .rsplit_once('/')
        .map_or("", |(dir, _)| dir)
}
