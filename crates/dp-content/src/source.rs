//! Content source trait and error types.

use std::path::PathBuf;

use crate::document::Document;

/// Supplier of document records for one build.
pub trait ContentSource {
    /// Return every document matching the source's query.
    ///
    /// Order is stable for identical inputs.
    fn documents(&self) -> Result<Vec<Document>, ContentError>;
}

/// Content discovery error.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// I/O error while walking or reading content.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Query result JSON could not be parsed.
    #[error("Query result parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Path is not valid UTF-8 or escapes the base directory.
    #[error("Invalid content path: {}", .0.display())]
    InvalidPath(PathBuf),
}

impl ContentError {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
