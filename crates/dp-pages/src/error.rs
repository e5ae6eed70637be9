//! Error types for page planning.

use dp_content::ContentError;

use crate::sink::SinkError;

/// Error aborting a page planning run.
///
/// Every variant is fatal for the build invocation; nothing is retried.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PlanError {
    /// A document path does not have the `<root>...<.ext>` shape.
    #[error("Malformed content path: {path}")]
    MalformedPath {
        /// Relative path of the offending document.
        path: String,
    },

    /// The content root cannot be compiled into a route pattern.
    #[error("Invalid content root {root:?}: {source}")]
    InvalidContentRoot {
        /// Configured content root.
        root: String,
        #[source]
        source: regex::Error,
    },

    /// An API reference document has no content node id to list.
    #[error("Reference document has no content node id: {path}")]
    MissingNodeId {
        /// Relative path of the offending document.
        path: String,
    },

    /// The page sink rejected a page.
    #[error("Page registration rejected: {0}")]
    Registration(#[from] SinkError),

    /// Documents could not be obtained from the content source.
    #[error("Content discovery failed: {0}")]
    Content(#[from] ContentError),
}
