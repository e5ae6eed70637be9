//! Page-creation instructions handed to a [`PageSink`](crate::PageSink).
//!
//! A [`Page`] serializes to the host's page-creation argument shape:
//!
//! ```json
//! {
//!   "path": "/docs/guide/",
//!   "component": "/site/src/templates/Documentation.js",
//!   "context": { "locale": "en", "relativeDirectory": "src/docs", ... }
//! }
//! ```

use std::path::{Path, PathBuf};

use dp_content::NodeId;
use serde::Serialize;

/// Reference to an externally owned template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateRef(PathBuf);

impl TemplateRef {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// One page to materialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// URL path of the page.
    pub path: String,
    /// Wildcard pattern routing sub-paths to this page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_path: Option<String>,
    /// Template rendering the page.
    pub component: TemplateRef,
    /// Data passed to the template at render time.
    pub context: PageContext,
}

/// Template context. Serializes to a flat string-keyed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageContext {
    Documentation(DocumentationContext),
    Reference(ReferenceContext),
}

/// Context for a general documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationContext {
    pub locale: String,
    pub relative_directory: String,
    pub relative_path: String,
    pub root_dir: String,
}

/// Context for the API reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceContext {
    /// Content node ids of every reference document, in input order.
    pub ids: Vec<NodeId>,
    pub locale: String,
}

impl PageContext {
    #[must_use]
    pub fn locale(&self) -> &str {
        match self {
            Self::Documentation(ctx) => &ctx.locale,
            Self::Reference(ctx) => &ctx.locale,
        }
    }
}
