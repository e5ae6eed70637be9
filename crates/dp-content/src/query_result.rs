//! Content source backed by the host's query result.
//!
//! The host executes [`ContentQuery::fragment`](crate::ContentQuery::fragment)
//! and hands back JSON shaped like:
//!
//! ```json
//! { "edges": [ { "node": {
//!     "childMdx": { "id": "..." },
//!     "relativePath": "src/docs/guide.mdx",
//!     "relativeDirectory": "src/docs",
//!     "fields": { "metadata": { "data": { "order": 1, "title": "Guide" } } }
//! } } ] }
//! ```

use serde::Deserialize;

use crate::document::{Document, DocumentMetadata, NodeId};
use crate::source::{ContentError, ContentSource};

#[derive(Debug, Deserialize)]
struct Connection {
    edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    node: Node,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Node {
    child_mdx: Option<ChildMdx>,
    relative_path: String,
    relative_directory: String,
    fields: Option<Fields>,
}

#[derive(Debug, Deserialize)]
struct ChildMdx {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Fields {
    metadata: Option<MetadataNode>,
}

#[derive(Debug, Deserialize)]
struct MetadataNode {
    data: Option<DocumentMetadata>,
}

impl Node {
    fn into_document(self) -> Document {
        let id = self.child_mdx.map(|c| NodeId::new(c.id));
        let metadata = self
            .fields
            .and_then(|f| f.metadata)
            .and_then(|m| m.data)
            .unwrap_or_default();
        Document {
            id,
            relative_path: self.relative_path,
            relative_directory: self.relative_directory,
            metadata,
        }
    }
}

/// Documents parsed from a query result, in edge order.
#[derive(Debug)]
pub struct QueryResultSource {
    json: String,
}

impl QueryResultSource {
    /// Wrap the JSON value of the query's alias (the object holding `edges`).
    #[must_use]
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl ContentSource for QueryResultSource {
    fn documents(&self) -> Result<Vec<Document>, ContentError> {
        let connection: Connection = serde_json::from_str(&self.json)?;
        let documents = connection
            .edges
            .into_iter()
            .map(|edge| edge.node.into_document())
            .collect::<Vec<_>>();
        tracing::debug!(count = documents.len(), "Parsed content query result");
        Ok(documents)
    }
}
