//! Content records and discovery for docpages.
//!
//! This crate provides the [`Document`] record handed to the page planner and
//! a [`ContentSource`] trait abstracting where those records come from:
//!
//! - [`QueryResultSource`] parses the JSON result of the host's content query
//! - [`FsContentSource`] walks a directory on disk
//! - [`MockContentSource`] for testing (behind `mock` feature flag)
//!
//! [`ContentQuery`] describes which content nodes are requested and renders the
//! query fragment the host site generator executes.
//!
//! # Example
//!
//! ```ignore
//! use dp_content::{ContentQuery, ContentSource, FsContentSource};
//!
//! let source = FsContentSource::new("site", ContentQuery::docs());
//! for doc in source.documents()? {
//!     println!("{}", doc.relative_path);
//! }
//! ```

mod document;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod query;
mod query_result;
mod source;

pub use document::{Document, DocumentMetadata, NodeId};
pub use fs::FsContentSource;
#[cfg(feature = "mock")]
pub use mock::MockContentSource;
pub use query::ContentQuery;
pub use query_result::QueryResultSource;
pub use source::{ContentError, ContentSource};
