//! Documentation page planning for docpages.
//!
//! This crate turns discovered content documents into page-creation
//! instructions for a static site generator:
//!
//! - [`PathNormalizer`]: derives a route from a content file path
//! - [`Classifier`]: splits documents into API reference and documentation
//! - [`PagePlanner`]: emits one [`Page`] per documentation document and a
//!   single wildcard-routed page for all API reference documents
//! - [`PageSink`]: the registration capability pages are handed to
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dp_config::Config;
//! use dp_content::{ContentQuery, FsContentSource};
//! use dp_pages::{JsonLinesSink, PagePlanner, PlannerSettings};
//!
//! let config = Config::load(None, None)?;
//! let query = ContentQuery::new(&config.content.source_name, &config.content.extension);
//! let source = FsContentSource::new(&config.project_dir, query).with_scan_dirs(["src"]);
//!
//! let planner = PagePlanner::new(PlannerSettings::from(&config))?;
//! let mut sink = JsonLinesSink::new(std::io::stdout().lock());
//! planner.plan_source(&source, &mut sink)?;
//! # Ok(())
//! # }
//! ```

mod classify;
mod error;
mod page;
mod planner;
#[cfg(any(test, feature = "mock"))]
mod recording;
mod route;
mod sink;

pub use classify::{Classifier, Partition};
pub use error::PlanError;
pub use page::{DocumentationContext, Page, PageContext, ReferenceContext, TemplateRef};
pub use planner::{PagePlanner, PlanSummary, PlannerSettings};
#[cfg(any(test, feature = "mock"))]
pub use recording::RecordingSink;
pub use route::{PathNormalizer, normalize_route};
pub use sink::{JsonLinesSink, PageSink, SinkError, SinkErrorKind};
