//! Route derivation from content file paths.
//!
//! A route is computed in two steps:
//! 1. [`PathNormalizer::raw_route`] drops every `index` substring and captures
//!    what lies between the content root and the extension
//!    (`src/docs/guide.mdx` with root `src` -> `/docs/guide`).
//! 2. [`normalize_route`] collapses slashes and wraps the route in exactly one
//!    leading and one trailing `/` (`/docs/guide/`).
//!
//! The `index` removal is a plain substring replacement, so a file named
//! `reindex.mdx` is routed as if it were `re.mdx`.

use regex::{Regex, RegexBuilder};

use crate::error::PlanError;

/// Compiled size cap for the route pattern.
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Derives routes from relative content paths.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    pattern: Regex,
}

impl PathNormalizer {
    /// Create a normalizer for paths starting with `content_root`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidContentRoot`] if the root is too long to
    /// compile within the regex size limit.
    pub fn new(content_root: &str) -> Result<Self, PlanError> {
        let pattern = format!(r"^{}(.*)\..*$", regex::escape(content_root));
        let pattern = RegexBuilder::new(&pattern)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|source| PlanError::InvalidContentRoot {
                root: content_root.to_owned(),
                source,
            })?;
        Ok(Self { pattern })
    }

    /// Captured route segment before normalization.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::MalformedPath`] if the path does not start with the
    /// content root or has no extension.
    pub fn raw_route(&self, relative_path: &str) -> Result<String, PlanError> {
        let stripped = relative_path.replace("index", "");
        let captures = self
            .pattern
            .captures(&stripped)
            .ok_or_else(|| PlanError::MalformedPath {
                path: relative_path.to_owned(),
            })?;
        Ok(captures
            .get(1)
            .map_or_else(String::new, |m| m.as_str().to_owned()))
    }

    /// Normalized route for a relative content path.
    pub fn route_for(&self, relative_path: &str) -> Result<String, PlanError> {
        self.raw_route(relative_path).map(|raw| normalize_route(&raw))
    }
}

/// Collapse repeated slashes and ensure a single leading and trailing slash.
///
/// ```
/// use dp_pages::normalize_route;
///
/// assert_eq!(normalize_route(""), "/");
/// assert_eq!(normalize_route("/guide"), "/guide/");
/// assert_eq!(normalize_route("docs//api/"), "/docs/api/");
/// ```
#[must_use]
pub fn normalize_route(raw: &str) -> String {
    let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}/", segments.join("/"))
    }
}
