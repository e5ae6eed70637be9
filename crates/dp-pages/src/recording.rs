//! Recording page sink for testing.
//!
//! Provides [`RecordingSink`], which keeps every accepted page in memory.

use crate::page::Page;
use crate::sink::{PageSink, SinkError, SinkErrorKind};

/// Page sink that records instead of registering.
///
/// # Example
///
/// ```ignore
/// use dp_pages::{PagePlanner, RecordingSink};
///
/// let mut sink = RecordingSink::new();
/// planner.plan(&docs, &mut sink)?;
/// assert_eq!(sink.pages().len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    pages: Vec<Page>,
    reject: Option<(String, SinkErrorKind)>,
}

impl RecordingSink {
    /// Create a sink accepting every page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the page registered at `path` with the given kind.
    #[must_use]
    pub fn rejecting(mut self, path: impl Into<String>, kind: SinkErrorKind) -> Self {
        self.reject = Some((path.into(), kind));
        self
    }

    /// Pages accepted so far, in registration order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Consume the sink and return the accepted pages.
    #[must_use]
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

impl PageSink for RecordingSink {
    fn create_page(&mut self, page: Page) -> Result<(), SinkError> {
        if let Some((path, kind)) = &self.reject
            && *path == page.path
        {
            return Err(SinkError::new(*kind).with_path(page.path));
        }
        self.pages.push(page);
        Ok(())
    }
}
