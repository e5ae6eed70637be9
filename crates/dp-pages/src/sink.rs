//! Page registration capability.
//!
//! The planner never materializes pages itself. It hands each [`Page`] to a
//! [`PageSink`], which either accepts it or rejects it with a [`SinkError`].
//! Rejections abort the run.

use std::collections::HashSet;
use std::io::Write;

use crate::page::Page;

/// Receiver of page-creation instructions.
pub trait PageSink {
    /// Register one page.
    fn create_page(&mut self, page: Page) -> Result<(), SinkError>;
}

impl<S: PageSink + ?Sized> PageSink for &mut S {
    fn create_page(&mut self, page: Page) -> Result<(), SinkError> {
        (**self).create_page(page)
    }
}

/// Semantic rejection categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SinkErrorKind {
    /// A page with the same path was already registered.
    DuplicatePath,
    /// Template reference cannot be resolved by the host.
    InvalidTemplate,
    /// Writing the page failed.
    Io,
    /// Other/unknown rejection.
    Other,
}

/// Page registration error with semantic kind and optional source.
#[derive(Debug)]
pub struct SinkError {
    /// Semantic error category.
    pub kind: SinkErrorKind,
    /// Path of the rejected page (if applicable).
    pub path: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SinkError {
    /// Create a new sink error.
    #[must_use]
    pub fn new(kind: SinkErrorKind) -> Self {
        Self {
            kind,
            path: None,
            source: None,
        }
    }

    /// Attach the rejected page path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a duplicate path error.
    #[must_use]
    pub fn duplicate_path(path: impl Into<String>) -> Self {
        Self::new(SinkErrorKind::DuplicatePath).with_path(path)
    }
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "Kind: message (path: /docs/guide/)"
        let kind_str = match self.kind {
            SinkErrorKind::DuplicatePath => "Duplicate path",
            SinkErrorKind::InvalidTemplate => "Invalid template",
            SinkErrorKind::Io => "I/O error",
            SinkErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {path})")?;
        }

        Ok(())
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Writes every page as one JSON object per line.
///
/// Enforces the host's registration rules: page paths must be unique and
/// template references must be absolute.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    seen: HashSet<String>,
}

impl<W: Write> JsonLinesSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            seen: HashSet::new(),
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W, SinkError> {
        self.writer
            .flush()
            .map_err(|e| SinkError::new(SinkErrorKind::Io).with_source(e))?;
        Ok(self.writer)
    }
}

impl<W: Write> PageSink for JsonLinesSink<W> {
    fn create_page(&mut self, page: Page) -> Result<(), SinkError> {
        if !page.component.path().is_absolute() {
            return Err(SinkError::new(SinkErrorKind::InvalidTemplate).with_path(page.path));
        }
        if self.seen.contains(&page.path) {
            return Err(SinkError::duplicate_path(page.path));
        }

        let io_error = |e: std::io::Error, path: &str| {
            SinkError::new(SinkErrorKind::Io)
                .with_path(path)
                .with_source(e)
        };
        serde_json::to_writer(&mut self.writer, &page).map_err(|e| io_error(e.into(), &page.path))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| io_error(e, &page.path))?;

        self.seen.insert(page.path);
        Ok(())
    }
}
