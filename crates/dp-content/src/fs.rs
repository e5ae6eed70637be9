//! Filesystem content source.
//!
//! Walks a base directory and yields a [`Document`] for every file matching
//! the query's extension. Relative paths use `/` on every platform so that
//! routes derived from them are stable. Symbolic links are not followed.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::document::{Document, NodeId};
use crate::query::ContentQuery;
use crate::source::{ContentError, ContentSource};

/// Discovers documents by walking the filesystem.
#[derive(Debug)]
pub struct FsContentSource {
    base_dir: PathBuf,
    query: ContentQuery,
    scan_dirs: Vec<PathBuf>,
}

impl FsContentSource {
    /// Create a source rooted at `base_dir`.
    ///
    /// Document paths are relative to `base_dir`. The whole tree is walked
    /// unless narrowed with [`with_scan_dirs`](Self::with_scan_dirs).
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, query: ContentQuery) -> Self {
        Self {
            base_dir: base_dir.into(),
            query,
            scan_dirs: Vec::new(),
        }
    }

    /// Restrict walking to these directories (relative to the base directory).
    #[must_use]
    pub fn with_scan_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.scan_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    fn scan_directory(&self, dir: &Path, out: &mut Vec<Document>) -> Result<(), ContentError> {
        let entries = fs::read_dir(dir).map_err(|e| ContentError::io(e, dir))?;

        for entry in entries {
            let entry = entry.map_err(|e| ContentError::io(e, dir))?;
            let name = entry.file_name();
            // Skip hidden files/dirs
            if name.to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| ContentError::io(e, &path))?;
            if file_type.is_dir() {
                self.scan_directory(&path, out)?;
            } else if file_type.is_file() && self.query.matches_file(&path) {
                let relative_path = self.relative_path(&path)?;
                tracing::debug!(path = %relative_path, "Discovered content file");
                out.push(Document::new(node_id_for(&relative_path), relative_path));
            } else if file_type.is_symlink() {
                // Symlinks are not followed
                tracing::debug!(path = %path.display(), "Skipping symlink");
            }
        }

        Ok(())
    }

    /// Path of `path` relative to the base directory, `/`-separated.
    fn relative_path(&self, path: &Path) -> Result<String, ContentError> {
        let rel = path
            .strip_prefix(&self.base_dir)
            .map_err(|_| ContentError::InvalidPath(path.to_path_buf()))?;
        let segments = rel
            .components()
            .map(|c| {
                c.as_os_str()
                    .to_str()
                    .ok_or_else(|| ContentError::InvalidPath(path.to_path_buf()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(segments.join("/"))
    }
}

impl ContentSource for FsContentSource {
    fn documents(&self) -> Result<Vec<Document>, ContentError> {
        let mut documents = Vec::new();
        if self.scan_dirs.is_empty() {
            if self.base_dir.exists() {
                self.scan_directory(&self.base_dir, &mut documents)?;
            }
        } else {
            for dir in &self.scan_dirs {
                let dir = self.base_dir.join(dir);
                if dir.exists() {
                    self.scan_directory(&dir, &mut documents)?;
                }
            }
        }

        // read_dir order is platform dependent
        documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        documents.dedup_by(|a, b| a.relative_path == b.relative_path);

        tracing::debug!(
            base_dir = %self.base_dir.display(),
            count = documents.len(),
            "Scanned content directory"
        );
        Ok(documents)
    }
}

/// Stable node id: SHA-256 of the relative path.
fn node_id_for(relative_path: &str) -> NodeId {
    let mut hasher = Sha256::new();
    hasher.update(relative_path.as_bytes());
    NodeId::new(hex::encode(hasher.finalize()))
}
