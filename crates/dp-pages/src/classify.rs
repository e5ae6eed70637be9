//! Split documents into API reference and general documentation.

use dp_content::Document;

/// Classifies documents by their directory.
#[derive(Debug, Clone)]
pub struct Classifier {
    reference_root: String,
}

/// Result of [`Classifier::partition`]. Input order is kept within each side.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    pub reference: Vec<&'a Document>,
    pub documentation: Vec<&'a Document>,
}

impl Classifier {
    #[must_use]
    pub fn new(reference_root: impl Into<String>) -> Self {
        Self {
            reference_root: reference_root.into(),
        }
    }

    /// True if the document's directory contains the reference root anywhere.
    ///
    /// This is substring containment, not a segment match: with root `src/api`,
    /// `src/api-guides` is also classified as reference.
    #[must_use]
    pub fn is_reference(&self, doc: &Document) -> bool {
        doc.relative_directory.contains(&self.reference_root)
    }

    /// Partition `docs` into reference and documentation subsets.
    #[must_use]
    pub fn partition<'a>(&self, docs: &'a [Document]) -> Partition<'a> {
        let (reference, documentation) = docs.iter().partition(|doc| self.is_reference(doc));
        Partition {
            reference,
            documentation,
        }
    }
}
