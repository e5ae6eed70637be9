//! Page planning: turn documents into page-creation instructions.
//!
//! Documents are split by [`Classifier`]. Every documentation document gets
//! its own page, routed by [`PathNormalizer`] unless it sits directly in the
//! docs root. All API reference documents share one wildcard-routed page whose
//! context lists their node ids.

use std::collections::HashSet;

use dp_config::Config;
use dp_content::{ContentSource, Document};

use crate::classify::Classifier;
use crate::error::PlanError;
use crate::page::{DocumentationContext, Page, PageContext, ReferenceContext, TemplateRef};
use crate::route::PathNormalizer;
use crate::sink::PageSink;

/// Everything the planner needs to know about the site layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerSettings {
    /// Prefix stripped from relative paths when building routes.
    pub content_root: String,
    /// Directory whose documents are served at `docs_index_path`.
    pub docs_root: String,
    /// URL path for documents directly inside `docs_root`.
    pub docs_index_path: String,
    /// Template for documentation pages.
    pub docs_template: TemplateRef,
    /// Substring marking reference directories.
    pub reference_root: String,
    /// URL path of the reference page.
    pub reference_path: String,
    /// Template for the reference page.
    pub reference_template: TemplateRef,
    /// Locale attached to every page.
    pub default_locale: String,
}

impl PlannerSettings {
    /// Wildcard match path of the reference page.
    #[must_use]
    pub fn reference_match_path(&self) -> String {
        format!("{}/*", self.reference_path)
    }
}

impl From<&Config> for PlannerSettings {
    fn from(config: &Config) -> Self {
        Self {
            content_root: config.content.root.clone(),
            docs_root: config.docs_resolved.root.clone(),
            docs_index_path: config.docs_resolved.index_path.clone(),
            docs_template: TemplateRef::new(&config.docs_resolved.template),
            reference_root: config.reference_resolved.root.clone(),
            reference_path: config.reference_resolved.path.clone(),
            reference_template: TemplateRef::new(&config.reference_resolved.template),
            default_locale: config.i18n.default_locale.clone(),
        }
    }
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSummary {
    /// Number of documentation pages registered.
    pub documentation_pages: usize,
    /// Number of ids carried by the reference page.
    pub reference_documents: usize,
}

/// Builds and registers documentation pages.
#[derive(Debug, Clone)]
pub struct PagePlanner {
    settings: PlannerSettings,
    normalizer: PathNormalizer,
    classifier: Classifier,
}

impl PagePlanner {
    /// Create a planner for the given site layout.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidContentRoot`] if the content root cannot be
    /// compiled into a route pattern.
    pub fn new(settings: PlannerSettings) -> Result<Self, PlanError> {
        let normalizer = PathNormalizer::new(&settings.content_root)?;
        let classifier = Classifier::new(settings.reference_root.clone());
        Ok(Self {
            settings,
            normalizer,
            classifier,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Compute the pages for `docs` without registering them.
    ///
    /// Documentation pages come first, in input order, followed by exactly one
    /// reference page.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::MalformedPath`] for the first documentation
    /// document whose path cannot be routed, and [`PlanError::MissingNodeId`]
    /// for the first reference document without a content node id.
    pub fn pages(&self, docs: &[Document]) -> Result<Vec<Page>, PlanError> {
        let partition = self.classifier.partition(docs);

        let mut pages = Vec::with_capacity(partition.documentation.len() + 1);
        let mut seen = HashSet::new();
        for doc in partition.documentation {
            let page = self.documentation_page(doc)?;
            if !seen.insert(page.path.clone()) {
                tracing::warn!(
                    path = %page.path,
                    document = %doc.relative_path,
                    "Two documentation pages share a path"
                );
            }
            pages.push(page);
        }
        pages.push(self.reference_page(&partition.reference)?);

        Ok(pages)
    }

    /// Compute the pages for `docs` and register them with `sink`.
    ///
    /// All routes are computed before the first page is registered, so a
    /// malformed path never leaves a partially registered site. A sink
    /// rejection stops the run immediately.
    pub fn plan<S: PageSink + ?Sized>(
        &self,
        docs: &[Document],
        sink: &mut S,
    ) -> Result<PlanSummary, PlanError> {
        let pages = self.pages(docs)?;
        let summary = summarize(&pages);

        for page in pages {
            tracing::debug!(
                path = %page.path,
                component = %page.component.path().display(),
                "Registering page"
            );
            sink.create_page(page)?;
        }

        tracing::info!(
            documentation = summary.documentation_pages,
            reference = summary.reference_documents,
            "Registered documentation pages"
        );
        Ok(summary)
    }

    /// Fetch documents from `source`, then [`plan`](Self::plan) them.
    pub fn plan_source<C, S>(&self, source: &C, sink: &mut S) -> Result<PlanSummary, PlanError>
    where
        C: ContentSource + ?Sized,
        S: PageSink + ?Sized,
    {
        let docs = source.documents()?;
        self.plan(&docs, sink)
    }

    fn documentation_page(&self, doc: &Document) -> Result<Page, PlanError> {
        let path = if doc.relative_directory == self.settings.docs_root {
            self.settings.docs_index_path.clone()
        } else {
            self.normalizer.route_for(&doc.relative_path)?
        };

        Ok(Page {
            path,
            match_path: None,
            component: self.settings.docs_template.clone(),
            context: PageContext::Documentation(DocumentationContext {
                locale: self.settings.default_locale.clone(),
                relative_directory: doc.relative_directory.clone(),
                relative_path: doc.relative_path.clone(),
                root_dir: self.settings.docs_root.clone(),
            }),
        })
    }

    fn reference_page(&self, docs: &[&Document]) -> Result<Page, PlanError> {
        let ids = docs
            .iter()
            .map(|doc| {
                doc.id.clone().ok_or_else(|| PlanError::MissingNodeId {
                    path: doc.relative_path.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            path: self.settings.reference_path.clone(),
            match_path: Some(self.settings.reference_match_path()),
            component: self.settings.reference_template.clone(),
            context: PageContext::Reference(ReferenceContext {
                ids,
                locale: self.settings.default_locale.clone(),
            }),
        })
    }
}

fn summarize(pages: &[Page]) -> PlanSummary {
    let mut summary = PlanSummary {
        documentation_pages: 0,
        reference_documents: 0,
    };
    for page in pages {
        match &page.context {
            PageContext::Documentation(_) => summary.documentation_pages += 1,
            PageContext::Reference(ctx) => summary.reference_documents += ctx.ids.len(),
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::recording::RecordingSink;
    use crate::sink::SinkErrorKind;
    use dp_content::{MockContentSource, NodeId};
    use pretty_assertions::assert_eq;

    fn planner() -> PagePlanner {
        let config = Config::default_with_base(Path::new("/site"));
        PagePlanner::new(PlannerSettings::from(&config)).unwrap()
    }

    fn doc(id: &str, path: &str) -> Document {
        Document::new(NodeId::new(id), path)
    }

    fn doc_context(page: &Page) -> &DocumentationContext {
        match &page.context {
            PageContext::Documentation(ctx) => ctx,
            PageContext::Reference(_) => panic!("expected documentation context"),
        }
    }

    fn reference_context(page: &Page) -> &ReferenceContext {
        match &page.context {
            PageContext::Reference(ctx) => ctx,
            PageContext::Documentation(_) => panic!("expected reference context"),
        }
    }

    #[test]
    fn test_settings_from_default_config() {
        let settings = planner().settings().clone();
        assert_eq!(settings.content_root, "src");
        assert_eq!(settings.docs_root, "src/docs");
        assert_eq!(settings.docs_index_path, "/docs/");
        assert_eq!(settings.reference_path, "docs/api");
        assert_eq!(settings.reference_match_path(), "docs/api/*");
        assert_eq!(
            settings.docs_template,
            TemplateRef::new("/site/src/templates/Documentation.js")
        );
        assert_eq!(settings.default_locale, "en");
    }

    #[test]
    fn test_docs_root_documents_use_index_path() {
        let docs = vec![
            doc("1", "src/docs/index.mdx"),
            doc("2", "src/docs/getting-started.mdx"),
        ];
        let pages = planner().pages(&docs).unwrap();

        assert_eq!(pages[0].path, "/docs/");
        assert_eq!(pages[1].path, "/docs/");
    }

    #[test]
    fn test_nested_documents_use_normalized_route() {
        let docs = vec![
            doc("1", "src/docs/components/index.mdx"),
            doc("2", "src/docs/components/layout.mdx"),
        ];
        let pages = planner().pages(&docs).unwrap();

        assert_eq!(pages[0].path, "/docs/components/");
        assert_eq!(pages[1].path, "/docs/components/layout/");
    }

    #[test]
    fn test_documentation_context() {
        let docs = vec![doc("1", "src/docs/components/layout.mdx")];
        let pages = planner().pages(&docs).unwrap();

        assert_eq!(
            doc_context(&pages[0]),
            &DocumentationContext {
                locale: "en".to_owned(),
                relative_directory: "src/docs/components".to_owned(),
                relative_path: "src/docs/components/layout.mdx".to_owned(),
                root_dir: "src/docs".to_owned(),
            }
        );
        assert_eq!(pages[0].match_path, None);
        assert_eq!(
            pages[0].component,
            TemplateRef::new("/site/src/templates/Documentation.js")
        );
    }

    #[test]
    fn test_reference_documents_consolidated() {
        let docs = vec![
            doc("api-b", "src/api/button.mdx"),
            doc("doc-1", "src/docs/index.mdx"),
            doc("api-a", "src/api/forms/input.mdx"),
        ];
        let pages = planner().pages(&docs).unwrap();

        assert_eq!(pages.len(), 2);
        let reference = &pages[1];
        assert_eq!(reference.path, "docs/api");
        assert_eq!(reference.match_path.as_deref(), Some("docs/api/*"));
        assert_eq!(
            reference.component,
            TemplateRef::new("/site/src/templates/ApiReference.js")
        );
        assert_eq!(
            reference_context(reference).ids,
            vec![NodeId::new("api-b"), NodeId::new("api-a")]
        );
        assert_eq!(reference_context(reference).locale, "en");
    }

    #[test]
    fn test_reference_documents_never_routed() {
        // Reference paths are never normalized, so a malformed one is harmless
        let docs = vec![doc("api", "src/api/no-extension")];
        let pages = planner().pages(&docs).unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_single_reference_page() {
        let mut sink = RecordingSink::new();
        let summary = planner().plan(&[], &mut sink).unwrap();

        assert_eq!(
            summary,
            PlanSummary {
                documentation_pages: 0,
                reference_documents: 0,
            }
        );
        assert_eq!(sink.pages().len(), 1);
        assert!(reference_context(&sink.pages()[0]).ids.is_empty());
    }

    #[test]
    fn test_page_counts() {
        let docs = vec![
            doc("1", "src/docs/index.mdx"),
            doc("2", "src/docs/guide/intro.mdx"),
            doc("3", "src/docs/guide/setup.mdx"),
            doc("4", "src/api/a.mdx"),
            doc("5", "src/api/b.mdx"),
        ];
        let mut sink = RecordingSink::new();
        let summary = planner().plan(&docs, &mut sink).unwrap();

        assert_eq!(summary.documentation_pages, 3);
        assert_eq!(summary.reference_documents, 2);
        assert_eq!(sink.pages().len(), 4);
    }

    #[test]
    fn test_planning_is_idempotent() {
        let docs = vec![
            doc("1", "src/docs/index.mdx"),
            doc("2", "src/docs/guide.mdx"),
            doc("3", "src/api/a.mdx"),
        ];
        let planner = planner();
        assert_eq!(planner.pages(&docs).unwrap(), planner.pages(&docs).unwrap());
    }

    #[test]
    fn test_malformed_path_registers_nothing() {
        let docs = vec![
            doc("1", "src/docs/guide/intro.mdx"),
            doc("2", "src/docs/guide/broken"),
        ];
        let mut sink = RecordingSink::new();
        let err = planner().plan(&docs, &mut sink).unwrap_err();

        assert!(matches!(err, PlanError::MalformedPath { ref path } if path == "src/docs/guide/broken"));
        assert!(sink.pages().is_empty());
    }

    #[test]
    fn test_sink_rejection_propagates() {
        let docs = vec![doc("1", "src/docs/guide/intro.mdx"), doc("2", "src/api/a.mdx")];
        let mut sink = RecordingSink::new().rejecting("docs/api", SinkErrorKind::InvalidTemplate);
        let err = planner().plan(&docs, &mut sink).unwrap_err();

        match err {
            PlanError::Registration(e) => {
                assert_eq!(e.kind, SinkErrorKind::InvalidTemplate);
                assert_eq!(e.path.as_deref(), Some("docs/api"));
            }
            other => panic!("expected registration error, got {other:?}"),
        }
        assert_eq!(sink.pages().len(), 1);
    }

    #[test]
    fn test_custom_locale_reaches_every_page() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.i18n.default_locale = "fr".to_owned();
        let planner = PagePlanner::new(PlannerSettings::from(&config)).unwrap();

        let docs = vec![doc("1", "src/docs/guide.mdx"), doc("2", "src/api/a.mdx")];
        let pages = planner.pages(&docs).unwrap();

        assert!(pages.iter().all(|p| p.context.locale() == "fr"));
    }

    #[test]
    fn test_documentation_document_without_id_is_planned() {
        let docs = vec![Document::without_id("src/docs/guide/intro.mdx")];
        let pages = planner().pages(&docs).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].path, "/docs/guide/intro/");
        assert!(reference_context(&pages[1]).ids.is_empty());
    }

    #[test]
    fn test_reference_document_without_id_registers_nothing() {
        let docs = vec![
            doc("1", "src/docs/guide/intro.mdx"),
            Document::without_id("src/api/button.mdx"),
        ];
        let mut sink = RecordingSink::new();
        let err = planner().plan(&docs, &mut sink).unwrap_err();

        assert!(
            matches!(err, PlanError::MissingNodeId { ref path } if path == "src/api/button.mdx")
        );
        assert!(sink.pages().is_empty());
    }

    #[test]
    fn test_plan_source() {
        let source = MockContentSource::new()
            .with_document("d", "src/docs/guide.mdx")
            .with_titled_document("a", "src/api/button.mdx", 1, "Button");
        let mut sink = RecordingSink::new();
        let summary = planner().plan_source(&source, &mut sink).unwrap();

        assert_eq!(summary.documentation_pages, 1);
        assert_eq!(summary.reference_documents, 1);
        assert_eq!(sink.pages()[0].path, "/docs/guide/");
    }
}
