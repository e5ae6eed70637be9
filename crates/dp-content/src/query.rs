//! Declarative description of the content nodes a build requests.

use std::fmt::Write as _;
use std::path::Path;

/// Fields selected for every content node.
///
/// Nested selections are written with `.` separators and rendered as
/// nested blocks by [`ContentQuery::fragment`].
const NODE_FIELDS: &[&str] = &[
    "childMdx.id",
    "relativePath",
    "relativeDirectory",
    "fields.metadata.data.order",
    "fields.metadata.data.title",
];

/// Query for all files of one source category and extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    /// Alias the result is exposed under.
    pub alias: String,
    /// Source instance (category) name.
    pub source_name: String,
    /// File extension without the leading dot.
    pub extension: String,
}

impl ContentQuery {
    #[must_use]
    pub fn new(source_name: impl Into<String>, extension: impl Into<String>) -> Self {
        let source_name = source_name.into();
        Self {
            alias: source_name.clone(),
            source_name,
            extension: extension.into(),
        }
    }

    /// The documentation query: `docs` source, `mdx` files.
    #[must_use]
    pub fn docs() -> Self {
        Self::new("docs", "mdx")
    }

    /// Whether a file on disk falls under this query's extension filter.
    #[must_use]
    pub fn matches_file(&self, path: &Path) -> bool {
        path.extension().is_some_and(|e| e == self.extension.as_str())
    }

    /// Render the query fragment executed by the host site generator.
    #[must_use]
    pub fn fragment(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}: allFile(filter: {{", self.alias);
        let _ = writeln!(out, "  sourceInstanceName: {{ eq: \"{}\" }},", self.source_name);
        let _ = writeln!(out, "  extension: {{ eq: \"{}\" }}", self.extension);
        out.push_str("}) {\n  edges {\n    node {\n");
        render_selection(&mut out, NODE_FIELDS, 3);
        out.push_str("    }\n  }\n}\n");
        out
    }
}

impl Default for ContentQuery {
    fn default() -> Self {
        Self::docs()
    }
}

/// Render dotted field paths as a nested selection set.
///
/// Consecutive paths sharing a first segment are grouped into one block.
fn render_selection(out: &mut String, fields: &[&str], depth: usize) {
    let indent = "  ".repeat(depth);
    let mut i = 0;
    while i < fields.len() {
        match fields[i].split_once('.') {
            None => {
                let _ = writeln!(out, "{indent}{}", fields[i]);
                i += 1;
            }
            Some((head, _)) => {
                let group: Vec<&str> = fields[i..]
                    .iter()
                    .take_while(|f| f.split_once('.').is_some_and(|(h, _)| h == head))
                    .filter_map(|f| f.split_once('.').map(|(_, rest)| rest))
                    .collect();
                let _ = writeln!(out, "{indent}{head} {{");
                render_selection(out, &group, depth + 1);
                let _ = writeln!(out, "{indent}}}");
                i += group.len();
            }
        }
    }
}
