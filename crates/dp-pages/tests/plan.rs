//! End-to-end planning from a site directory on disk.

use std::fs;
use std::path::Path;

use dp_config::Config;
use dp_content::{ContentQuery, ContentSource, FsContentSource, QueryResultSource};
use dp_pages::{JsonLinesSink, PagePlanner, PlanError, PlannerSettings, SinkErrorKind};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn write(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "# Page\n").unwrap();
}

fn load_config(root: &Path, toml: &str) -> Config {
    let path = root.join("docpages.toml");
    fs::write(&path, toml).unwrap();
    Config::load(Some(&path), None).unwrap()
}

fn run(config: &Config, source: &dyn ContentSource) -> Vec<Value> {
    let planner = PagePlanner::new(PlannerSettings::from(config)).unwrap();
    let mut sink = JsonLinesSink::new(Vec::new());
    planner.plan_source(source, &mut sink).unwrap();
    let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    out.lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_plan_site_from_disk() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    write(root, "src/docs/index.mdx");
    write(root, "src/docs/guides/index.mdx");
    write(root, "src/docs/guides/theming.mdx");
    write(root, "src/api/button.mdx");
    write(root, "src/api/forms/input.mdx");
    write(root, "src/pages/about.js");
    let config = load_config(root, "[i18n]\ndefault_locale = \"en\"\n");

    let source =
        FsContentSource::new(root, ContentQuery::docs()).with_scan_dirs(["src"]);
    let pages = run(&config, &source);

    let docs_template = root.join("src/templates/Documentation.js");
    let paths: Vec<&str> = pages.iter().map(|p| p["path"].as_str().unwrap()).collect();
    assert_eq!(
        paths,
        vec!["/docs/guides/", "/docs/guides/theming/", "/docs/", "docs/api"]
    );
    assert_eq!(
        pages[1],
        json!({
            "path": "/docs/guides/theming/",
            "component": docs_template.to_str().unwrap(),
            "context": {
                "locale": "en",
                "relativeDirectory": "src/docs/guides",
                "relativePath": "src/docs/guides/theming.mdx",
                "rootDir": "src/docs"
            }
        })
    );

    let reference = &pages[3];
    assert_eq!(reference["matchPath"], "docs/api/*");
    assert_eq!(reference["context"]["ids"].as_array().unwrap().len(), 2);
    assert_eq!(reference["context"]["locale"], "en");
}

#[test]
fn test_plan_from_query_result_with_custom_layout() {
    let temp = tempfile::tempdir().unwrap();
    let config = load_config(
        temp.path(),
        r#"
[content]
root = "content"

[docs]
root = "content/handbook"
index_path = "/handbook/"

[reference]
root = "content/reference"
path = "handbook/reference"

[i18n]
default_locale = "de"
"#,
    );
    let source = QueryResultSource::new(
        r#"{ "edges": [
            { "node": { "childMdx": { "id": "r1" },
                "relativePath": "content/reference/hooks.mdx",
                "relativeDirectory": "content/reference" } },
            { "node": { "childMdx": { "id": "h1" },
                "relativePath": "content/handbook/index.mdx",
                "relativeDirectory": "content/handbook" } },
            { "node": { "childMdx": { "id": "h2" },
                "relativePath": "content/handbook/ops/deploy.mdx",
                "relativeDirectory": "content/handbook/ops" } }
        ] }"#,
    );

    let pages = run(&config, &source);

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0]["path"], "/handbook/");
    assert_eq!(pages[1]["path"], "/handbook/ops/deploy/");
    assert_eq!(pages[2]["path"], "handbook/reference");
    assert_eq!(pages[2]["matchPath"], "handbook/reference/*");
    assert_eq!(pages[2]["context"], json!({ "ids": ["r1"], "locale": "de" }));
}

#[test]
fn test_duplicate_route_aborts_build() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    write(root, "src/docs/index.mdx");
    write(root, "src/docs/faq.mdx");
    let config = load_config(root, "");

    let planner = PagePlanner::new(PlannerSettings::from(&config)).unwrap();
    let source = FsContentSource::new(root, ContentQuery::docs());
    let mut sink = JsonLinesSink::new(Vec::new());
    let err = planner.plan_source(&source, &mut sink).unwrap_err();

    match err {
        PlanError::Registration(e) => {
            assert_eq!(e.kind, SinkErrorKind::DuplicatePath);
            assert_eq!(e.path.as_deref(), Some("/docs/"));
        }
        other => panic!("expected registration error, got {other:?}"),
    }
}

#[test]
fn test_relative_config_path_yields_absolute_templates() {
    // A directory under the test's working directory, addressed relatively
    let temp = tempfile::tempdir_in(".").unwrap();
    let relative = Path::new(".").join(temp.path().file_name().unwrap());
    assert!(relative.is_relative());
    fs::write(relative.join("docpages.toml"), "").unwrap();

    let config = Config::load(Some(&relative.join("docpages.toml")), None).unwrap();
    assert!(config.docs_resolved.template.is_absolute());
    assert!(config.reference_resolved.template.is_absolute());
    assert!(config.project_dir.is_absolute());

    let source = QueryResultSource::new(
        r#"{ "edges": [
            { "node": { "childMdx": { "id": "a1" },
                "relativePath": "src/api/button.mdx",
                "relativeDirectory": "src/api" } },
            { "node": { "childMdx": null,
                "relativePath": "src/docs/guides/theming.mdx",
                "relativeDirectory": "src/docs/guides" } }
        ] }"#,
    );
    let pages = run(&config, &source);

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["path"], "/docs/guides/theming/");
    assert_eq!(pages[1]["context"]["ids"], json!(["a1"]));
}

#[test]
fn test_default_config_plans_into_json_lines() {
    let pages = run(&Config::default(), &QueryResultSource::new(r#"{ "edges": [] }"#));

    assert_eq!(pages.len(), 1);
    assert!(Path::new(pages[0]["component"].as_str().unwrap()).is_absolute());
}
