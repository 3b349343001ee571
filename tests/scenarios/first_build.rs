//! Scenario: First Build
//!
//! Journey: an app has a markdown tree and no templates yet.
//!
//! Success Criteria:
//! - Every source at every depth gets a template
//! - The template tree mirrors the markdown tree
//! - Output is byte-exact

use std::path::PathBuf;

use rendermarkdown::{BuildError, BuildOptions, FileAction, MarkdownBuilder};

use crate::common::*;

/// SCENARIO: a single document renders byte-for-byte
#[test]
fn scenario_single_path_renders_expected_html() {
    let app = TestApp::with_mock_tree();

    MarkdownBuilder::new(app.config())
        .run(BuildOptions::default())
        .unwrap();

    assert_eq!(app.read_template("a/a1.html"), app.expected_template("a/a1.md"));
}

/// SCENARIO: every source in a multi-level tree gets its template
#[test]
fn scenario_generates_all_expected_html() {
    let app = TestApp::with_mock_tree();

    let report = MarkdownBuilder::new(app.config())
        .run(BuildOptions::default())
        .unwrap();

    assert_eq!(report.total_files(), MOCK_MARKDOWN_PATHS.len());
    assert_eq!(report.created().count(), MOCK_MARKDOWN_PATHS.len());
    assert!(report.is_success());

    for relative in MOCK_MARKDOWN_PATHS {
        let template = relative.replace(".md", ".html");
        assert_eq!(
            app.read_template(&template),
            app.expected_template(relative),
            "unexpected output for {relative}"
        );
    }
}

/// SCENARIO: template tree is exactly the markdown tree with `.html` names
#[test]
fn scenario_template_tree_mirrors_markdown_tree() {
    let app = TestApp::with_mock_tree();

    MarkdownBuilder::new(app.config())
        .run(BuildOptions::default())
        .unwrap();

    let expected: Vec<PathBuf> = relative_files(&app.markdown_root())
        .into_iter()
        .map(|p| p.with_extension("html"))
        .collect();
    assert_eq!(relative_files(&app.templates_root()), expected);
}

/// SCENARIO: non-markdown files are not rendered
#[test]
fn scenario_ignores_other_files() {
    let app = TestApp::with_mock_tree();
    app.write_markdown("a/notes.txt", "plain text");
    app.write_markdown("a/image.png", "not really an image");

    let report = MarkdownBuilder::new(app.config())
        .run(BuildOptions::default())
        .unwrap();

    assert_eq!(report.total_files(), MOCK_MARKDOWN_PATHS.len());
    assert!(!app.template_path("a/notes.html").exists());
    assert!(!app.template_path("a/image.html").exists());
}

/// SCENARIO: missing markdown root is a configuration error, nothing is written
#[test]
fn scenario_missing_markdown_root_fails_fast() {
    let app = TestApp::empty();

    let err = MarkdownBuilder::new(app.config())
        .run(BuildOptions::default())
        .unwrap_err();

    assert!(matches!(err, BuildError::MarkdownRootNotFound { .. }));
    assert!(!app.templates_root().exists());
}

/// SCENARIO: an empty markdown root builds nothing and succeeds
#[test]
fn scenario_empty_markdown_root() {
    let app = TestApp::empty();
    std::fs::create_dir_all(app.markdown_root()).unwrap();

    let report = MarkdownBuilder::new(app.config())
        .run(BuildOptions::default())
        .unwrap();

    assert_eq!(report.total_files(), 0);
    assert!(report.is_success());
}

/// SCENARIO: dry run reports what would happen without creating anything
#[test]
fn scenario_dry_run_touches_nothing() {
    let app = TestApp::with_mock_tree();

    let report = MarkdownBuilder::new(app.config())
        .run(BuildOptions { dry_run: true })
        .unwrap();

    assert!(report
        .files
        .iter()
        .all(|f| f.action == FileAction::Create));
    assert!(!app.templates_root().exists());
}
