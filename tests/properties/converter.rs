//! Property tests for Markdown conversion.

use proptest::prelude::*;

use rendermarkdown::Converter;

/// Deepest `<ul>` nesting in rendered HTML
fn max_list_depth(html: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut rest = html;
    while let Some(idx) = rest.find("<ul>").into_iter().chain(rest.find("</ul>")).min() {
        if rest[idx..].starts_with("</ul>") {
            depth = depth.saturating_sub(1);
            rest = &rest[idx + "</ul>".len()..];
        } else {
            depth += 1;
            max = max.max(depth);
            rest = &rest[idx + "<ul>".len()..];
        }
    }
    max
}

fn item_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9][A-Za-z0-9 ,.]{0,20}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: conversion never panics and never leaves a trailing newline.
    #[test]
    fn property_convert_never_panics(markdown in "(?s).{0,512}") {
        let html = Converter::new().to_html(&markdown);
        prop_assert!(!html.ends_with('\n'));
    }

    /// PROPERTY: a list with no indentation never nests.
    #[test]
    fn property_flat_list_does_not_nest(items in proptest::collection::vec(item_text(), 1..10)) {
        let markdown: String = items.iter().map(|i| format!("- {i}\n")).collect();
        let html = Converter::new().to_html(&markdown);
        prop_assert_eq!(max_list_depth(&html), 1);
    }

    /// PROPERTY: nesting depth follows indentation depth.
    #[test]
    fn property_indentation_sets_depth(depth in 1usize..6) {
        let markdown: String = (0..depth)
            .map(|level| format!("{}- level {}\n", "    ".repeat(level), level))
            .collect();
        let html = Converter::new().to_html(&markdown);
        prop_assert_eq!(max_list_depth(&html), depth);
    }

    /// PROPERTY: fenced code content comes out verbatim (HTML-escaped), never
    /// as Markdown.
    #[test]
    fn property_fenced_code_is_literal(line in "[#>*-][A-Za-z ]{0,20}") {
        let markdown = format!("```\n{line}\n```\n");
        let html = Converter::new().to_html(&markdown);
        let escaped = line.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;");
        prop_assert_eq!(html, format!("<pre><code>{escaped}\n</code></pre>"));
    }
}
