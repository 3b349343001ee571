//! Property tests for destination path mapping and the generated marker.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use rendermarkdown::build::{compose, destination_for, is_generated};
use rendermarkdown::{RenderedFragment, SourceDocument};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9._-]{0,15}").unwrap()
}

fn relative_source() -> impl Strategy<Value = PathBuf> {
    (proptest::collection::vec(segment(), 0..=4), segment()).prop_map(|(dirs, stem)| {
        let mut path: PathBuf = dirs.iter().collect();
        path.push(format!("{stem}.md"));
        path
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: destination relative to the templates root is the source
    /// relative to the markdown root with `.md` replaced by `.html`.
    #[test]
    fn property_destination_mirrors_source(relative in relative_source()) {
        let templates_root = Path::new("/srv/app/templates");
        let destination = destination_for(&relative, templates_root);

        let mirrored = destination.strip_prefix(templates_root).unwrap();
        prop_assert_eq!(mirrored.parent(), relative.parent());
        prop_assert_eq!(mirrored.file_stem(), relative.file_stem());
        prop_assert_eq!(mirrored.extension().and_then(|e| e.to_str()), Some("html"));
    }

    /// PROPERTY: distinct sources never share a destination.
    #[test]
    fn property_destination_is_injective(a in relative_source(), b in relative_source()) {
        let root = Path::new("/t");
        prop_assume!(a != b);
        prop_assert_ne!(destination_for(&a, root), destination_for(&b, root));
    }

    /// PROPERTY: whatever the fragment, composed output is recognised as generated.
    #[test]
    fn property_composed_output_is_generated(
        relative in relative_source(),
        html in "(?s).{0,200}",
    ) {
        let doc = SourceDocument::new(&relative, Path::new("/m").join(&relative), "");
        let content = compose(&RenderedFragment::new(html, &doc));
        prop_assert!(is_generated(content.as_bytes()));
    }

    /// PROPERTY: content that does not start with the marker is never
    /// treated as generated.
    #[test]
    fn property_other_first_lines_are_authored(text in "[^{](?s).{0,200}") {
        prop_assert!(!is_generated(text.as_bytes()));
    }
}
