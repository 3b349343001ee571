//! Test fixtures - reusable content constants for tests.

use std::path::Path;

/// Reference document covering headings, a blockquote, a nested list,
/// inline code and a fenced block
pub const MOCK_MARKDOWN: &str = concat!(
    "# Hello World!\n\n> This is a test of the markdown build process.",
    "\n\n- Hierarchal\n    - List\n    - Goes\n        - Here\n\n",
    "## Hopefully\n\n### It\n\n`works!`\n\n```\nprint('hello world!')\n```\n",
);

/// Fragment rendered from [`MOCK_MARKDOWN`]
pub const MOCK_FRAGMENT: &str = concat!(
    "<h1>Hello World!</h1>\n",
    "<blockquote>\n",
    "<p>This is a test of the markdown build process.</p>\n",
    "</blockquote>\n",
    "<ul>\n",
    "<li>Hierarchal\n",
    "<ul>\n",
    "<li>List</li>\n",
    "<li>Goes\n",
    "<ul>\n",
    "<li>Here</li>\n",
    "</ul>\n",
    "</li>\n",
    "</ul>\n",
    "</li>\n",
    "</ul>\n",
    "<h2>Hopefully</h2>\n",
    "<h3>It</h3>\n",
    "<p><code>works!</code></p>\n",
    "<pre><code>print('hello world!')\n",
    "</code></pre>",
);

/// Sources at the root and at depths one to three
pub const MOCK_MARKDOWN_PATHS: &[&str] = &[
    "root.md",
    "a/a1.md",
    "a/a2.md",
    "a/a3.md",
    "b/b/b1.md",
    "b/b/b2.md",
    "b/b/b3.md",
    "c/c/c/c1.md",
    "c/c/c/c2.md",
    "c/c/c/c3.md",
];

pub const GENERATED_LINE: &str =
    r#"{% comment AUTOMATICALLY GENERATED by "manage.py rendermarkdown" %}"#;

pub const INCLUDE_LINE: &str =
    "{% comment Because this is now a template, you can use it simply with {% include 'this' %} %}";

/// A hand-written template that must never be replaced
pub const AUTHORED_TEMPLATE: &str = "{% extends 'staff/base.html' %}\n{% block content %}hand written{% endblock %}\n";

/// Byte-exact template for [`MOCK_MARKDOWN`] rendered from `source`
pub fn expected_html(source: &Path) -> String {
    format!(
        "{GENERATED_LINE}\n\
         {{% comment Do not edit this file. Edit it's markdown source at {} %}}\n\
         {INCLUDE_LINE}\n\
         <div class=\"staff__markdown\">\n\
         {MOCK_FRAGMENT}\n\
         </div>",
        source.display()
    )
}
