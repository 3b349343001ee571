//! Markdown → HTML fragment conversion
//!
//! Uses pulldown-cmark (CommonMark) with a few GFM extensions. List nesting
//! follows indentation, fenced code is emitted verbatim inside `<pre><code>`,
//! and nothing is wrapped in `<html>`/`<body>`.
//!
//! Conversion never fails. Anything odd in the source is rendered best-effort
//! and reported as a [`ConversionWarning`].

use pulldown_cmark::{html::push_html, Options, Parser};

use crate::models::{ConversionWarning, RenderedFragment, SourceDocument};

/// Converts Markdown text to HTML fragments
#[derive(Debug, Clone, Copy)]
pub struct Converter {
    options: Options,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render raw Markdown to an HTML fragment with no trailing newline
    pub fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html = String::with_capacity(markdown.len() * 2);
        push_html(&mut html, parser);

        let trimmed = html.trim_end_matches('\n').len();
        html.truncate(trimmed);
        html
    }

    /// Convert a discovered document, collecting soft warnings
    pub fn convert(&self, document: &SourceDocument) -> RenderedFragment {
        let html = self.to_html(document.content());

        let mut warnings = Vec::new();
        if document.is_lossy() {
            warnings.push(ConversionWarning::InvalidUtf8);
        }
        if let Some(line) = unterminated_fence(document.content()) {
            warnings.push(ConversionWarning::UnterminatedFence { line });
        }

        RenderedFragment::new(html, document).with_warnings(warnings)
    }
}

/// Line (1-indexed) of a fenced code block that is never closed
///
/// Fence rules follow CommonMark: up to three spaces of indentation, at least
/// three backticks or tildes, closed by the same character with a run at least
/// as long and nothing else on the line. Fences inside list items or
/// blockquotes are not tracked.
fn unterminated_fence(markdown: &str) -> Option<usize> {
    let mut open: Option<(char, usize, usize)> = None;

    for (idx, line) in markdown.lines().enumerate() {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            continue;
        }
        let rest = &line[indent..];
        let Some(marker) = rest.chars().next().filter(|c| *c == '`' || *c == '~') else {
            continue;
        };
        let run = rest.chars().take_while(|c| *c == marker).count();
        if run < 3 {
            continue;
        }

        match open {
            None => {
                let info = &rest[run..];
                // Backtick fences may not have backticks in the info string
                if marker == '`' && info.contains('`') {
                    continue;
                }
                open = Some((marker, run, idx + 1));
            }
            Some((open_marker, open_run, _)) => {
                if marker == open_marker && run >= open_run && rest[run..].trim().is_empty() {
                    open = None;
                }
            }
        }
    }

    open.map(|(_, _, line)| line)
}
