//! Core data types flowing through a build
//!
//! A build moves each file through three stages:
//! [`SourceDocument`] → [`RenderedFragment`] → [`OutputArtifact`].
//! All of them live for a single invocation only.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A Markdown file discovered under the markdown root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path relative to the markdown root, e.g. `b/b/b1.md`
    relative: PathBuf,
    /// Absolute path, used for provenance comments
    absolute: PathBuf,
    /// Raw text content
    content: String,
    /// Content was not valid UTF-8 and was decoded lossily
    lossy: bool,
}

impl SourceDocument {
    pub fn new(
        relative: impl Into<PathBuf>,
        absolute: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            relative: relative.into(),
            absolute: absolute.into(),
            content: content.into(),
            lossy: false,
        }
    }

    /// Build a document from raw bytes, decoding lossily when needed
    pub fn from_bytes(relative: impl Into<PathBuf>, absolute: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let (content, lossy) = match String::from_utf8(bytes) {
            Ok(text) => (text, false),
            Err(err) => (String::from_utf8_lossy(err.as_bytes()).into_owned(), true),
        };
        Self {
            relative: relative.into(),
            absolute: absolute.into(),
            content,
            lossy,
        }
    }

    pub fn relative(&self) -> &Path {
        &self.relative
    }

    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_lossy(&self) -> bool {
        self.lossy
    }
}

/// Non-fatal problem found while converting a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionWarning {
    /// Source bytes were not UTF-8; invalid sequences became U+FFFD
    InvalidUtf8,
    /// A fenced code block opened on `line` (1-indexed) is never closed
    UnterminatedFence { line: usize },
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionWarning::InvalidUtf8 => {
                write!(f, "source is not valid UTF-8; invalid bytes were replaced")
            }
            ConversionWarning::UnterminatedFence { line } => {
                write!(f, "fenced code block opened on line {} is never closed", line)
            }
        }
    }
}

/// HTML produced from one source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFragment {
    html: String,
    relative: PathBuf,
    source: PathBuf,
    warnings: Vec<ConversionWarning>,
}

impl RenderedFragment {
    pub fn new(html: impl Into<String>, document: &SourceDocument) -> Self {
        Self {
            html: html.into(),
            relative: document.relative().to_path_buf(),
            source: document.absolute().to_path_buf(),
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<ConversionWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Source path relative to the markdown root
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Absolute source path
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn warnings(&self) -> &[ConversionWarning] {
        &self.warnings
    }
}

/// A fully composed template ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    /// Absolute destination under the templates root
    destination: PathBuf,
    /// Destination relative to the templates root
    relative: PathBuf,
    content: String,
}

impl OutputArtifact {
    pub fn new(
        destination: impl Into<PathBuf>,
        relative: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            relative: relative.into(),
            content: content.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn relative(&self) -> &Path {
        &self.relative
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
