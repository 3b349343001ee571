//! Error types for rendermarkdown
//!
//! Library errors use `thiserror`; the binary wraps them with `anyhow`.
//! Soft conversion problems are not errors, see [`crate::models::ConversionWarning`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for build operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Main error type for build operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// Markdown root does not exist
    #[error("markdown root not found: {path}")]
    MarkdownRootNotFound { path: PathBuf },

    /// Markdown root exists but is not a directory
    #[error("markdown root is not a directory: {path}")]
    MarkdownRootNotDirectory { path: PathBuf },

    /// Markdown root exists but cannot be inspected or listed
    #[error("markdown root is not readable: {path}: {source}")]
    MarkdownRootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be read or parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Destination exists and was not generated by this tool
    #[error(
        "refusing to overwrite {path}: it exists and is not a generated template \
         (first line is not the generated-file marker)"
    )]
    Collision { path: PathBuf },

    /// Directory creation, file write, or destination inspection failed
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovered source file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("failed to walk markdown tree: {0}")]
    Walk(#[from] ignore::Error),

    /// Discovered path is not under the markdown root
    #[error("path '{path}' escapes markdown root '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },
}

impl BuildError {
    /// Configuration problems abort before any file is written
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BuildError::MarkdownRootNotFound { .. }
                | BuildError::MarkdownRootNotDirectory { .. }
                | BuildError::MarkdownRootUnreadable { .. }
                | BuildError::InvalidConfig { .. }
        )
    }

    pub fn is_collision(&self) -> bool {
        matches!(self, BuildError::Collision { .. })
    }
}
