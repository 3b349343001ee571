//! rendermarkdown - Markdown to template build step
//!
//! Walks a tree of Markdown sources, renders each file to an HTML fragment,
//! and writes it as a generated template mirroring the source tree. Authored
//! templates that happen to sit at a destination are never overwritten.

pub mod build;
pub mod config;
pub mod converter;
pub mod error;
pub mod fs;
pub mod models;
pub mod presentation;
pub mod walker;

// Re-exports for convenience
pub use build::{BuildOptions, BuildReport, FileAction, MarkdownBuilder, GENERATED_MARKER};
pub use config::{BuildConfig, CollisionPolicy};
pub use converter::Converter;
pub use error::{BuildError, BuildResult};
pub use models::{ConversionWarning, OutputArtifact, RenderedFragment, SourceDocument};
pub use walker::MarkdownTree;
