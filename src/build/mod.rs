//! Markdown → template build
//!
//! [`MarkdownBuilder::run`] makes one sequential pass:
//! walk the markdown root, convert each document, write its template.
//!
//! ## Failure handling
//!
//! - A missing markdown root fails before anything is written.
//! - Write failures abort immediately.
//! - Collisions follow [`CollisionPolicy`]: `Continue` records them and keeps
//!   going (the report is then unsuccessful), `Abort` returns the first one.
//! - Conversion problems are warnings and never stop the build.

mod report;
pub mod writer;

pub use report::{BuildReport, FileReport};
pub use writer::{compose, destination_for, is_generated, FileAction, OutputWriter, GENERATED_MARKER};

use crate::config::{BuildConfig, CollisionPolicy};
use crate::converter::Converter;
use crate::error::{BuildError, BuildResult};
use crate::fs::{FileSystem, LocalFs};
use crate::walker::MarkdownTree;

/// Per-invocation options that are not part of the resolved config
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Inspect destinations and report, but write nothing
    pub dry_run: bool,
}

/// Renders a markdown tree into the templates tree
pub struct MarkdownBuilder<FS: FileSystem = LocalFs> {
    config: BuildConfig,
    converter: Converter,
    writer: OutputWriter<FS>,
}

impl MarkdownBuilder<LocalFs> {
    pub fn new(config: BuildConfig) -> Self {
        Self::with_fs(config, LocalFs::new())
    }
}

impl<FS: FileSystem> MarkdownBuilder<FS> {
    pub fn with_fs(config: BuildConfig, fs: FS) -> Self {
        let writer = OutputWriter::new(config.templates_root.clone(), fs);
        Self {
            config,
            converter: Converter::new(),
            writer,
        }
    }

    /// Run the build
    pub fn run(&self, options: BuildOptions) -> BuildResult<BuildReport> {
        let tree = MarkdownTree::open(&self.config.markdown_root)?;
        let mut report = BuildReport::new(tree.root(), self.writer.templates_root());
        report.dry_run = options.dry_run;

        tracing::info!(
            markdown_root = %tree.root().display(),
            templates_root = %self.writer.templates_root().display(),
            dry_run = options.dry_run,
            "rendering markdown"
        );

        for document in tree.documents() {
            let document = document?;
            let fragment = self.converter.convert(&document);
            for warning in fragment.warnings() {
                tracing::warn!(source = %document.relative().display(), "{}", warning);
            }

            let artifact = self.writer.artifact(&fragment);
            let outcome = if options.dry_run {
                self.writer.inspect(artifact.destination())
            } else {
                self.writer.write(&artifact)
            };

            let action = match outcome {
                Ok(action) => action,
                Err(e) if e.is_collision() => FileAction::Refuse,
                Err(e) => return Err(e),
            };
            if action == FileAction::Refuse {
                let err = BuildError::Collision {
                    path: artifact.destination().to_path_buf(),
                };
                if self.config.on_collision == CollisionPolicy::Abort {
                    return Err(err);
                }
                tracing::warn!("{}", err);
            }

            report.push(FileReport {
                source: document.relative().to_path_buf(),
                destination: artifact.relative().to_path_buf(),
                action,
                warnings: fragment.warnings().to_vec(),
            });
        }

        tracing::info!(
            files = report.total_files(),
            created = report.created().count(),
            overwritten = report.overwritten().count(),
            collisions = report.collision_count(),
            "render finished"
        );
        Ok(report)
    }
}
