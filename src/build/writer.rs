//! Output writer
//!
//! Turns a [`RenderedFragment`] into a template file under the templates
//! root. Existing files are only replaced when their first line is
//! [`GENERATED_MARKER`]; anything else is treated as hand-authored and left
//! alone.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{BuildError, BuildResult};
use crate::fs::FileSystem;
use crate::models::{OutputArtifact, RenderedFragment};

/// First line of every generated template
///
/// This is the only signal used to tell generated output from authored
/// templates. Changing it orphans every previously generated file.
pub const GENERATED_MARKER: &str =
    r#"{% comment AUTOMATICALLY GENERATED by "manage.py rendermarkdown" %}"#;

/// Usage hint on the third header line
pub const INCLUDE_HINT: &str =
    "{% comment Because this is now a template, you can use it simply with {% include 'this' %} %}";

/// Extension of generated templates
pub const TEMPLATE_EXTENSION: &str = "html";

const WRAPPER_OPEN: &str = r#"<div class="staff__markdown">"#;
const WRAPPER_CLOSE: &str = "</div>";

/// What happens to one destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
    /// Nothing there yet
    Create,
    /// A previously generated template will be replaced
    Overwrite,
    /// An authored template is in the way
    Refuse,
}

/// Map a source path relative to the markdown root to its template path
/// relative to the templates root
pub fn relative_destination(relative_source: &Path) -> PathBuf {
    relative_source.with_extension(TEMPLATE_EXTENSION)
}

/// Absolute destination for a source path relative to the markdown root
pub fn destination_for(relative_source: &Path, templates_root: &Path) -> PathBuf {
    templates_root.join(relative_destination(relative_source))
}

/// Full template content for a fragment
pub fn compose(fragment: &RenderedFragment) -> String {
    let mut content = String::with_capacity(fragment.html().len() + 320);
    content.push_str(GENERATED_MARKER);
    content.push('\n');
    content.push_str(&format!(
        "{{% comment Do not edit this file. Edit it's markdown source at {} %}}",
        fragment.source().display()
    ));
    content.push('\n');
    content.push_str(INCLUDE_HINT);
    content.push('\n');
    content.push_str(WRAPPER_OPEN);
    content.push('\n');
    content.push_str(fragment.html());
    content.push('\n');
    content.push_str(WRAPPER_CLOSE);
    content
}

/// Whether existing file content starts with the generated-file marker
pub fn is_generated(existing: &[u8]) -> bool {
    let first_line = existing
        .split(|b| *b == b'\n')
        .next()
        .unwrap_or_default();
    let first_line = first_line.strip_suffix(b"\r").unwrap_or(first_line);
    first_line == GENERATED_MARKER.as_bytes()
}

/// Writes artifacts into the templates root
pub struct OutputWriter<FS: FileSystem> {
    templates_root: PathBuf,
    fs: FS,
}

impl<FS: FileSystem> OutputWriter<FS> {
    pub fn new(templates_root: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            templates_root: templates_root.into(),
            fs,
        }
    }

    pub fn templates_root(&self) -> &Path {
        &self.templates_root
    }

    /// Compose the artifact for a fragment
    pub fn artifact(&self, fragment: &RenderedFragment) -> OutputArtifact {
        OutputArtifact::new(
            destination_for(fragment.relative(), &self.templates_root),
            relative_destination(fragment.relative()),
            compose(fragment),
        )
    }

    /// Decide what writing to `destination` would do, without writing
    ///
    /// Anything at the destination that is not a generated file, directories
    /// included, is refused.
    pub fn inspect(&self, destination: &Path) -> BuildResult<FileAction> {
        if self.fs.is_dir(destination) {
            return Ok(FileAction::Refuse);
        }
        match self.fs.read(destination) {
            Ok(existing) if is_generated(&existing) => Ok(FileAction::Overwrite),
            Ok(_) => Ok(FileAction::Refuse),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileAction::Create),
            Err(e) => Err(BuildError::Write {
                path: destination.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Write an artifact, refusing to replace authored templates
    ///
    /// Returns [`FileAction::Create`] or [`FileAction::Overwrite`];
    /// a refused destination is a [`BuildError::Collision`].
    pub fn write(&self, artifact: &OutputArtifact) -> BuildResult<FileAction> {
        let destination = artifact.destination();
        let action = self.inspect(destination)?;
        if action == FileAction::Refuse {
            return Err(BuildError::Collision {
                path: destination.to_path_buf(),
            });
        }

        if let Some(parent) = destination.parent() {
            self.fs
                .create_dir_all(parent)
                .map_err(|e| BuildError::Write {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        self.fs
            .write_atomic(destination, artifact.content())
            .map_err(|e| BuildError::Write {
                path: destination.to_path_buf(),
                source: e,
            })?;

        tracing::debug!(
            destination = %artifact.relative().display(),
            ?action,
            "wrote template"
        );
        Ok(action)
    }
}
