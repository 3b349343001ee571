//! Markdown tree discovery
//!
//! Finds every `.md` file under the markdown root, at any depth, and yields
//! them one at a time as [`SourceDocument`]s.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

use crate::error::{BuildError, BuildResult};
use crate::models::SourceDocument;

/// Extension of Markdown sources
pub const MARKDOWN_EXTENSION: &str = "md";

/// A validated markdown root
///
/// Calling [`MarkdownTree::documents`] again restarts the walk.
#[derive(Debug, Clone)]
pub struct MarkdownTree {
    root: PathBuf,
}

impl MarkdownTree {
    /// Open a markdown root; it must be a directory this process can list
    pub fn open(root: impl Into<PathBuf>) -> BuildResult<Self> {
        let root = root.into();
        let metadata = match fs::metadata(&root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BuildError::MarkdownRootNotFound { path: root });
            }
            Err(e) => return Err(BuildError::MarkdownRootUnreadable { path: root, source: e }),
        };
        if !metadata.is_dir() {
            return Err(BuildError::MarkdownRootNotDirectory { path: root });
        }
        if let Err(e) = fs::read_dir(&root) {
            return Err(BuildError::MarkdownRootUnreadable { path: root, source: e });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily walk the tree, sorted by file name within each directory
    pub fn documents(&self) -> impl Iterator<Item = BuildResult<SourceDocument>> + '_ {
        WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
            .filter_map(move |entry| match entry {
                Ok(entry) if is_markdown_file(&entry) => Some(self.load(entry.path())),
                Ok(_) => None,
                Err(e) => Some(Err(BuildError::Walk(e))),
            })
    }

    fn load(&self, path: &Path) -> BuildResult<SourceDocument> {
        let relative = self.relative_to_root(path)?;
        let bytes = fs::read(path).map_err(|e| BuildError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(source = %relative.display(), "discovered markdown source");
        Ok(SourceDocument::from_bytes(relative, path, bytes))
    }

    fn relative_to_root(&self, path: &Path) -> BuildResult<PathBuf> {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| BuildError::PathEscape {
                path: path.to_path_buf(),
                root: self.root.clone(),
            })
    }
}

/// Regular `.md` files, plus symlinks that resolve to one
///
/// Directory symlinks are never descended into.
fn is_markdown_file(entry: &DirEntry) -> bool {
    let has_extension = entry
        .path()
        .extension()
        .is_some_and(|ext| ext == MARKDOWN_EXTENSION);
    if !has_extension {
        return false;
    }
    if entry.path_is_symlink() {
        let resolves_to_file = entry.path().is_file();
        if !resolves_to_file {
            tracing::debug!(path = %entry.path().display(), "skipping symlink that is not a file");
        }
        return resolves_to_file;
    }
    entry.file_type().is_some_and(|t| t.is_file())
}
