//! Build report
//!
//! One [`FileReport`] per discovered document, in discovery order.

use std::path::PathBuf;

use serde::Serialize;

use crate::models::ConversionWarning;

use super::writer::FileAction;

/// Outcome for one source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Source path relative to the markdown root
    pub source: PathBuf,
    /// Destination path relative to the templates root
    pub destination: PathBuf,
    pub action: FileAction,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ConversionWarning>,
}

/// Result of a build invocation
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub markdown_root: PathBuf,
    pub templates_root: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

impl BuildReport {
    pub fn new(markdown_root: impl Into<PathBuf>, templates_root: impl Into<PathBuf>) -> Self {
        Self {
            markdown_root: markdown_root.into(),
            templates_root: templates_root.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, file: FileReport) {
        self.files.push(file);
    }

    fn with_action(&self, action: FileAction) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(move |f| f.action == action)
    }

    /// Files written for the first time
    pub fn created(&self) -> impl Iterator<Item = &FileReport> {
        self.with_action(FileAction::Create)
    }

    /// Previously generated files that were replaced
    pub fn overwritten(&self) -> impl Iterator<Item = &FileReport> {
        self.with_action(FileAction::Overwrite)
    }

    /// Destinations blocked by authored templates
    pub fn collisions(&self) -> impl Iterator<Item = &FileReport> {
        self.with_action(FileAction::Refuse)
    }

    pub fn collision_count(&self) -> usize {
        self.collisions().count()
    }

    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|f| f.warnings.len()).sum()
    }

    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    /// No destination was refused
    pub fn is_success(&self) -> bool {
        self.collision_count() == 0
    }
}
