//! Configuration for rendermarkdown
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (RENDERMARKDOWN_*)
//! 3. Config file (`<app>/rendermarkdown.toml`)
//! 4. Built-in defaults (`<app>/markdown`, `<app>/templates`, continue on collision)

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, BuildResult};

/// Config file looked up in the app directory
pub const CONFIG_FILE_NAME: &str = "rendermarkdown.toml";

pub const DEFAULT_MARKDOWN_DIR: &str = "markdown";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

pub const ENV_MARKDOWN_ROOT: &str = "RENDERMARKDOWN_MARKDOWN_ROOT";
pub const ENV_TEMPLATES_ROOT: &str = "RENDERMARKDOWN_TEMPLATES_ROOT";
pub const ENV_ON_COLLISION: &str = "RENDERMARKDOWN_ON_COLLISION";

/// What to do when a destination is an authored template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Report the collision, keep building siblings, fail at the end
    #[default]
    Continue,
    /// Stop at the first collision
    Abort,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(CollisionPolicy::Continue),
            "abort" => Ok(CollisionPolicy::Abort),
            other => Err(format!(
                "unknown collision policy '{}' (expected 'continue' or 'abort')",
                other
            )),
        }
    }
}

/// `[build]` table
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildSection {
    #[serde(default)]
    pub on_collision: CollisionPolicy,
}

/// On-disk config file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub markdown_root: Option<PathBuf>,

    #[serde(default)]
    pub templates_root: Option<PathBuf>,

    #[serde(default)]
    pub build: BuildSection,
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

impl ConfigFile {
    /// Load a config file and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BuildResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path).map_err(|e| BuildError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| BuildError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .split('.')
                    .last()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    key: key.clone(),
                    file: path.to_path_buf(),
                    line: find_line_number(&content, &key),
                    suggestion: suggest_key(&key),
                }
            })
            .collect();

        Ok((config, warnings))
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub markdown_root: Option<PathBuf>,
    pub templates_root: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub on_collision: Option<CollisionPolicy>,
}

/// Fully resolved build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Absolute markdown root
    pub markdown_root: PathBuf,
    /// Absolute templates root
    pub templates_root: PathBuf,
    pub on_collision: CollisionPolicy,
}

impl BuildConfig {
    /// Defaults for an app directory: `<app>/markdown` → `<app>/templates`
    pub fn for_app(app_dir: &Path) -> Self {
        Self {
            markdown_root: absolutize(app_dir, Path::new(DEFAULT_MARKDOWN_DIR)),
            templates_root: absolutize(app_dir, Path::new(DEFAULT_TEMPLATES_DIR)),
            on_collision: CollisionPolicy::default(),
        }
    }

    /// Resolve config from the process environment
    pub fn resolve(app_dir: &Path, overrides: &Overrides) -> BuildResult<(Self, Vec<ConfigWarning>)> {
        Self::resolve_with_env(app_dir, overrides, |key| std::env::var(key).ok())
    }

    /// Resolve config with an explicit environment lookup
    pub fn resolve_with_env<F>(
        app_dir: &Path,
        overrides: &Overrides,
        env: F,
    ) -> BuildResult<(Self, Vec<ConfigWarning>)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::for_app(app_dir);
        let mut warnings = Vec::new();

        // An explicitly named config file must exist; the default one is optional
        let file_path = match &overrides.config_file {
            Some(path) => Some(absolutize(app_dir, path)),
            None => Some(app_dir.join(CONFIG_FILE_NAME)).filter(|p| p.is_file()),
        };
        if let Some(file_path) = file_path {
            let (file, file_warnings) = ConfigFile::load_with_warnings(&file_path)?;
            tracing::debug!(config = %file_path.display(), "loaded config file");
            config.apply_file(app_dir, file);
            warnings.extend(file_warnings);
        }

        config.apply_env(app_dir, env)?;

        if let Some(root) = &overrides.markdown_root {
            config.markdown_root = absolutize(app_dir, root);
        }
        if let Some(root) = &overrides.templates_root {
            config.templates_root = absolutize(app_dir, root);
        }
        if let Some(policy) = overrides.on_collision {
            config.on_collision = policy;
        }

        Ok((config, warnings))
    }

    fn apply_file(&mut self, app_dir: &Path, file: ConfigFile) {
        if let Some(root) = file.markdown_root {
            self.markdown_root = absolutize(app_dir, &root);
        }
        if let Some(root) = file.templates_root {
            self.templates_root = absolutize(app_dir, &root);
        }
        self.on_collision = file.build.on_collision;
    }

    fn apply_env<F>(&mut self, app_dir: &Path, env: F) -> BuildResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = env(ENV_MARKDOWN_ROOT).filter(|v| !v.is_empty()) {
            self.markdown_root = absolutize(app_dir, Path::new(&root));
        }
        if let Some(root) = env(ENV_TEMPLATES_ROOT).filter(|v| !v.is_empty()) {
            self.templates_root = absolutize(app_dir, Path::new(&root));
        }
        if let Some(policy) = env(ENV_ON_COLLISION).filter(|v| !v.is_empty()) {
            self.on_collision = policy.parse().map_err(|message| BuildError::InvalidConfig {
                file: PathBuf::from(format!("${}", ENV_ON_COLLISION)),
                message,
            })?;
        }
        Ok(())
    }
}

/// Join relative paths onto the app dir and make the result absolute
fn absolutize(app_dir: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        app_dir.join(path)
    };
    std::path::absolute(&joined).unwrap_or(joined)
}

/// First line (1-indexed) where `key` is assigned
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            line.trim_start()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map(|idx| idx + 1)
}

/// Closest known key within three edits of `unknown`
fn suggest_key(unknown: &str) -> Option<String> {
    const KNOWN_KEYS: &[&str] = &["markdown_root", "templates_root", "build", "on_collision"];

    KNOWN_KEYS
        .iter()
        .map(|key| (edit_distance(unknown, key), *key))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, key)| key.to_string())
}

/// Levenshtein distance over chars, keeping a single row
fn edit_distance(from: &str, to: &str) -> usize {
    let to: Vec<char> = to.chars().collect();
    let mut row: Vec<usize> = (0..=to.len()).collect();

    for (i, a) in from.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, b) in to.iter().enumerate() {
            let substitution = diagonal + usize::from(a != *b);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[to.len()]
}
