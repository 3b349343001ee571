use std::path::PathBuf;

use clap::Parser;

use rendermarkdown::config::{CollisionPolicy, Overrides};

/// rendermarkdown - render a Markdown tree into generated template fragments
#[derive(Parser, Debug)]
#[command(name = "rendermarkdown")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Existing templates are only replaced when their first line is the generated-file marker."
)]
pub struct Cli {
    /// Application directory holding markdown/ and templates/
    #[arg(long, default_value = ".")]
    pub app_dir: PathBuf,

    /// Markdown source root (default: <app-dir>/markdown)
    #[arg(long)]
    pub markdown_root: Option<PathBuf>,

    /// Templates output root (default: <app-dir>/templates)
    #[arg(long)]
    pub templates_root: Option<PathBuf>,

    /// Config file (default: <app-dir>/rendermarkdown.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Stop at the first template that would overwrite an authored file
    #[arg(long)]
    pub fail_fast: bool,

    /// Show what would be written without touching the templates tree
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for CI
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            markdown_root: self.markdown_root.clone(),
            templates_root: self.templates_root.clone(),
            config_file: self.config.clone(),
            on_collision: self.fail_fast.then_some(CollisionPolicy::Abort),
        }
    }
}
