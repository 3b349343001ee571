//! rendermarkdown CLI
//!
//! Usage: rendermarkdown [--app-dir DIR] [--markdown-root DIR] [--templates-root DIR]
//!
//! Renders `<app>/markdown/**/*.md` into `<app>/templates/**/*.html`.
//! Exits 1 when a template was refused or a write failed, 2 on a
//! configuration error.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use rendermarkdown::build::{BuildOptions, MarkdownBuilder};
use rendermarkdown::config::BuildConfig;
use rendermarkdown::error::BuildError;
use rendermarkdown::presentation::{create_renderer, OutputFormat};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (config, warnings) = match BuildConfig::resolve(&cli.app_dir, &cli.overrides()) {
        Ok(resolved) => resolved,
        Err(e) => exit_configuration_error(e),
    };
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let builder = MarkdownBuilder::new(config);
    let report = match builder.run(BuildOptions {
        dry_run: cli.dry_run,
    }) {
        Ok(report) => report,
        Err(e) if e.is_configuration() => exit_configuration_error(e),
        Err(e) => return Err(e).context("markdown render failed"),
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let renderer = create_renderer(format, true, cli.verbose);
    print!("{}", renderer.render(&report));
    if cli.json {
        println!();
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} template(s) were not written because authored files are in the way",
            report.collision_count()
        );
    }
    Ok(())
}

/// Configuration problems exit with status 2, before anything is written
fn exit_configuration_error(err: BuildError) -> ! {
    let err = anyhow::Error::new(err).context("invalid configuration");
    eprintln!("Error: {:?}", err);
    std::process::exit(2);
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "rendermarkdown=warn",
        1 => "rendermarkdown=info",
        2 => "rendermarkdown=debug",
        _ => "rendermarkdown=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
