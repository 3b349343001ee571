//! Output Rendering
//!
//! Renders a [`BuildReport`] as human-readable text or JSON.

use std::fmt::Write as _;

use crate::build::BuildReport;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    write: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            write: "→",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            write: "->",
        }
    }
}

/// Trait for rendering build reports
pub trait ReportRenderer {
    fn render(&self, report: &BuildReport) -> String;
}

/// Text renderer for build reports
pub struct TextRenderer {
    /// Whether to use unicode icons
    pub unicode: bool,
    /// Verbosity level; created/overwritten files are listed from 1 up
    pub verbose: u8,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &BuildReport) -> String {
        let icons = if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        };
        let mut out = String::new();

        let headline = match (report.is_success(), report.dry_run) {
            (true, false) => format!("{} Render Complete", icons.check),
            (true, true) => format!("{} Dry Run Complete (nothing written)", icons.check),
            (false, _) => format!("{} Render Failed", icons.cross),
        };
        let _ = writeln!(out, "{}", headline);
        let _ = writeln!(out);
        let _ = writeln!(out, "  Source: {}", report.markdown_root.display());
        let _ = writeln!(out, "  Templates: {}", report.templates_root.display());
        let _ = writeln!(
            out,
            "  {} markdown files → {} created, {} overwritten, {} refused",
            report.total_files(),
            report.created().count(),
            report.overwritten().count(),
            report.collision_count()
        );

        if self.verbose > 0 {
            let created: Vec<_> = report.created().collect();
            if !created.is_empty() {
                let _ = writeln!(out);
                let _ = writeln!(out, "  Created ({}):", created.len());
                for file in created {
                    let _ = writeln!(out, "    {} {}", icons.write, file.destination.display());
                }
            }

            let overwritten: Vec<_> = report.overwritten().collect();
            if !overwritten.is_empty() {
                let _ = writeln!(out);
                let _ = writeln!(out, "  Overwritten ({}):", overwritten.len());
                for file in overwritten {
                    let _ = writeln!(out, "    {} {}", icons.write, file.destination.display());
                }
            }
        }

        let collisions: Vec<_> = report.collisions().collect();
        if !collisions.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "  Refused ({}):", collisions.len());
            for file in collisions {
                let _ = writeln!(
                    out,
                    "    {} {} exists and is not a generated template",
                    icons.cross,
                    report.templates_root.join(&file.destination).display()
                );
            }
        }

        if report.warning_count() > 0 {
            let _ = writeln!(out);
            let _ = writeln!(out, "  Warnings ({}):", report.warning_count());
            for file in &report.files {
                for warning in &file.warnings {
                    let _ = writeln!(out, "    [!] {}: {}", file.source.display(), warning);
                }
            }
        }

        out
    }
}

/// JSON renderer for build reports
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &BuildReport) -> String {
        let json = serde_json::json!({
            "success": report.is_success(),
            "created": report.created().count(),
            "overwritten": report.overwritten().count(),
            "refused": report.collision_count(),
            "report": report,
        });

        serde_json::to_string_pretty(&json).unwrap_or_default()
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, unicode: bool, verbose: u8) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { unicode, verbose }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
