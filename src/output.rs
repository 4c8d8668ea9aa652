//! Output formatting for check and fix results
//!
//! Text output is meant for humans; JSON output is one array per run for tools.

use crate::repair::FixRecord;
use crate::rule::Violation;
use colored::Colorize;
use serde_json::{Value, json};
use std::str::FromStr;

/// Violations found in one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    pub violations: Vec<Violation>,
}

/// Fence fixes found in one file
#[derive(Debug, Clone)]
pub struct FixReport {
    pub path: String,
    pub fixes: Vec<FixRecord>,
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the result of a check run. `reports` only contains files with violations.
    fn format_check(&self, reports: &[FileReport]) -> String;

    /// Format the result of a fix run. `reports` only contains files with fixes.
    fn format_fixes(&self, reports: &[FixReport], dry_run: bool) -> String;
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format '{s}' (expected 'text' or 'json')")),
        }
    }
}

impl OutputFormat {
    pub fn create_formatter(self, use_colors: bool) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter { use_colors }),
            OutputFormat::Json => Box::new(JsonFormatter),
        }
    }
}

/// Human-readable report grouped by file
#[derive(Debug, Default)]
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, text: &str, style: fn(&str) -> colored::ColoredString) -> String {
        if self.use_colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_check(&self, reports: &[FileReport]) -> String {
        if reports.is_empty() {
            return self.paint("MD Conformance: PASS (no violations)", |s| s.green());
        }

        let total: usize = reports.iter().map(|r| r.violations.len()).sum();
        let mut out = self.paint(
            &format!("MD Conformance: FAIL ({total} violation(s) in {} file(s))", reports.len()),
            |s| s.red().bold(),
        );

        for report in reports {
            out.push_str(&format!("\n\n- {}", self.paint(&report.path, |s| s.blue().bold())));
            for v in &report.violations {
                out.push_str(&format!(
                    "\n  L{:>4}  {}  {}",
                    v.line,
                    self.paint(v.kind.as_str(), |s| s.yellow()),
                    v.message
                ));
            }
        }

        out
    }

    fn format_fixes(&self, reports: &[FixReport], dry_run: bool) -> String {
        if reports.is_empty() {
            return self.paint("✓ No fence language issues found", |s| s.green());
        }

        let total: usize = reports.iter().map(|r| r.fixes.len()).sum();
        let mut out = if dry_run {
            format!(
                "DRY RUN: Found {total} fence(s) without language in {} file(s)",
                reports.len()
            )
        } else {
            format!("Fixing {total} fence(s) in {} file(s)", reports.len())
        };

        for report in reports {
            out.push_str(&format!("\n\n{}", self.paint(&report.path, |s| s.blue().bold())));
            for fix in &report.fixes {
                let original = fix.original_opening_line.trim();
                out.push_str(&format!("\n   L{:>4}  {original}", fix.line));
                out.push_str(&format!(
                    "\n        → {}",
                    self.paint(fix.fixed_opening_line.trim(), |s| s.green())
                ));
                out.push_str(&format!("\n        Content: {}", fix.content_preview.replace('\n', "⏎")));
            }
        }

        if dry_run {
            out.push_str("\n\nRun without --dry-run to apply these fixes");
        }

        out
    }
}

/// Machine-readable report: a single JSON array
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, reports: &[FileReport]) -> String {
        let items: Vec<Value> = reports
            .iter()
            .flat_map(|report| {
                report.violations.iter().map(|v| {
                    json!({
                        "file": report.path,
                        "line": v.line,
                        "kind": v.kind,
                        "message": v.message,
                    })
                })
            })
            .collect();

        serde_json::to_string_pretty(&items).unwrap_or_default()
    }

    fn format_fixes(&self, reports: &[FixReport], dry_run: bool) -> String {
        let items: Vec<Value> = reports
            .iter()
            .flat_map(|report| {
                report.fixes.iter().map(|f| {
                    json!({
                        "file": report.path,
                        "line": f.line,
                        "original": f.original_opening_line,
                        "fixed": f.fixed_opening_line,
                        "language": f.detected_language,
                        "preview": f.content_preview,
                        "applied": !dry_run,
                    })
                })
            })
            .collect();

        serde_json::to_string_pretty(&items).unwrap_or_default()
    }
}
