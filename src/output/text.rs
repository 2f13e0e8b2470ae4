//! Human-readable text output formatter

use super::{FileReport, OutputFormatter, Summary};
use crate::diagnostic::{Diagnostic, Severity};
use colored::*;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
            Severity::Info => s.blue(),
        }
    }

    fn format_source(&self, diag: &Diagnostic) -> String {
        match &diag.node_id {
            Some(id) => format!("<{} id=\"{}\">", diag.tag, id),
            None => format!("<{}>", diag.tag),
        }
    }

    fn count(&self, n: usize, singular: &str, plural: &str) -> String {
        format!("{} {}", n, if n == 1 { singular } else { plural })
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, reports: &[FileReport]) -> String {
        let mut output = String::new();

        for report in reports.iter().filter(|r| r.has_findings()) {
            let path = report.path.display().to_string();
            if self.colored {
                output.push_str(&format!("{}\n", path.underline()));
            } else {
                output.push_str(&format!("{}\n", path));
            }

            if let Some(error) = &report.error {
                output.push_str(&format!(
                    "  {}: {}\n",
                    self.severity_str(Severity::Error),
                    error
                ));
            }

            for diag in &report.failures {
                output.push_str(&self.format_diagnostic(diag));
                output.push('\n');
            }
            output.push('\n');
        }

        if self.show_stats {
            let summary = Summary::from_reports(reports);
            output.push_str(&self.count(summary.files_processed, "file", "files"));
            output.push_str(" audited");

            let mut counts = Vec::new();
            if summary.error_count > 0 {
                let s = self.count(summary.error_count, "error", "errors");
                counts.push(if self.colored { s.red().to_string() } else { s });
            }
            if summary.warning_count > 0 {
                let s = self.count(summary.warning_count, "warning", "warnings");
                counts.push(if self.colored { s.yellow().to_string() } else { s });
            }
            if summary.info_count > 0 {
                let s = self.count(summary.info_count, "info", "infos");
                counts.push(if self.colored { s.blue().to_string() } else { s });
            }

            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');
        }

        output
    }

    fn format_diagnostic(&self, diag: &Diagnostic) -> String {
        format!(
            "  {}: {}[{}]: {}",
            self.format_source(diag),
            self.severity_str(diag.severity),
            if self.colored {
                diag.rule_id.cyan().to_string()
            } else {
                diag.rule_id.clone()
            },
            diag.message
        )
    }
}
