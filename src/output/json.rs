//! JSON output formatter

use super::{FileReport, OutputFormatter, Summary};
use crate::diagnostic::Diagnostic;
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value).unwrap_or_default()
        } else {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    files: Vec<JsonFile<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    failures: Vec<&'a Diagnostic>,
}

#[derive(Serialize)]
struct JsonSummary {
    files_processed: usize,
    files_with_failures: usize,
    error_count: usize,
    warning_count: usize,
    info_count: usize,
}

impl From<Summary> for JsonSummary {
    fn from(s: Summary) -> Self {
        Self {
            files_processed: s.files_processed,
            files_with_failures: s.files_with_failures,
            error_count: s.error_count,
            warning_count: s.warning_count,
            info_count: s.info_count,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, reports: &[FileReport]) -> String {
        let output = JsonOutput {
            files: reports
                .iter()
                .map(|r| JsonFile {
                    path: r.path.display().to_string(),
                    error: r.error.as_deref(),
                    failures: r.failures.iter().collect(),
                })
                .collect(),
            summary: Summary::from_reports(reports).into(),
        };

        self.render(&output)
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        self.render(diagnostic)
    }
}
