//! Output formatters for audit results

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::EngineHandle;
use crate::markup::MarkupHost;
use crate::sink::FailureLog;
use std::path::PathBuf;

/// Failures recorded while rendering one document
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub failures: FailureLog,
    /// Set when the document could not be parsed
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(path: PathBuf, failures: FailureLog) -> Self {
        Self {
            path,
            failures,
            error: None,
        }
    }

    /// Report for a document that never rendered
    pub fn failed(path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            path,
            failures: FailureLog::new(),
            error: Some(error.into()),
        }
    }

    pub fn has_findings(&self) -> bool {
        self.error.is_some() || !self.failures.is_empty()
    }
}

/// Render one document through a hooked host and collect its session.
///
/// The handle is reset first, so the report only holds this document's
/// failures. A parse error yields a failed report instead.
pub fn audit(
    host: &mut MarkupHost,
    handle: &EngineHandle,
    path: PathBuf,
    content: &str,
) -> FileReport {
    handle.reset();
    if let Err(e) = host.render(content) {
        log::debug!("{}: {}", path.display(), e);
        return FileReport::failed(path, e.to_string());
    }

    let failures = handle.with_engine(|engine| engine.failures().clone());
    log::info!("{}: {} failure(s)", path.display(), failures.len());
    FileReport::new(path, failures)
}

/// Totals over a set of reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files_processed: usize,
    pub files_with_failures: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

impl Summary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self {
            files_processed: reports.len(),
            ..Self::default()
        };

        for report in reports {
            if report.has_findings() {
                summary.files_with_failures += 1;
            }
            if report.error.is_some() {
                summary.error_count += 1;
            }
            summary.error_count += report.failures.count_by_severity(Severity::Error);
            summary.warning_count += report.failures.count_by_severity(Severity::Warning);
            summary.info_count += report.failures.count_by_severity(Severity::Info);
        }

        summary
    }

    /// Exit code (0 = clean, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }
}

/// Output formatter trait
pub trait OutputFormatter {
    /// Format all reports
    fn format(&self, reports: &[FileReport]) -> String;

    /// Format a single diagnostic
    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String;
}
