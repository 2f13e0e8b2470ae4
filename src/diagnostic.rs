//! Diagnostic types for accessibility violations

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning - likely barrier for some users
    #[default]
    Warning,
    /// Error - element is unusable for some users
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" | "hint" | "note" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// A rule violation reported for one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule ID that triggered this diagnostic (e.g. "tags.img.MISSING_ALT")
    pub rule_id: String,
    /// Tag of the offending node
    pub tag: String,
    /// Identity attribute of the offending node, if any
    pub node_id: Option<String>,
    /// Human-readable message
    pub message: String,
    /// Severity level
    #[serde(default)]
    pub severity: Severity,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(rule_id: &str, tag: &str, node_id: Option<&str>, message: &str) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            tag: tag.to_string(),
            node_id: node_id.map(String::from),
            message: message.to_string(),
            severity: Severity::default(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}
