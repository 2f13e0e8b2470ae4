//! Reporting sink: filter predicate, diagnostic channels and the failure log

use crate::diagnostic::{Diagnostic, Severity};
use colored::Colorize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Caller-supplied gate `(tag, node_id, message) -> report?`
pub type FilterPredicate = Arc<dyn Fn(&str, Option<&str>, &str) -> bool + Send + Sync>;

/// Filter that accepts everything
pub fn accept_all() -> FilterPredicate {
    Arc::new(|_, _, _| true)
}

/// Where accepted diagnostics go
pub trait DiagnosticChannel: Send + Sync {
    /// Called once per accepted diagnostic
    fn emit(&self, rule_id: &str, message: &str);

    /// Called once per faulty rule per session
    fn defect(&self, rule_id: &str, detail: &str);
}

/// Human-readable output on stderr
#[derive(Debug, Clone)]
pub struct ConsoleChannel {
    pub colored: bool,
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self { colored: true }
    }
}

impl ConsoleChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticChannel for ConsoleChannel {
    fn emit(&self, rule_id: &str, message: &str) {
        if self.colored {
            eprintln!("{} {}", format!("[{}]", rule_id).yellow().bold(), message);
        } else {
            eprintln!("[{}] {}", rule_id, message);
        }
    }

    fn defect(&self, rule_id: &str, detail: &str) {
        let prefix = format!("rule {} is broken:", rule_id);
        if self.colored {
            eprintln!("{} {}", prefix.red().bold(), detail);
        } else {
            eprintln!("{} {}", prefix, detail);
        }
    }
}

/// Forwards to the `log` facade at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogChannel;

impl DiagnosticChannel for LogChannel {
    fn emit(&self, rule_id: &str, message: &str) {
        log::info!("[{}] {}", rule_id, message);
    }

    fn defect(&self, rule_id: &str, detail: &str) {
        log::info!("rule {} disabled for this session: {}", rule_id, detail);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullChannel;

impl DiagnosticChannel for NullChannel {
    fn emit(&self, _rule_id: &str, _message: &str) {}

    fn defect(&self, _rule_id: &str, _detail: &str) {}
}

#[derive(Debug, Default)]
struct Collected {
    by_message: BTreeMap<String, String>,
    emitted: usize,
    defects: Vec<(String, String)>,
}

/// In-memory channel keyed by message, for test harnesses.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct CollectingChannel {
    inner: Arc<Mutex<Collected>>,
}

impl CollectingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a message was emitted
    pub fn has_message(&self, message: &str) -> bool {
        self.with(|c| c.by_message.contains_key(message))
    }

    /// Distinct messages seen, in message order
    pub fn messages(&self) -> Vec<String> {
        self.with(|c| c.by_message.keys().cloned().collect())
    }

    /// Whether any emitted message came from this rule
    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.with(|c| c.by_message.values().any(|id| id == rule_id))
    }

    /// Total emit calls, including repeated messages
    pub fn emitted(&self) -> usize {
        self.with(|c| c.emitted)
    }

    /// Defects signalled as `(rule_id, detail)`
    pub fn defects(&self) -> Vec<(String, String)> {
        self.with(|c| c.defects.clone())
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.with(|c| *c = Collected::default())
    }

    fn with<R>(&self, f: impl FnOnce(&mut Collected) -> R) -> R {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl DiagnosticChannel for CollectingChannel {
    fn emit(&self, rule_id: &str, message: &str) {
        self.with(|c| {
            c.by_message.insert(message.to_string(), rule_id.to_string());
            c.emitted += 1;
        })
    }

    fn defect(&self, rule_id: &str, detail: &str) {
        self.with(|c| c.defects.push((rule_id.to_string(), detail.to_string())))
    }
}

/// Chronological record of accepted diagnostics
#[derive(Debug, Clone, Default)]
pub struct FailureLog {
    entries: Vec<Diagnostic>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Copy of the current contents in emission order
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries per rule id
    pub fn count_by_rule(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for diag in &self.entries {
            *counts.entry(diag.rule_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of entries with the given severity
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|d| d.severity == severity).count()
    }
}

impl<'a> IntoIterator for &'a FailureLog {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
