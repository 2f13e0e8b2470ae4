//! Configuration for the engine
//!
//! Reads configuration from:
//! - `.a11yrc.yaml` / `.a11yrc.json` (project-level)
//! - `~/.a11yrc.yaml` (user-level)
//!
//! Unknown keys are ignored.

use crate::device::DeviceProfile;
use crate::diagnostic::Severity;
use crate::sink::FilterPredicate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Rule configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Disabled rules (exact ids or `*` patterns such as `props.onClick.*`)
    pub disabled: Vec<String>,

    /// Severity overrides (rule_id -> severity)
    pub severity: HashMap<String, Severity>,

    /// Message overrides (rule_id -> message)
    pub messages: HashMap<String, String>,
}

/// Declarative report filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Only report these node tags (empty = all)
    pub tags: Vec<String>,

    /// Only report nodes with these ids (empty = all)
    pub ids: Vec<String>,
}

impl FilterConfig {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.ids.is_empty()
    }

    /// Check a diagnostic's source against the lists
    pub fn accepts(&self, tag: &str, node_id: Option<&str>) -> bool {
        if !self.tags.is_empty() && !self.tags.iter().any(|t| t == tag) {
            return false;
        }

        if !self.ids.is_empty() {
            return node_id.is_some_and(|id| self.ids.iter().any(|i| i == id));
        }

        true
    }

    /// Turn into a filter predicate
    pub fn into_predicate(self) -> FilterPredicate {
        Arc::new(move |tag, node_id, _message| self.accepts(tag, node_id))
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target device tags (e.g. `["mobile"]`)
    pub device: Vec<String>,

    /// Rule configuration
    pub rules: RulesConfig,

    /// Report filter
    pub filter: FilterConfig,
}

impl Config {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Device profile described by this configuration
    pub fn device_profile(&self) -> DeviceProfile {
        DeviceProfile::new(&self.device)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown config file format: {}",
                    ext
                )))
            }
        };

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_names = [".a11yrc.yaml", ".a11yrc.yml", ".a11yrc.json"];

        for name in &config_names {
            let path = PathBuf::from(name);
            if path.exists() {
                return Self::load(&path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            for name in &config_names {
                let path = home.join(name);
                if path.exists() {
                    return Self::load(&path);
                }
            }
        }

        Ok(Self::default())
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Self) {
        if !other.device.is_empty() {
            self.device = other.device;
        }

        self.rules.disabled.extend(other.rules.disabled);
        self.rules.severity.extend(other.rules.severity);
        self.rules.messages.extend(other.rules.messages);

        self.filter.tags.extend(other.filter.tags);
        self.filter.ids.extend(other.filter.ids);
    }

    /// Check if a rule is enabled
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !self
            .rules
            .disabled
            .iter()
            .any(|pattern| matches_rule_pattern(pattern, rule_id))
    }

    /// Get severity override for a rule
    pub fn get_severity_override(&self, rule_id: &str) -> Option<Severity> {
        self.rules.severity.get(rule_id).copied()
    }

    /// Get message override for a rule
    pub fn get_message_override(&self, rule_id: &str) -> Option<&str> {
        self.rules.messages.get(rule_id).map(String::as_str)
    }
}

/// Match a rule id against an exact id or a `*` wildcard pattern
fn matches_rule_pattern(pattern: &str, rule_id: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == rule_id;
    }

    let regex_pattern = format!(
        "^{}$",
        pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*")
    );
    Regex::new(&regex_pattern).is_ok_and(|re| re.is_match(rule_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert!(config.device.is_empty());
        assert!(config.device_profile().is_empty());
        assert!(config.filter.is_empty());
        assert!(config.is_rule_enabled("tags.img.MISSING_ALT"));
    }

    #[test]
    fn test_rule_patterns() {
        let mut config = Config::new();
        config.rules.disabled.push("props.onClick.*".to_string());
        config.rules.disabled.push("tags.a.HASH_HREF_NEEDS_BUTTON".to_string());

        assert!(!config.is_rule_enabled("props.onClick.NO_ROLE"));
        assert!(!config.is_rule_enabled("tags.a.HASH_HREF_NEEDS_BUTTON"));
        assert!(config.is_rule_enabled("tags.img.MISSING_ALT"));
        // Dots are literal in patterns
        assert!(matches_rule_pattern("tags.*.MISSING_ALT", "tags.img.MISSING_ALT"));
        assert!(!matches_rule_pattern("tags.*", "tagsximg"));
    }

    #[test]
    fn test_filter_config() {
        let filter = FilterConfig {
            tags: vec![],
            ids: vec!["bar".to_string()],
        };
        assert!(filter.accepts("img", Some("bar")));
        assert!(!filter.accepts("img", Some("foo")));
        assert!(!filter.accepts("img", None));

        let by_tag = FilterConfig {
            tags: vec!["img".to_string()],
            ids: vec![],
        };
        let predicate = by_tag.into_predicate();
        assert!(predicate("img", None, "m"));
        assert!(!predicate("div", None, "m"));
    }

    #[test]
    fn test_yaml_deserialize_ignores_unknown_keys() {
        let yaml = r#"
device: [mobile]
throw: true
rules:
  disabled:
    - props.onClick.NO_ROLE
  severity:
    tags.img.REDUDANT_ALT: error
  messages:
    tags.img.MISSING_ALT: "Bild ohne alt"
filter:
  ids: [bar]
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.device_profile().contains("mobile"));
        assert!(!config.is_rule_enabled("props.onClick.NO_ROLE"));
        assert_eq!(
            config.get_severity_override("tags.img.REDUDANT_ALT"),
            Some(Severity::Error)
        );
        assert_eq!(
            config.get_message_override("tags.img.MISSING_ALT"),
            Some("Bild ohne alt")
        );
        assert_eq!(config.filter.ids, vec!["bar".to_string()]);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"device": ["mobile"], "unknown": 1}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.device, vec!["mobile".to_string()]);
    }

    #[test]
    fn test_load_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_merge() {
        let mut base = Config::new();
        base.rules.disabled.push("a.b.C".to_string());

        let mut other = Config::new();
        other.device.push("mobile".to_string());
        other.rules.disabled.push("a.b.D".to_string());

        base.merge(other);
        assert_eq!(base.device, vec!["mobile".to_string()]);
        assert_eq!(base.rules.disabled.len(), 2);
    }
}
