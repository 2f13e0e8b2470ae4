//! Rule definition

use crate::device::DeviceProfile;
use crate::diagnostic::Severity;
use crate::node::{AncestorChain, Node};
use crate::query;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure inside a rule predicate
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Failed(String),
}

/// Everything a predicate may look at
pub struct RuleContext<'n, 'a> {
    pub node: &'n Node,
    pub ancestors: &'n AncestorChain<'a>,
    pub device: &'n DeviceProfile,
}

/// Predicate signature: `Ok(true)` means violation
pub type Predicate = Arc<dyn Fn(&RuleContext<'_, '_>) -> Result<bool, RuleError> + Send + Sync>;

/// What nodes a rule applies to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    /// Tags this rule applies to (empty = any tag)
    pub tags: Vec<String>,

    /// Handler attribute that must hold a callable (e.g. "onClick")
    pub handler: Option<String>,
}

impl Target {
    /// Check if a node matches this target
    pub fn matches(&self, node: &Node) -> bool {
        if !self.tags.is_empty() && !self.tags.iter().any(|t| *t == node.tag) {
            return false;
        }

        match &self.handler {
            Some(attr) => query::has_handler(node, attr),
            None => true,
        }
    }
}

/// An accessibility rule
#[derive(Clone)]
pub struct Rule {
    /// Stable identifier, `group.name` (e.g. "props.onClick.NO_LABEL")
    pub id: String,

    /// Message template
    pub message: String,

    /// Default severity level
    pub severity: Severity,

    /// Detailed description
    pub description: Option<String>,

    /// Documentation URL
    pub docs: Option<String>,

    /// Tags for categorization
    pub tags: Vec<String>,

    /// Whether this rule is enabled by default
    pub enabled: bool,

    /// Nodes this rule applies to
    pub target: Target,

    /// Device tags that suppress this rule
    pub exempt_devices: Vec<String>,

    check: Predicate,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .field("target", &self.target)
            .field("exempt_devices", &self.exempt_devices)
            .finish_non_exhaustive()
    }
}

impl Rule {
    /// Create a new rule from a fallible predicate
    pub fn new<F>(id: &str, message: &str, check: F) -> Self
    where
        F: Fn(&RuleContext<'_, '_>) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        Self {
            id: id.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
            description: None,
            docs: None,
            tags: Vec::new(),
            enabled: true,
            target: Target::default(),
            exempt_devices: Vec::new(),
            check: Arc::new(check),
        }
    }

    /// Create a new rule from an infallible node predicate
    pub fn simple<F>(id: &str, message: &str, check: F) -> Self
    where
        F: Fn(&Node) -> bool + Send + Sync + 'static,
    {
        Self::new(id, message, move |ctx| Ok(check(ctx.node)))
    }

    /// Set the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set the documentation URL
    pub fn with_docs(mut self, docs: &str) -> Self {
        self.docs = Some(docs.to_string());
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    /// Restrict to a node tag
    pub fn for_tag(mut self, tag: &str) -> Self {
        self.target.tags.push(tag.to_string());
        self
    }

    /// Require a callable in the given handler attribute
    pub fn requires_handler(mut self, attr: &str) -> Self {
        self.target.handler = Some(attr.to_string());
        self
    }

    /// Suppress the rule when the device profile carries `device`
    pub fn exempt_on(mut self, device: &str) -> Self {
        self.exempt_devices.push(device.to_string());
        self
    }

    /// Disable by default
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Rule group (everything before the last dot)
    pub fn group(&self) -> &str {
        self.id.rsplit_once('.').map_or("", |(group, _)| group)
    }

    /// Rule name (after the last dot)
    pub fn name(&self) -> &str {
        self.id.rsplit_once('.').map_or(self.id.as_str(), |(_, name)| name)
    }

    /// Whether the device profile suppresses this rule
    pub fn is_exempt(&self, device: &DeviceProfile) -> bool {
        device.contains_any(&self.exempt_devices)
    }

    /// Whether the rule applies to this node and profile
    pub fn applies_to(&self, node: &Node, device: &DeviceProfile) -> bool {
        self.target.matches(node) && !self.is_exempt(device)
    }

    /// Run the predicate
    pub fn check(&self, ctx: &RuleContext<'_, '_>) -> Result<bool, RuleError> {
        (self.check)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::AttrValue;

    #[test]
    fn test_group_and_name() {
        let rule = Rule::simple("props.onClick.NO_ROLE", "msg", |_| true);
        assert_eq!(rule.group(), "props.onClick");
        assert_eq!(rule.name(), "NO_ROLE");

        let flat = Rule::simple("flat", "msg", |_| true);
        assert_eq!(flat.group(), "");
        assert_eq!(flat.name(), "flat");
    }

    #[test]
    fn test_target_handler() {
        let rule = Rule::simple("r", "m", |_| true).requires_handler("onClick");
        let device = DeviceProfile::desktop();

        assert!(rule.applies_to(&Node::new("div").on("onClick", "k"), &device));
        assert!(!rule.applies_to(&Node::new("div").attr("onClick", AttrValue::Null), &device));
        assert!(!rule.applies_to(&Node::new("div"), &device));
    }

    #[test]
    fn test_target_tag() {
        let rule = Rule::simple("r", "m", |_| true).for_tag("img");
        let device = DeviceProfile::desktop();

        assert!(rule.applies_to(&Node::new("img"), &device));
        assert!(!rule.applies_to(&Node::new("div"), &device));
    }

    #[test]
    fn test_device_exemption() {
        let rule = Rule::simple("r", "m", |_| true).exempt_on("mobile");
        assert!(rule.is_exempt(&DeviceProfile::mobile()));
        assert!(!rule.is_exempt(&DeviceProfile::desktop()));
        assert!(!rule.applies_to(&Node::new("div"), &DeviceProfile::mobile()));
    }

    #[test]
    fn test_check_passes_context() {
        let rule = Rule::new("r", "m", |ctx| Ok(ctx.ancestors.parent().is_some()));
        let parent = Node::new("div");
        let node = Node::new("span");
        let device = DeviceProfile::desktop();

        let root = AncestorChain::root();
        let nested = root.with_parent(&parent);

        let ctx = RuleContext { node: &node, ancestors: &root, device: &device };
        assert!(!rule.check(&ctx).unwrap());

        let ctx = RuleContext { node: &node, ancestors: &nested, device: &device };
        assert!(rule.check(&ctx).unwrap());
    }
}
