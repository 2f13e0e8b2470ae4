//! Evaluation driver and reporting
//!
//! ```text
//! host constructs node -> NodeHook::on_node -> evaluate -> report -> channel + failure log
//! ```

use crate::config::Config;
use crate::device::DeviceProfile;
use crate::diagnostic::Diagnostic;
use crate::node::{AncestorChain, Node};
use crate::rule::{Rule, RuleContext, RuleError};
use crate::rules::builtin_rules;
use crate::sink::{accept_all, ConsoleChannel, DiagnosticChannel, FailureLog, FilterPredicate};
use std::cell::RefCell;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Arc;
use thiserror::Error;

/// Engine error
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Rule already registered: {0}")]
    DuplicateRule(String),
}

/// Per-node hook consumed by a host's interception layer
pub trait NodeHook {
    /// Called once per constructed node with its ancestor chain
    fn on_node(&mut self, node: &Node, ancestors: &AncestorChain<'_>);
}

/// A host framework that can run a hook on every node it constructs
pub trait Host {
    /// Replace the current hook
    fn set_hook(&mut self, hook: Box<dyn NodeHook>);
}

/// Installation options
#[derive(Clone, Default)]
pub struct Options {
    /// Report gate; falls back to `config.filter`, then to accept-all
    pub filter: Option<FilterPredicate>,

    /// Device tags; falls back to `config.device`
    pub device: Vec<String>,

    /// Diagnostic channel; defaults to the console
    pub channel: Option<Arc<dyn DiagnosticChannel>>,

    /// File-backed settings
    pub config: Config,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the filter predicate
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str, Option<&str>, &str) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Add a device tag
    pub fn with_device(mut self, device: &str) -> Self {
        self.device.push(device.to_string());
        self
    }

    /// Set the diagnostic channel
    pub fn with_channel(mut self, channel: impl DiagnosticChannel + 'static) -> Self {
        self.channel = Some(Arc::new(channel));
        self
    }

    /// Set the configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    fn device_profile(&self) -> DeviceProfile {
        if self.device.is_empty() {
            self.config.device_profile()
        } else {
            DeviceProfile::new(&self.device)
        }
    }

    fn resolve_filter(&self) -> FilterPredicate {
        match &self.filter {
            Some(filter) => Arc::clone(filter),
            None if !self.config.filter.is_empty() => self.config.filter.clone().into_predicate(),
            None => accept_all(),
        }
    }

    fn resolve_channel(&self) -> Arc<dyn DiagnosticChannel> {
        self.channel
            .clone()
            .unwrap_or_else(|| Arc::new(ConsoleChannel::new()) as Arc<dyn DiagnosticChannel>)
    }
}

/// A rule predicate that failed on a node
#[derive(Debug)]
struct RuleDefect {
    rule_id: String,
    error: RuleError,
}

/// Evaluation driver, reporting sink and failure log of one session
pub struct Engine {
    rules: Vec<Rule>,
    config: Config,
    device: DeviceProfile,
    filter: FilterPredicate,
    channel: Arc<dyn DiagnosticChannel>,
    failures: FailureLog,
    /// Rules whose defect has already been signalled this session
    broken_rules: HashSet<String>,
}

impl Engine {
    /// Create an engine with the built-in catalog
    pub fn new(options: Options) -> Self {
        Self::with_rules(builtin_rules(), options)
    }

    /// Create an engine with a custom catalog
    pub fn with_rules(rules: Vec<Rule>, options: Options) -> Self {
        let mut engine = Self {
            rules,
            config: Config::default(),
            device: DeviceProfile::default(),
            filter: accept_all(),
            channel: Arc::new(ConsoleChannel::new()),
            failures: FailureLog::new(),
            broken_rules: HashSet::new(),
        };
        engine.install(options);
        engine
    }

    /// Replace the whole configuration and start a fresh session
    pub fn install(&mut self, options: Options) {
        self.device = options.device_profile();
        self.filter = options.resolve_filter();
        self.channel = options.resolve_channel();
        self.config = options.config;
        self.reset();

        log::info!(
            "installed {} rules (device profile: [{}])",
            self.rules.len(),
            self.device.iter().collect::<Vec<_>>().join(", ")
        );
    }

    /// Clear the failure log and defect memory
    pub fn reset(&mut self) {
        self.failures.clear();
        self.broken_rules.clear();
        log::info!("failure log reset");
    }

    /// Register an additional rule at the end of the catalog
    pub fn register_rule(&mut self, rule: Rule) -> Result<(), EngineError> {
        if self.rules.iter().any(|r| r.id == rule.id) {
            return Err(EngineError::DuplicateRule(rule.id));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Rules in catalog order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Active device profile
    pub fn device(&self) -> &DeviceProfile {
        &self.device
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accepted diagnostics so far
    pub fn failures(&self) -> &FailureLog {
        &self.failures
    }

    /// Snapshot of the failure log in emission order
    pub fn get_failures(&self) -> Vec<Diagnostic> {
        self.failures.snapshot()
    }

    /// Evaluate the catalog against a node using the active device profile
    pub fn evaluate(&mut self, node: &Node, ancestors: &AncestorChain<'_>) -> Vec<Diagnostic> {
        let device = self.device.clone();
        self.evaluate_for(node, ancestors, &device)
    }

    /// Evaluate the catalog against a node for a given device profile
    pub fn evaluate_for(
        &mut self,
        node: &Node,
        ancestors: &AncestorChain<'_>,
        device: &DeviceProfile,
    ) -> Vec<Diagnostic> {
        let (diagnostics, defects) = self.run_rules(node, ancestors, device);
        for defect in self.take_new_defects(defects) {
            self.channel.defect(&defect.rule_id, &defect.error.to_string());
        }
        diagnostics
    }

    /// Filter, log and emit one diagnostic. Returns whether it was accepted.
    pub fn report(&mut self, diagnostic: Diagnostic) -> bool {
        if !self.accept(&diagnostic) {
            return false;
        }
        self.channel.emit(&diagnostic.rule_id, &diagnostic.message);
        true
    }

    fn accept(&mut self, diagnostic: &Diagnostic) -> bool {
        if !(self.filter)(&diagnostic.tag, diagnostic.node_id.as_deref(), &diagnostic.message) {
            log::debug!(
                "filtered out {} on <{}>",
                diagnostic.rule_id,
                diagnostic.tag
            );
            return false;
        }
        self.failures.push(diagnostic.clone());
        true
    }

    /// Run every applicable rule in catalog order
    fn run_rules(
        &self,
        node: &Node,
        ancestors: &AncestorChain<'_>,
        device: &DeviceProfile,
    ) -> (Vec<Diagnostic>, Vec<RuleDefect>) {
        let mut diagnostics = Vec::new();
        let mut defects = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let node_id = node.id();
        let ctx = RuleContext {
            node,
            ancestors,
            device,
        };

        for rule in &self.rules {
            if !rule.enabled || !self.config.is_rule_enabled(&rule.id) {
                continue;
            }

            if !rule.applies_to(node, device) || seen.contains(rule.id.as_str()) {
                continue;
            }

            match run_isolated(rule, &ctx) {
                Ok(true) => {
                    seen.insert(&rule.id);
                    let message = self
                        .config
                        .get_message_override(&rule.id)
                        .unwrap_or(&rule.message);
                    let severity = self
                        .config
                        .get_severity_override(&rule.id)
                        .unwrap_or(rule.severity);
                    diagnostics.push(
                        Diagnostic::new(&rule.id, &node.tag, node_id.as_deref(), message)
                            .with_severity(severity),
                    );
                }
                Ok(false) => {}
                Err(error) => {
                    log::error!("rule {} failed on <{}>: {}", rule.id, node.tag, error);
                    defects.push(RuleDefect {
                        rule_id: rule.id.clone(),
                        error,
                    });
                }
            }
        }

        log::debug!("<{}>: {} diagnostic(s)", node.tag, diagnostics.len());
        (diagnostics, defects)
    }

    /// Keep only defects not yet signalled this session
    fn take_new_defects(&mut self, defects: Vec<RuleDefect>) -> Vec<RuleDefect> {
        defects
            .into_iter()
            .filter(|d| self.broken_rules.insert(d.rule_id.clone()))
            .collect()
    }
}

impl NodeHook for Engine {
    fn on_node(&mut self, node: &Node, ancestors: &AncestorChain<'_>) {
        for diagnostic in self.evaluate(node, ancestors) {
            self.report(diagnostic);
        }
    }
}

/// Run a predicate, turning a panic into a rule error
fn run_isolated(rule: &Rule, ctx: &RuleContext<'_, '_>) -> Result<bool, RuleError> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(ctx))) {
        Ok(result) => result,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(RuleError::Panicked(detail))
        }
    }
}

/// Shared handle to an installed engine.
///
/// The channel is called after the engine borrow is released, so a channel
/// may construct further nodes through the same host.
#[derive(Clone)]
pub struct EngineHandle {
    inner: Rc<RefCell<Engine>>,
}

impl EngineHandle {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Rc::new(RefCell::new(engine)),
        }
    }

    /// Snapshot of the failure log in emission order
    pub fn get_failures(&self) -> Vec<Diagnostic> {
        self.inner.borrow().get_failures()
    }

    /// Clear the failure log
    pub fn reset(&self) {
        self.inner.borrow_mut().reset();
    }

    /// Replace the configuration and start a fresh session
    pub fn reinstall(&self, options: Options) {
        self.inner.borrow_mut().install(options);
    }

    /// Register an additional rule
    pub fn register_rule(&self, rule: Rule) -> Result<(), EngineError> {
        self.inner.borrow_mut().register_rule(rule)
    }

    /// Run a closure against the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&Engine) -> R) -> R {
        f(&self.inner.borrow())
    }
}

impl NodeHook for EngineHandle {
    fn on_node(&mut self, node: &Node, ancestors: &AncestorChain<'_>) {
        let (defects, accepted, channel) = {
            let mut engine = self.inner.borrow_mut();
            let device = engine.device.clone();
            let (diagnostics, defects) = engine.run_rules(node, ancestors, &device);
            let defects = engine.take_new_defects(defects);
            let accepted: Vec<Diagnostic> = diagnostics
                .into_iter()
                .filter(|d| engine.accept(d))
                .collect();
            (defects, accepted, Arc::clone(&engine.channel))
        };

        for defect in defects {
            channel.defect(&defect.rule_id, &defect.error.to_string());
        }
        for diagnostic in accepted {
            channel.emit(&diagnostic.rule_id, &diagnostic.message);
        }
    }
}

/// Install a fresh engine as the host's per-node hook.
///
/// Replaces any previously installed hook; the returned handle owns the new
/// session's failure log.
pub fn install<H: Host + ?Sized>(host: &mut H, options: Options) -> EngineHandle {
    let handle = EngineHandle::new(Engine::new(options));
    host.set_hook(Box::new(handle.clone()));
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{AttrValue, Child};
    use crate::rules::*;
    use crate::sink::CollectingChannel;
    use pretty_assertions::assert_eq;

    fn engine() -> (Engine, CollectingChannel) {
        let channel = CollectingChannel::new();
        let engine = Engine::new(Options::new().with_channel(channel.clone()));
        (engine, channel)
    }

    fn ids(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.rule_id.as_str()).collect()
    }

    fn eval(engine: &mut Engine, node: &Node) -> Vec<Diagnostic> {
        engine.evaluate(node, &AncestorChain::root())
    }

    #[test]
    fn test_bare_click_handler() {
        let (mut engine, _) = engine();
        let node = Node::new("div").on("onClick", "k");

        assert_eq!(
            ids(&eval(&mut engine, &node)),
            vec![NO_LABEL, NO_ROLE, NO_TABINDEX]
        );
    }

    #[test]
    fn test_null_and_undefined_handlers_are_ignored() {
        let (mut engine, _) = engine();
        for value in [AttrValue::Null, AttrValue::Undefined] {
            let node = Node::new("span").attr("onClick", value).attr("role", "button");
            assert!(eval(&mut engine, &node).is_empty());
        }
    }

    #[test]
    fn test_labelled_click_handler() {
        let (mut engine, _) = engine();
        let node = Node::new("div").on("onClick", "k").attr("aria-label", "foo");
        assert!(!ids(&eval(&mut engine, &node)).contains(&NO_LABEL));

        let node = Node::new("div")
            .on("onClick", "k")
            .child(Child::Undefined)
            .child(" bar");
        assert!(!ids(&eval(&mut engine, &node)).contains(&NO_LABEL));
    }

    #[test]
    fn test_button_role_without_key_handler() {
        let (mut engine, _) = engine();
        let node = Node::new("span").on("onClick", "k").attr("role", "button");

        assert_eq!(
            ids(&eval(&mut engine, &node)),
            vec![NO_LABEL, BUTTON_ROLE_SPACE, BUTTON_ROLE_ENTER, NO_TABINDEX]
        );

        let with_key = node.clone().on("onKeyDown", "kd");
        assert_eq!(ids(&eval(&mut engine, &with_key)), vec![NO_LABEL, NO_TABINDEX]);
    }

    #[test]
    fn test_mobile_suppresses_only_keyboard_rules() {
        let node = Node::new("span").on("onClick", "k").attr("role", "button");
        let (mut engine, _) = engine();

        let desktop = engine.evaluate_for(&node, &AncestorChain::root(), &DeviceProfile::desktop());
        let mobile = engine.evaluate_for(&node, &AncestorChain::root(), &DeviceProfile::mobile());

        let suppressed: Vec<_> = ids(&desktop)
            .into_iter()
            .filter(|id| !ids(&mobile).contains(id))
            .collect();
        assert_eq!(suppressed, vec![BUTTON_ROLE_SPACE, BUTTON_ROLE_ENTER]);
        assert_eq!(ids(&mobile), vec![NO_LABEL, NO_TABINDEX]);
    }

    #[test]
    fn test_tab_index() {
        let (mut engine, _) = engine();
        let with_string = Node::new("div").on("onClick", "k").attr("tabIndex", "0");
        let with_number = Node::new("div").on("onClick", "k").attr("tabIndex", 0);
        let anchor = Node::new("a").on("onClick", "k").attr("href", "foo");
        let button = Node::new("button").on("onClick", "k");

        for node in [with_string, with_number, anchor, button] {
            assert!(!ids(&eval(&mut engine, &node)).contains(&NO_TABINDEX));
        }
    }

    #[test]
    fn test_image_rules() {
        let (mut engine, _) = engine();

        let missing = Node::new("img").attr("src", "foo.jpg");
        assert_eq!(ids(&eval(&mut engine, &missing)), vec![MISSING_ALT]);

        let proper = Node::new("img").attr("src", "foo.jpg").attr("alt", "a foo, ofc");
        assert!(eval(&mut engine, &proper).is_empty());

        let redundant = Node::new("img").attr("src", "cat.gif").attr("alt", "image of a cat");
        assert_eq!(ids(&eval(&mut engine, &redundant)), vec![REDUDANT_ALT]);

        // Case-sensitive substring match
        let capital = Node::new("img").attr("alt", "Image of a cat");
        assert!(eval(&mut engine, &capital).is_empty());
        let inside = Node::new("img").attr("alt", "imagery");
        assert_eq!(ids(&eval(&mut engine, &inside)), vec![REDUDANT_ALT]);

        let decorative = Node::new("img").attr("alt", "");
        assert!(eval(&mut engine, &decorative).is_empty());
    }

    #[test]
    fn test_hash_href() {
        let (mut engine, _) = engine();
        let hash = Node::new("a").on("onClick", "k").attr("href", "#");
        assert!(ids(&eval(&mut engine, &hash)).contains(&HASH_HREF_NEEDS_BUTTON));

        let real = Node::new("a").on("onClick", "k").attr("href", "/foo/bar");
        assert!(!ids(&eval(&mut engine, &real)).contains(&HASH_HREF_NEEDS_BUTTON));

        let plain = Node::new("a").attr("href", "#").child("top");
        assert_eq!(ids(&eval(&mut engine, &plain)), vec![HASH_HREF_NEEDS_BUTTON]);
    }

    #[test]
    fn test_report_logs_and_emits() {
        let (mut engine, channel) = engine();
        let foo = Node::new("img").attr("id", "foo").attr("src", "foo.jpg");
        let bar = Node::new("img").attr("id", "bar").attr("src", "foo.jpg");

        engine.on_node(&foo, &AncestorChain::root());
        engine.on_node(&bar, &AncestorChain::root());

        let failures = engine.get_failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].node_id.as_deref(), Some("foo"));
        assert_eq!(failures[1].node_id.as_deref(), Some("bar"));

        // Same message twice: two log entries, one channel key
        assert_eq!(channel.emitted(), 2);
        assert_eq!(channel.messages().len(), 1);
    }

    #[test]
    fn test_filter_drops_silently() {
        let channel = CollectingChannel::new();
        let mut engine = Engine::new(
            Options::new()
                .with_channel(channel.clone())
                .with_filter(|_tag, id, _msg| id == Some("bar")),
        );

        let foo = Node::new("img").attr("id", "foo");
        let bar = Node::new("img").attr("id", "bar");

        engine.on_node(&foo, &AncestorChain::root());
        assert!(engine.get_failures().is_empty());
        assert_eq!(channel.emitted(), 0);

        engine.on_node(&bar, &AncestorChain::root());
        let failures = engine.get_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].node_id.as_deref(), Some("bar"));
    }

    #[test]
    fn test_install_replaces_configuration() {
        let (mut engine, _) = engine();
        engine.on_node(&Node::new("img"), &AncestorChain::root());
        assert_eq!(engine.failures().len(), 1);

        let channel = CollectingChannel::new();
        engine.install(Options::new().with_device("mobile").with_channel(channel.clone()));
        assert!(engine.failures().is_empty());
        assert!(engine.device().contains("mobile"));

        engine.install(Options::new().with_channel(channel));
        assert!(engine.device().is_empty());
    }

    #[test]
    fn test_config_overrides() {
        let mut config = Config::new();
        config.rules.disabled.push("props.onClick.*".to_string());
        config
            .rules
            .messages
            .insert(MISSING_ALT.to_string(), "custom".to_string());
        config
            .rules
            .severity
            .insert(MISSING_ALT.to_string(), crate::diagnostic::Severity::Info);

        let mut engine = Engine::new(
            Options::from_config(config).with_channel(crate::sink::NullChannel),
        );

        let clickable = Node::new("div").on("onClick", "k");
        assert!(eval(&mut engine, &clickable).is_empty());

        let diags = eval(&mut engine, &Node::new("img"));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "custom");
        assert_eq!(diags[0].severity, crate::diagnostic::Severity::Info);
    }

    #[test]
    fn test_config_filter_and_device() {
        let mut config = Config::new();
        config.device.push("mobile".to_string());
        config.filter.ids.push("bar".to_string());

        let mut engine = Engine::new(
            Options::from_config(config).with_channel(crate::sink::NullChannel),
        );
        assert!(engine.device().contains("mobile"));

        engine.on_node(&Node::new("img").attr("id", "foo"), &AncestorChain::root());
        engine.on_node(&Node::new("img").attr("id", "bar"), &AncestorChain::root());
        assert_eq!(engine.failures().len(), 1);
    }

    #[test]
    fn test_faulty_rule_is_isolated() {
        let (mut engine, channel) = engine();
        engine
            .register_rule(Rule::new("custom.BROKEN", "never", |_| {
                Err(RuleError::Failed("bad input".to_string()))
            }))
            .unwrap();
        engine
            .register_rule(Rule::simple("custom.PANICS", "never", |_| panic!("boom")))
            .unwrap();

        let node = Node::new("img");
        assert_eq!(ids(&eval(&mut engine, &node)), vec![MISSING_ALT]);
        assert_eq!(ids(&eval(&mut engine, &node)), vec![MISSING_ALT]);

        let defects = channel.defects();
        assert_eq!(defects.len(), 2, "each defect is signalled once: {:?}", defects);
        assert_eq!(defects[0].0, "custom.BROKEN");
        assert_eq!(defects[1].0, "custom.PANICS");
        assert!(defects[1].1.contains("boom"));

        engine.reset();
        eval(&mut engine, &node);
        assert_eq!(channel.defects().len(), 4);
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let (mut engine, _) = engine();
        let err = engine
            .register_rule(Rule::simple(MISSING_ALT, "dup", |_| true))
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateRule(id) if id == MISSING_ALT));
    }

    #[test]
    fn test_disabled_rule_never_fires() {
        let (mut engine, channel) = engine();
        engine
            .register_rule(Rule::simple("custom.img.OFF", "off", |_| true).disabled())
            .unwrap();

        assert_eq!(ids(&eval(&mut engine, &Node::new("img"))), vec![MISSING_ALT]);
        assert!(!channel.has_rule("custom.img.OFF"));
    }

    #[test]
    fn test_shared_rule_id_reports_once() {
        let channel = CollectingChannel::new();
        let rules = vec![
            Rule::simple("custom.div.TWICE", "first", |_| true),
            Rule::simple("custom.div.TWICE", "second", |_| true),
        ];
        let mut engine = Engine::with_rules(rules, Options::new().with_channel(channel.clone()));

        let diags = eval(&mut engine, &Node::new("div"));
        assert_eq!(ids(&diags), vec!["custom.div.TWICE"]);
        assert_eq!(diags[0].message, "first");
        assert_eq!(engine.failures().len(), 1);
        assert_eq!(channel.emitted(), 1);
    }

    #[test]
    fn test_custom_rule_sees_ancestors() {
        let (mut engine, _) = engine();
        engine
            .register_rule(
                Rule::new("custom.NESTED_BUTTON", "nested", |ctx| {
                    Ok(crate::query::nearest_ancestor_with_role(ctx.ancestors, Some("button"))
                        .is_some())
                })
                .for_tag("button"),
            )
            .unwrap();

        let outer = Node::new("div").attr("role", "button");
        let chain = AncestorChain::root().with_parent(&outer);
        let diags = engine.evaluate(&Node::new("button"), &chain);
        assert_eq!(ids(&diags), vec!["custom.NESTED_BUTTON"]);
    }

    struct RecordingHost {
        hook: Option<Box<dyn NodeHook>>,
    }

    impl Host for RecordingHost {
        fn set_hook(&mut self, hook: Box<dyn NodeHook>) {
            self.hook = Some(hook);
        }
    }

    impl RecordingHost {
        fn construct(&mut self, node: &Node) {
            if let Some(hook) = self.hook.as_mut() {
                hook.on_node(node, &AncestorChain::root());
            }
        }
    }

    #[test]
    fn test_install_on_host() {
        let mut host = RecordingHost { hook: None };
        let channel = CollectingChannel::new();
        let first = install(&mut host, Options::new().with_channel(channel.clone()));

        host.construct(&Node::new("img").attr("id", "foo"));
        host.construct(&Node::new("img").attr("id", "bar"));
        assert_eq!(first.get_failures().len(), 2);
        assert!(channel.has_message(default_message(MISSING_ALT).unwrap()));

        let second = install(
            &mut host,
            Options::new()
                .with_channel(channel)
                .with_filter(|_, id, _| id == Some("bar")),
        );
        host.construct(&Node::new("img").attr("id", "foo"));
        host.construct(&Node::new("img").attr("id", "bar"));

        assert_eq!(second.get_failures().len(), 1);
        assert_eq!(first.get_failures().len(), 2);

        second.reset();
        assert!(second.get_failures().is_empty());
    }
}
