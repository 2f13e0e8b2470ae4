//! a11y-hook - Accessibility diagnostics for UI component trees
//!
//! Installs a per-node hook into a host that builds UI trees declaratively.
//! Every constructed node runs through a catalog of accessibility rules;
//! violations are filtered, logged and emitted through a diagnostic channel.
//!
//! # Architecture
//!
//! ```text
//! Host -> NodeHook -> Engine -> Rule catalog -> Diagnostic -> filter -> FailureLog + channel
//! ```
//!
//! # Example
//!
//! ```
//! use a11y_hook::{install, CollectingChannel, MarkupHost, Options};
//!
//! let channel = CollectingChannel::new();
//! let mut host = MarkupHost::new();
//! let handle = install(&mut host, Options::new().with_channel(channel.clone()));
//!
//! host.render(r#"<img id="foo" src="foo.jpg"/>"#).unwrap();
//!
//! let failures = handle.get_failures();
//! assert_eq!(failures.len(), 1);
//! assert_eq!(failures[0].rule_id, "tags.img.MISSING_ALT");
//! ```
//!
//! # Configuration
//!
//! `.a11yrc.yaml`:
//!
//! ```yaml
//! device: [mobile]
//! rules:
//!   disabled:
//!     - props.onClick.NO_ROLE
//!   severity:
//!     tags.img.REDUDANT_ALT: error
//! filter:
//!   ids: [checkout]
//! ```

pub mod config;
pub mod device;
pub mod diagnostic;
pub mod engine;
pub mod markup;
pub mod node;
pub mod output;
pub mod query;
pub mod rule;
pub mod rules;
pub mod sink;

// Re-export main types
pub use config::{Config, ConfigError};
pub use device::DeviceProfile;
pub use diagnostic::{Diagnostic, Severity};
pub use engine::{install, Engine, EngineError, EngineHandle, Host, NodeHook, Options};
pub use markup::{MarkupError, MarkupHost};
pub use node::{AncestorChain, AttrValue, Child, Handler, Node};
pub use rule::{Rule, RuleContext, RuleError};
pub use rules::builtin_rules;
pub use sink::{
    CollectingChannel, ConsoleChannel, DiagnosticChannel, FailureLog, FilterPredicate,
    LogChannel, NullChannel,
};
