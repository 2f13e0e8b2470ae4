//! Tree node model
//!
//! The shape every rule reads: a tag, an attribute map and an ordered list of
//! children. Nodes are built once by the host and never mutated by the engine.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Identity attribute exposed as the diagnostic node id
pub const ID_ATTRIBUTE: &str = "id";

/// Reference to a callable attribute value (e.g. an `onClick` handler).
///
/// The engine never invokes handlers; it only needs to know one is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler(Arc<str>);

impl Handler {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Name of the referenced callable
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0)
    }
}

/// Attribute value tagged union
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Number(f64),
    Bool(bool),
    Handler(Handler),
    /// Explicit null; treated as absent
    Null,
    /// Explicit undefined; treated as absent
    Undefined,
}

impl AttrValue {
    /// Create a handler reference
    pub fn handler(name: &str) -> Self {
        AttrValue::Handler(Handler::new(name))
    }

    /// Whether the value counts as "not set"
    pub fn is_absent(&self) -> bool {
        matches!(self, AttrValue::Null | AttrValue::Undefined)
    }

    pub fn is_handler(&self) -> bool {
        matches!(self, AttrValue::Handler(_))
    }

    /// String content, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Non-empty string content
    pub fn as_non_empty_str(&self) -> Option<&str> {
        self.as_str().filter(|s| !s.is_empty())
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Number(f64::from(n))
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<Handler> for AttrValue {
    fn from(h: Handler) -> Self {
        AttrValue::Handler(h)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => write!(f, "{}", s),
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Handler(h) => write!(f, "{}", h),
            AttrValue::Null => write!(f, "null"),
            AttrValue::Undefined => write!(f, "undefined"),
        }
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttrValue::Str(s) => serializer.serialize_str(s),
            AttrValue::Number(n) => serializer.serialize_f64(*n),
            AttrValue::Bool(b) => serializer.serialize_bool(*b),
            AttrValue::Handler(h) => serializer.serialize_str(&h.to_string()),
            AttrValue::Null | AttrValue::Undefined => serializer.serialize_none(),
        }
    }
}

/// One entry of a node's children list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Child {
    Element(Node),
    Text(String),
    Number(f64),
    /// Semantically absent, never dereferenced
    Null,
    /// Semantically absent, never dereferenced
    Undefined,
}

impl Child {
    /// The element behind this child, if any
    pub fn as_element(&self) -> Option<&Node> {
        match self {
            Child::Element(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Child::Null | Child::Undefined)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Element(node)
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Child::Text(s.to_string())
    }
}

impl From<String> for Child {
    fn from(s: String) -> Self {
        Child::Text(s)
    }
}

impl From<f64> for Child {
    fn from(n: f64) -> Self {
        Child::Number(n)
    }
}

impl From<i32> for Child {
    fn from(n: i32) -> Self {
        Child::Number(f64::from(n))
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        value.map_or(Child::Undefined, Into::into)
    }
}

/// A constructed UI element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub tag: String,
    pub attributes: BTreeMap<String, AttrValue>,
    pub children: Vec<Child>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute
    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Set a handler attribute
    pub fn on(self, name: &str, handler: &str) -> Self {
        self.attr(name, AttrValue::handler(handler))
    }

    /// Append a child
    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Get an attribute value; null/undefined count as absent
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name).filter(|v| !v.is_absent())
    }

    /// Get a string attribute value
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_str)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Identity exposed to filters and diagnostics
    pub fn id(&self) -> Option<String> {
        match self.get(ID_ATTRIBUTE)? {
            AttrValue::Str(s) => Some(s.clone()),
            AttrValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Present child elements, skipping leaves and absent entries
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_element)
    }

    /// Every element below this node, without recursion
    pub fn descendants(&self) -> impl Iterator<Item = &Node> {
        let mut pending: Vec<&Node> = self.elements().collect();
        std::iter::from_fn(move || {
            let next = pending.pop()?;
            pending.extend(next.elements());
            Some(next)
        })
    }
}

// Nested children are released one level at a time.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_elements(&mut self.children, &mut pending);
        while let Some(mut node) = pending.pop() {
            take_elements(&mut node.children, &mut pending);
        }
    }
}

fn take_elements(children: &mut Vec<Child>, pending: &mut Vec<Node>) {
    if !children.iter().any(|c| matches!(c, Child::Element(_))) {
        return;
    }
    for child in children.drain(..) {
        if let Child::Element(node) = child {
            pending.push(node);
        }
    }
}

/// Ancestors of a node under evaluation, iterated nearest first.
///
/// Stored root first so a traversal can lend its open path without copying.
#[derive(Debug, Clone, Default)]
pub struct AncestorChain<'a> {
    path: Cow<'a, [&'a Node]>,
}

impl<'a> AncestorChain<'a> {
    /// Empty chain (root node)
    pub fn root() -> Self {
        Self {
            path: Cow::Borrowed(&[]),
        }
    }

    /// Build from a list ordered nearest first
    pub fn new(mut nodes: Vec<&'a Node>) -> Self {
        nodes.reverse();
        Self {
            path: Cow::Owned(nodes),
        }
    }

    /// Borrow a path ordered root first, immediate parent last
    pub fn from_path(path: &'a [&'a Node]) -> Self {
        Self {
            path: Cow::Borrowed(path),
        }
    }

    /// Chain for a child of `parent`
    pub fn with_parent(&self, parent: &'a Node) -> Self {
        let mut path = self.path.to_vec();
        path.push(parent);
        Self {
            path: Cow::Owned(path),
        }
    }

    /// Immediate parent
    pub fn parent(&self) -> Option<&'a Node> {
        self.path.last().copied()
    }

    /// Nearest first; `next_back` yields the root
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a Node> + '_ {
        self.path.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
