//! Markup host adapter
//!
//! Builds node trees from JSX-like markup and runs the installed hook on every
//! constructed node. Attribute and text values in braces map to typed values:
//!
//! | markup          | value                      |
//! |-----------------|----------------------------|
//! | `{null}`        | `AttrValue::Null`          |
//! | `{undefined}`   | `AttrValue::Undefined`     |
//! | `{true}`        | `AttrValue::Bool(true)`    |
//! | `{0}`           | `AttrValue::Number(0.0)`   |
//! | `{anything}`    | `AttrValue::Handler(..)`   |
//! | `"text"`        | `AttrValue::Str("text")`   |

use crate::engine::{Host, NodeHook};
use crate::node::{AncestorChain, AttrValue, Child, Node};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Markup error
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("XML error at line {line}: {message}")]
    Xml { line: usize, message: String },

    #[error("Unclosed element <{0}>")]
    Unclosed(String),
}

/// Parse markup into root nodes
pub fn parse(content: &str) -> Result<Vec<Node>, MarkupError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut roots: Vec<Node> = Vec::new();
    let mut stack: Vec<Node> = Vec::new();
    let mut buf = Vec::new();

    let line_at = |pos: u64| -> usize {
        let pos = (pos as usize).min(content.len());
        content[..pos].matches('\n').count() + 1
    };

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| MarkupError::Xml {
            line: line_at(reader.buffer_position()),
            message: e.to_string(),
        })?;

        match event {
            Event::Start(e) => {
                let node = element(&e).map_err(|message| MarkupError::Xml {
                    line: line_at(reader.buffer_position()),
                    message,
                })?;
                stack.push(node);
            }

            Event::Empty(e) => {
                let node = element(&e).map_err(|message| MarkupError::Xml {
                    line: line_at(reader.buffer_position()),
                    message,
                })?;
                attach(&mut stack, &mut roots, node);
            }

            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut roots, node);
                }
            }

            Event::Text(e) => {
                let text = e.unescape().map_err(|err| MarkupError::Xml {
                    line: line_at(reader.buffer_position()),
                    message: err.to_string(),
                })?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.extend(text_children(&text));
                }
            }

            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).to_string();
                if let Some(parent) = stack.last_mut() {
                    if !text.trim().is_empty() {
                        parent.children.push(Child::Text(text));
                    }
                }
            }

            Event::Eof => break,

            _ => {}
        }

        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(MarkupError::Unclosed(open.tag.clone()));
    }

    log::debug!("parsed {} root node(s)", roots.len());
    Ok(roots)
}

fn element(start: &BytesStart<'_>) -> Result<Node, String> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut node = Node::new(&tag);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let raw = attr.unescape_value().map_err(|e| e.to_string())?;
        node.attributes.insert(key, attr_value(&raw));
    }

    Ok(node)
}

fn attach(stack: &mut [Node], roots: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Child::Element(node)),
        None => roots.push(node),
    }
}

/// Convert a raw attribute value
pub fn attr_value(raw: &str) -> AttrValue {
    let Some(expr) = braced(raw) else {
        return AttrValue::Str(raw.to_string());
    };

    match expr {
        "null" => AttrValue::Null,
        "undefined" => AttrValue::Undefined,
        "true" => AttrValue::Bool(true),
        "false" => AttrValue::Bool(false),
        _ => match expr.parse::<f64>() {
            Ok(n) => AttrValue::Number(n),
            Err(_) => AttrValue::handler(expr),
        },
    }
}

/// Split a text run into leaves at each `{..}` group.
///
/// Whitespace-only pieces are dropped; unknown expressions stay literal text.
fn text_children(text: &str) -> Vec<Child> {
    let mut children = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        push_text(&mut children, &rest[..open]);

        let group = &rest[open..=open + len];
        let child = match group[1..len].trim() {
            "null" => Child::Null,
            "undefined" => Child::Undefined,
            expr => match expr.parse::<f64>() {
                Ok(n) => Child::Number(n),
                Err(_) => Child::Text(group.to_string()),
            },
        };
        children.push(child);
        rest = &rest[open + len + 1..];
    }

    push_text(&mut children, rest);
    children
}

fn push_text(children: &mut Vec<Child>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        children.push(Child::Text(trimmed.to_string()));
    }
}

fn braced(raw: &str) -> Option<&str> {
    raw.strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .map(str::trim)
}

/// Run the hook on a tree, children before their parent
pub fn construct(node: &Node, hook: &mut dyn NodeHook) {
    // Open nodes root first, with a cursor over each one's children
    let mut path: Vec<&Node> = vec![node];
    let mut cursors = vec![node.children.iter()];

    while let Some(cursor) = cursors.last_mut() {
        match cursor.find_map(Child::as_element) {
            Some(child) => {
                path.push(child);
                cursors.push(child.children.iter());
            }
            None => {
                cursors.pop();
                if let Some(done) = path.pop() {
                    hook.on_node(done, &AncestorChain::from_path(&path));
                }
            }
        }
    }
}

/// Host that renders markup documents
#[derive(Default)]
pub struct MarkupHost {
    hook: Option<Box<dyn NodeHook>>,
}

impl MarkupHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a hook is installed
    pub fn is_hooked(&self) -> bool {
        self.hook.is_some()
    }

    /// Parse a document and construct every root
    pub fn render(&mut self, content: &str) -> Result<Vec<Node>, MarkupError> {
        let roots = parse(content)?;
        for root in &roots {
            self.construct(root);
        }
        Ok(roots)
    }

    /// Construct an already-built tree
    pub fn construct(&mut self, node: &Node) {
        if let Some(hook) = self.hook.as_mut() {
            construct(node, &mut **hook);
        }
    }
}

impl Host for MarkupHost {
    fn set_hook(&mut self, hook: Box<dyn NodeHook>) {
        self.hook = Some(hook);
    }
}
