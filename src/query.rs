//! Tree queries used by the rule catalog
//!
//! Every query treats missing or malformed data as "absent" and never panics on
//! null/undefined children.

use crate::node::{AncestorChain, AttrValue, Child, Node};

/// Tags treated as images
pub const IMAGE_TAGS: &[&str] = &["img"];

/// Tags that are always natively interactive
pub const BUTTON_TAGS: &[&str] = &["button", "input", "select", "textarea"];

/// Tags that are interactive when they carry an `href`
pub const ANCHOR_TAGS: &[&str] = &["a"];

/// Attributes that name an element for assistive technology
pub const LABEL_ATTRIBUTES: &[&str] = &["aria-label", "aria-labelledby", "aria-labelled-by"];

pub fn is_image(node: &Node) -> bool {
    IMAGE_TAGS.contains(&node.tag.as_str())
}

pub fn is_button_like(node: &Node) -> bool {
    BUTTON_TAGS.contains(&node.tag.as_str())
}

pub fn is_anchor(node: &Node) -> bool {
    ANCHOR_TAGS.contains(&node.tag.as_str())
}

/// Whether the node has a label attribute or label-producing content.
///
/// Content counts when any descendant is a non-empty text leaf, a number
/// leaf, or an image with a non-empty `alt`. An empty `alt` opts out.
pub fn has_accessible_label(node: &Node) -> bool {
    let labelled = LABEL_ATTRIBUTES
        .iter()
        .any(|attr| node.get(attr).and_then(AttrValue::as_non_empty_str).is_some());

    labelled || has_text_content(node) || has_labelled_descendant_image(node)
}

/// Whether any descendant is a non-empty text leaf or a number leaf
pub fn has_text_content(node: &Node) -> bool {
    std::iter::once(node)
        .chain(node.descendants())
        .any(|n| n.children.iter().any(is_text_leaf))
}

fn is_text_leaf(child: &Child) -> bool {
    match child {
        Child::Text(text) => !text.is_empty(),
        Child::Number(_) => true,
        Child::Element(_) | Child::Null | Child::Undefined => false,
    }
}

/// Whether any descendant is an image with a non-empty `alt`
pub fn has_labelled_descendant_image(node: &Node) -> bool {
    node.descendants()
        .any(|element| is_image(element) && has_non_empty_alt(element))
}

fn has_non_empty_alt(node: &Node) -> bool {
    node.get("alt").and_then(AttrValue::as_non_empty_str).is_some()
}

/// Buttons are always interactive, anchors only with a non-empty `href`
pub fn is_natively_interactive(node: &Node) -> bool {
    if is_button_like(node) {
        return true;
    }

    is_anchor(node)
        && node
            .get("href")
            .and_then(AttrValue::as_non_empty_str)
            .is_some()
}

/// Whether `role` is set, optionally to a specific value
pub fn has_role(node: &Node, value: Option<&str>) -> bool {
    match (node.get_str("role"), value) {
        (Some(role), Some(expected)) => role == expected,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Whether the attribute holds a callable; null/undefined never count
pub fn has_handler(node: &Node, attr: &str) -> bool {
    node.get(attr).is_some_and(AttrValue::is_handler)
}

/// Closest ancestor carrying a `role`, optionally a specific one
pub fn nearest_ancestor_with_role<'a>(
    ancestors: &AncestorChain<'a>,
    value: Option<&str>,
) -> Option<&'a Node> {
    ancestors.iter().find(|ancestor| has_role(ancestor, value))
}
