//! Built-in accessibility rules
//!
//! Catalog order is the evaluation and reporting order.

use crate::device::MOBILE;
use crate::diagnostic::Severity;
use crate::query;
use crate::rule::Rule;

pub const NO_LABEL: &str = "props.onClick.NO_LABEL";
pub const NO_ROLE: &str = "props.onClick.NO_ROLE";
pub const BUTTON_ROLE_SPACE: &str = "props.onClick.BUTTON_ROLE_SPACE";
pub const BUTTON_ROLE_ENTER: &str = "props.onClick.BUTTON_ROLE_ENTER";
pub const NO_TABINDEX: &str = "props.onClick.NO_TABINDEX";
pub const MISSING_ALT: &str = "tags.img.MISSING_ALT";
pub const REDUDANT_ALT: &str = "tags.img.REDUDANT_ALT";
pub const HASH_HREF_NEEDS_BUTTON: &str = "tags.a.HASH_HREF_NEEDS_BUTTON";

const CLICK: &str = "onClick";
const KEY_DOWN: &str = "onKeyDown";

/// Default message template for a built-in rule id
pub fn default_message(rule_id: &str) -> Option<&'static str> {
    let msg = match rule_id {
        NO_LABEL => {
            "You have a click handler on an element with no discernible text. \
             Add `aria-label`, `aria-labelledby`, text content, or an image with `alt` text."
        }
        NO_ROLE => {
            "You have a click handler on a non-interactive element but no `role` DOM property. \
             It will be unclear what this element is supposed to do to a screen-reader user. \
             http://www.w3.org/TR/wai-aria/roles#role_definitions"
        }
        BUTTON_ROLE_SPACE => {
            "You have `role=\"button\"` but did not define an `onKeyDown` handler. \
             Add it, and have the \"Space\" key do the same thing as an `onClick` handler."
        }
        BUTTON_ROLE_ENTER => {
            "You have `role=\"button\"` but did not define an `onKeyDown` handler. \
             Add it, and have the \"Enter\" key do the same thing as an `onClick` handler."
        }
        NO_TABINDEX => {
            "You have a click handler on a non-interactive element but no `tabIndex` DOM property. \
             The element will not be navigable or interactive by keyboard users. \
             http://www.w3.org/TR/wai-aria-practices/#focus_tabindex"
        }
        MISSING_ALT => {
            "You forgot an `alt` DOM property on an image. \
             Screen-reader users will not know what it is."
        }
        REDUDANT_ALT => {
            "Screen-readers already announce `img` tags as an image, \
             you don't need to use the word \"image\" in the description"
        }
        HASH_HREF_NEEDS_BUTTON => {
            "You have an anchor with `href=\"#\"`; if it only runs a click handler, use a button instead."
        }
        _ => return None,
    };
    Some(msg)
}

fn message(rule_id: &str) -> &'static str {
    default_message(rule_id).unwrap_or_default()
}

/// Get all built-in rules in catalog order
pub fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::simple(NO_LABEL, message(NO_LABEL), |node| {
            !query::has_accessible_label(node)
        })
        .with_severity(Severity::Error)
        .requires_handler(CLICK)
        .with_description("Clickable elements need a name for assistive technology")
        .with_tag("label"),

        Rule::simple(NO_ROLE, message(NO_ROLE), |node| !query::has_role(node, None))
            .requires_handler(CLICK)
            .with_docs("http://www.w3.org/TR/wai-aria/roles#role_definitions")
            .with_tag("role"),

        Rule::simple(BUTTON_ROLE_SPACE, message(BUTTON_ROLE_SPACE), button_without_key_handler)
            .requires_handler(CLICK)
            .exempt_on(MOBILE)
            .with_tag("keyboard"),

        Rule::simple(BUTTON_ROLE_ENTER, message(BUTTON_ROLE_ENTER), button_without_key_handler)
            .requires_handler(CLICK)
            .exempt_on(MOBILE)
            .with_tag("keyboard"),

        Rule::simple(NO_TABINDEX, message(NO_TABINDEX), |node| {
            !query::is_natively_interactive(node) && !node.has("tabIndex")
        })
        .requires_handler(CLICK)
        .with_docs("http://www.w3.org/TR/wai-aria-practices/#focus_tabindex")
        .with_tag("keyboard"),

        Rule::simple(MISSING_ALT, message(MISSING_ALT), |node| !node.has("alt"))
            .with_severity(Severity::Error)
            .for_tag("img")
            .with_tag("alt"),

        // Plain substring match, case-sensitive.
        Rule::simple(REDUDANT_ALT, message(REDUDANT_ALT), |node| {
            node.get_str("alt").is_some_and(|alt| alt.contains("image"))
        })
        .for_tag("img")
        .with_tag("alt"),

        Rule::simple(HASH_HREF_NEEDS_BUTTON, message(HASH_HREF_NEEDS_BUTTON), |node| {
            node.get_str("href") == Some("#")
        })
        .for_tag("a")
        .with_tag("role"),
    ]
}

fn button_without_key_handler(node: &crate::node::Node) -> bool {
    query::has_role(node, Some("button")) && !query::has_handler(node, KEY_DOWN)
}
