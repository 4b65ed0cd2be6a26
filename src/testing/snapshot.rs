//! Tree outlines for snapshot testing.
//!
//! One node per line, indented two spaces per level:
//!
//! ```text
//! View #field-agree
//!   Switch #toggle-agree [checked] value=false
//!   Text "Agree"
//! ```

use std::fmt::Write;

use crate::dom::{Dom, NodeData, NodeId};
use crate::view::Element;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Outline of an element tree.
///
/// # Examples
///
/// ```ignore
/// use gilt_forms::testing::render_tree;
/// use gilt_forms::view::Element;
///
/// let el = Element::view().with_child(Element::text("Hi"));
/// assert_eq!(render_tree(&el), "View\n  Text \"Hi\"");
/// ```
pub fn render_tree(element: &Element) -> String {
    dom_to_string(&Dom::mount(element))
}

/// Outline of a mounted tree.
pub fn dom_to_string(dom: &Dom) -> String {
    let mut lines = Vec::new();
    if let Some(root) = dom.root() {
        outline(dom, root, 0, &mut lines);
    }
    lines.join("\n")
}

/// Outline of the subtree rooted at the node with `test_id`, or an empty string.
pub fn subtree_to_string(dom: &Dom, test_id: &str) -> String {
    let mut lines = Vec::new();
    if let Some(id) = dom.query_by_test_id(test_id) {
        outline(dom, id, 0, &mut lines);
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn outline(dom: &Dom, id: NodeId, depth: usize, lines: &mut Vec<String>) {
    let Some(data) = dom.get(id) else {
        return;
    };
    lines.push(format!("{}{}", "  ".repeat(depth), describe(data)));
    for &child in dom.children(id) {
        outline(dom, child, depth + 1, lines);
    }
}

fn describe(data: &NodeData) -> String {
    let mut line = data.kind.as_str().to_owned();
    if let Some(id) = &data.test_id {
        let _ = write!(line, " #{id}");
    }
    if let Some(text) = &data.text {
        let _ = write!(line, " {text:?}");
    }
    if data.disabled {
        line.push_str(" [disabled]");
    }
    if data.accessibility.checked == Some(true) {
        line.push_str(" [checked]");
    }
    if data.accessibility.selected == Some(true) {
        line.push_str(" [selected]");
    }
    if data.props.visible == Some(false) {
        line.push_str(" [hidden]");
    }
    if let Some(value) = &data.props.value {
        let _ = write!(line, " value={value}");
    }
    line
}

// ===========================================================================
// Tests
// ===========================================================================
