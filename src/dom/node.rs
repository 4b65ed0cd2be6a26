//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

use crate::style::Style;
use crate::view::{Accessibility, ChangeHandler, Element, ElementKind, ElementProps, PressHandler};

new_key_type! {
    /// Unique identifier for a mounted node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single mounted node.
///
/// A flattened copy of an [`Element`] without its children: styles are
/// resolved once at mount time.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: ElementKind,
    /// Stable test identifier, if any.
    pub test_id: Option<String>,
    /// Text content of a `Text` node.
    pub text: Option<String>,
    /// Resolved style (all layers merged).
    pub style: Style,
    /// Resolved style while pressed.
    pub pressed_style: Style,
    pub accessibility: Accessibility,
    pub disabled: bool,
    pub props: ElementProps,
    pub on_press: Option<PressHandler>,
    pub on_change: Option<ChangeHandler>,
}

impl NodeData {
    /// Create bare node data of the given kind.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            test_id: None,
            text: None,
            style: Style::new(),
            pressed_style: Style::new(),
            accessibility: Accessibility::default(),
            disabled: false,
            props: ElementProps::default(),
            on_press: None,
            on_change: None,
        }
    }

    /// Copy everything but the children out of `element`.
    pub fn from_element(element: &Element) -> Self {
        Self {
            kind: element.kind(),
            test_id: element.test_id().map(str::to_owned),
            text: element.text_content().map(str::to_owned),
            style: element.style(),
            pressed_style: element.style_pressed(),
            accessibility: element.accessibility().clone(),
            disabled: element.is_disabled(),
            props: element.props().clone(),
            on_press: element.press_handler().cloned(),
            on_change: element.change_handler().cloned(),
        }
    }

    /// Set the test id (builder).
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set whether this node is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether a press on this node (or a descendant) stops here.
    ///
    /// Pressables always capture presses, even without a handler or while
    /// disabled; any other node captures only if it has a handler.
    pub fn captures_press(&self) -> bool {
        self.kind == ElementKind::Pressable || self.on_press.is_some()
    }

    /// Whether the node accepts value changes right now.
    pub fn accepts_change(&self) -> bool {
        !self.disabled && self.props.editable != Some(false) && self.on_change.is_some()
    }
}
