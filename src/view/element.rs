//! Element: the declarative value tree every component renders into.
//!
//! Components never draw. They return an [`Element`] describing kind, text,
//! layered styles, accessibility metadata and event handlers; a host renderer
//! (or the headless [`Dom`](crate::dom::Dom)) consumes the tree.

use std::fmt;
use std::rc::Rc;

use crate::style::{Style, StyleList};
use crate::value::FieldValue;

// ---------------------------------------------------------------------------
// ElementKind
// ---------------------------------------------------------------------------

/// The primitive an element maps to in the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    View,
    Text,
    TextInput,
    Pressable,
    Switch,
    ScrollView,
    KeyboardAvoiding,
    Overlay,
    ActivityIndicator,
}

impl ElementKind {
    /// Type name, as used for DOM queries and tree outlines.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::View => "View",
            ElementKind::Text => "Text",
            ElementKind::TextInput => "TextInput",
            ElementKind::Pressable => "Pressable",
            ElementKind::Switch => "Switch",
            ElementKind::ScrollView => "ScrollView",
            ElementKind::KeyboardAvoiding => "KeyboardAvoiding",
            ElementKind::Overlay => "Overlay",
            ElementKind::ActivityIndicator => "ActivityIndicator",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

/// On-screen keyboard layout hint for text entry. No validation effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardType {
    #[default]
    Default,
    EmailAddress,
    Numeric,
    PhonePad,
}

/// How a keyboard-avoiding container makes room for the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvoidBehavior {
    Padding,
    Height,
}

/// Accessibility role of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    None,
    Header,
    Button,
    Checkbox,
    Radio,
    Switch,
    Alert,
}

/// Accessibility metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accessibility {
    pub label: Option<String>,
    pub role: Option<Role>,
    pub checked: Option<bool>,
    pub selected: Option<bool>,
}

/// Kind-specific properties. Unused fields stay `None` / `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementProps {
    /// Current value of a text input or switch.
    pub value: Option<FieldValue>,
    pub placeholder: Option<String>,
    /// Masked text entry.
    pub secure: bool,
    pub keyboard: Option<KeyboardType>,
    /// `Some(false)` for a read-only text input.
    pub editable: Option<bool>,
    /// Presentation state of an overlay.
    pub visible: Option<bool>,
    pub behavior: Option<AvoidBehavior>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Callback fired when a pressable element is pressed.
#[derive(Clone)]
pub struct PressHandler(Rc<dyn Fn()>);

impl PressHandler {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl fmt::Debug for PressHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PressHandler")
    }
}

/// Callback fired when an input element reports a new value.
#[derive(Clone)]
pub struct ChangeHandler(Rc<dyn Fn(FieldValue)>);

impl ChangeHandler {
    pub fn new(f: impl Fn(FieldValue) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, value: FieldValue) {
        (self.0)(value)
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeHandler")
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A node of the declarative UI tree.
///
/// # Examples
///
/// ```ignore
/// let label = Element::text("Email *").with_test_id("label-email");
/// let row = Element::view()
///     .with_style(Style::new().flex_direction(FlexDirection::Row))
///     .with_child(label);
/// ```
#[derive(Debug, Clone)]
pub struct Element {
    kind: ElementKind,
    test_id: Option<String>,
    text: Option<String>,
    styles: StyleList,
    pressed_style: Option<Style>,
    accessibility: Accessibility,
    disabled: bool,
    props: ElementProps,
    on_press: Option<PressHandler>,
    on_change: Option<ChangeHandler>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element of the given kind with no content.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            test_id: None,
            text: None,
            styles: StyleList::new(),
            pressed_style: None,
            accessibility: Accessibility::default(),
            disabled: false,
            props: ElementProps::default(),
            on_press: None,
            on_change: None,
            children: Vec::new(),
        }
    }

    pub fn view() -> Self {
        Self::new(ElementKind::View)
    }

    pub fn text(content: impl Into<String>) -> Self {
        let mut el = Self::new(ElementKind::Text);
        el.text = Some(content.into());
        el
    }

    pub fn text_input() -> Self {
        Self::new(ElementKind::TextInput)
    }

    pub fn pressable() -> Self {
        Self::new(ElementKind::Pressable)
    }

    pub fn switch() -> Self {
        Self::new(ElementKind::Switch)
    }

    pub fn scroll_view() -> Self {
        Self::new(ElementKind::ScrollView)
    }

    pub fn keyboard_avoiding(behavior: AvoidBehavior) -> Self {
        let mut el = Self::new(ElementKind::KeyboardAvoiding);
        el.props.behavior = Some(behavior);
        el
    }

    pub fn overlay(visible: bool) -> Self {
        let mut el = Self::new(ElementKind::Overlay);
        el.props.visible = Some(visible);
        el
    }

    pub fn activity_indicator() -> Self {
        Self::new(ElementKind::ActivityIndicator)
    }

    // -- builders ----------------------------------------------------------

    /// Set the stable test identifier.
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    /// Append a style layer.
    pub fn with_style(mut self, style: Style) -> Self {
        self.styles.push(style);
        self
    }

    /// Replace all style layers.
    pub fn with_styles(mut self, styles: StyleList) -> Self {
        self.styles = styles;
        self
    }

    /// Layer applied on top of the resolved style while the element is held down.
    pub fn with_pressed_style(mut self, style: Style) -> Self {
        self.pressed_style = Some(style);
        self
    }

    pub fn with_accessibility_label(mut self, label: impl Into<String>) -> Self {
        self.accessibility.label = Some(label.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.accessibility.role = Some(role);
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.accessibility.checked = Some(checked);
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.accessibility.selected = Some(selected);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_value(mut self, value: FieldValue) -> Self {
        self.props.value = Some(value);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.props.placeholder = Some(placeholder.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.props.secure = secure;
        self
    }

    pub fn keyboard(mut self, keyboard: KeyboardType) -> Self {
        self.props.keyboard = Some(keyboard);
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.props.editable = Some(editable);
        self
    }

    pub fn on_press(mut self, f: impl Fn() + 'static) -> Self {
        self.on_press = Some(PressHandler::new(f));
        self
    }

    pub fn on_change(mut self, f: impl Fn(FieldValue) + 'static) -> Self {
        self.on_change = Some(ChangeHandler::new(f));
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child element when present.
    pub fn with_child_opt(mut self, child: Option<Element>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    /// Append several child elements.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    // -- accessors ---------------------------------------------------------

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn test_id(&self) -> Option<&str> {
        self.test_id.as_deref()
    }

    /// Text content of a `Text` element.
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The style layers in application order.
    pub fn styles(&self) -> &StyleList {
        &self.styles
    }

    /// All layers folded last-wins.
    pub fn style(&self) -> Style {
        self.styles.resolve()
    }

    /// Resolved style while held down; equals [`style`](Self::style) if no
    /// pressed layer is set.
    pub fn style_pressed(&self) -> Style {
        match &self.pressed_style {
            Some(pressed) => self.style().merge(pressed),
            None => self.style(),
        }
    }

    pub fn pressed_style(&self) -> Option<&Style> {
        self.pressed_style.as_ref()
    }

    pub fn accessibility(&self) -> &Accessibility {
        &self.accessibility
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn props(&self) -> &ElementProps {
        &self.props
    }

    pub fn press_handler(&self) -> Option<&PressHandler> {
        self.on_press.as_ref()
    }

    pub fn change_handler(&self) -> Option<&ChangeHandler> {
        self.on_change.as_ref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Consume the element, returning its children.
    pub fn into_children(self) -> Vec<Element> {
        self.children
    }
}

// ===========================================================================
// Tests
// ===========================================================================
