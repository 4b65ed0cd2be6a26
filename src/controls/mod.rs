//! Form controls: leaf widgets bound to exactly one named field.
//!
//! Every control implements [`FormControl`]. It reads and writes its value
//! only through the [`FieldBinding`] inside the [`ControlContext`], and renders
//! the same chrome: a label (`"{label} *"` when required), the input
//! affordance, and an error line when the field has an error.
//!
//! Built-in variants: [`TextEntry`], [`Checkbox`], [`RadioGroup`],
//! [`Dropdown`] and [`Toggle`], all pre-registered in
//! [`ControlRegistry::with_defaults`].

mod checkbox;
mod dropdown;
mod radio_group;
mod registry;
mod text_entry;
mod toggle;

pub use checkbox::Checkbox;
pub use dropdown::{Dropdown, DROPDOWN_PLACEHOLDER};
pub use radio_group::RadioGroup;
pub use registry::ControlRegistry;
pub use text_entry::TextEntry;
pub use toggle::Toggle;

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::binding::FieldBinding;
use crate::form::{ChoiceOption, FieldConfig};
use crate::style::{merge_styles, FieldStyles, FontWeight, Style};
use crate::value::FieldValue;
use crate::view::{ids, Element, KeyboardType, Role};

// ---------------------------------------------------------------------------
// FormControl
// ---------------------------------------------------------------------------

/// A widget that edits one named field.
///
/// # Examples
///
/// ```ignore
/// struct Stars;
///
/// impl FormControl for Stars {
///     fn render(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
///         let rating = ctx.get(props.name);
///         Element::text(format!("{rating} stars")).with_test_id(ids::input(props.name))
///     }
/// }
/// ```
pub trait FormControl {
    /// Build the element tree for the field's current value.
    fn render(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element;
}

// ---------------------------------------------------------------------------
// ControlProps
// ---------------------------------------------------------------------------

static NO_STYLES: FieldStyles = FieldStyles {
    container: None,
    label: None,
    error: None,
    input: None,
    options_container: None,
    option: None,
    selected_option: None,
    radio: None,
    selected: None,
    option_label: None,
};

/// Everything a control needs to know about its field, borrowed from config.
#[derive(Debug, Clone, Copy)]
pub struct ControlProps<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub required: bool,
    pub error: Option<&'a str>,
    pub disabled: bool,
    pub options: &'a [ChoiceOption],
    pub placeholder: Option<&'a str>,
    pub secure: bool,
    pub keyboard: KeyboardType,
    pub styles: &'a FieldStyles,
    /// Opaque passthrough for custom controls.
    pub props: Option<&'a Map<String, Value>>,
}

impl<'a> ControlProps<'a> {
    pub fn new(name: &'a str, label: &'a str) -> Self {
        Self {
            name,
            label,
            required: false,
            error: None,
            disabled: false,
            options: &[],
            placeholder: None,
            secure: false,
            keyboard: KeyboardType::Default,
            styles: &NO_STYLES,
            props: None,
        }
    }

    /// Props carrying everything `field` declares. Error and engine-level
    /// disabling are layered on by the caller.
    pub fn from_field(field: &'a FieldConfig) -> Self {
        Self {
            name: &field.name,
            label: &field.label,
            required: field.required,
            error: None,
            disabled: field.disabled,
            options: &field.options,
            placeholder: field.placeholder.as_deref(),
            secure: field.secure,
            keyboard: field.keyboard.unwrap_or_default(),
            styles: &field.styles,
            props: Some(&field.props),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_options(mut self, options: &'a [ChoiceOption]) -> Self {
        self.options = options;
        self
    }

    pub fn with_styles(mut self, styles: &'a FieldStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Label as displayed: `"{label} *"` for required fields.
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.to_owned()
        }
    }

    /// A passthrough prop by key.
    pub fn prop(&self, key: &str) -> Option<&'a Value> {
        self.props.and_then(|p| p.get(key))
    }
}

// ---------------------------------------------------------------------------
// ControlContext
// ---------------------------------------------------------------------------

/// Which dropdown overlays are currently presented, by field name.
#[derive(Debug, Default)]
pub struct OverlayState {
    open: RefCell<HashSet<String>>,
}

impl OverlayState {
    pub fn open(&self, name: &str) {
        self.open.borrow_mut().insert(name.to_owned());
    }

    pub fn close(&self, name: &str) {
        self.open.borrow_mut().remove(name);
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.open.borrow().contains(name)
    }

    pub fn close_all(&self) {
        self.open.borrow_mut().clear();
    }
}

/// Shared per-form state handed to every control.
#[derive(Clone)]
pub struct ControlContext {
    binding: Rc<dyn FieldBinding>,
    overlays: Rc<OverlayState>,
}

impl ControlContext {
    pub fn new(binding: Rc<dyn FieldBinding>) -> Self {
        Self {
            binding,
            overlays: Rc::new(OverlayState::default()),
        }
    }

    pub fn binding(&self) -> &Rc<dyn FieldBinding> {
        &self.binding
    }

    pub fn overlays(&self) -> &Rc<OverlayState> {
        &self.overlays
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> FieldValue {
        self.binding.get(name)
    }

    /// A writer for the field that does nothing while `disabled`.
    pub fn setter(&self, props: &ControlProps<'_>) -> impl Fn(FieldValue) + Clone + 'static {
        let binding = self.binding.clone();
        let name = props.name.to_owned();
        let disabled = props.disabled;
        move |value| {
            if disabled {
                return;
            }
            binding.set(&name, value);
        }
    }
}

impl fmt::Debug for ControlContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlContext")
            .field("overlays", &self.overlays)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Shared chrome
// ---------------------------------------------------------------------------

pub(crate) const ACCENT: &str = "#007AFF";
pub(crate) const BORDER: &str = "#ccc";
pub(crate) const ERROR: &str = "red";
pub(crate) const DISABLED_OPACITY: f32 = 0.5;

pub(crate) fn dimmed() -> Style {
    Style::new().opacity(DISABLED_OPACITY)
}

pub(crate) fn input_box() -> Style {
    Style::new()
        .border_width(1.0)
        .border_color(BORDER)
        .border_radius(4.0)
        .font_size(16.0)
        .background_color("#fff")
}

/// Outer wrapper of every control.
pub(crate) fn container(props: &ControlProps<'_>) -> Element {
    Element::view().with_styles(merge_styles(
        Style::new().margin_bottom(16.0),
        props.styles.container.as_ref(),
    ))
}

/// The `label-{name}` text, or nothing for an empty label.
pub(crate) fn label(props: &ControlProps<'_>) -> Option<Element> {
    if props.label.is_empty() {
        return None;
    }
    let text = props.display_label();
    Some(
        Element::text(text.clone())
            .with_test_id(ids::label(props.name))
            .with_accessibility_label(text)
            .with_styles(merge_styles(
                Style::new()
                    .font_size(16.0)
                    .margin_bottom(8.0)
                    .font_weight(FontWeight::Medium),
                props.styles.label.as_ref(),
            )),
    )
}

/// The `error-{name}` text when the field has an error.
pub(crate) fn error(props: &ControlProps<'_>) -> Option<Element> {
    let message = props.error?;
    Some(
        Element::text(message)
            .with_test_id(ids::error(props.name))
            .with_accessibility_label(format!("Error: {message}"))
            .with_role(Role::Alert)
            .with_styles(merge_styles(
                Style::new().color(ERROR).font_size(12.0).margin_top(4.0),
                props.styles.error.as_ref(),
            )),
    )
}

/// `container [label, body, error]`.
pub(crate) fn field_shell(props: &ControlProps<'_>, body: Element) -> Element {
    container(props)
        .with_child_opt(label(props))
        .with_child(body)
        .with_child_opt(error(props))
}

// ===========================================================================
// Tests
// ===========================================================================
