//! Form configuration: sections, fields, options and form-level metadata.
//!
//! Everything except component references and `refine` closures can be
//! loaded from JSON with [`FormConfig::from_json`].

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::controls::FormControl;
use crate::error::Result;
use crate::layout::{Layout, LayoutProps};
use crate::style::{FieldStyles, FormStyles};
use crate::validate::Rule;
use crate::value::{FieldValue, FormValues};
use crate::view::{AvoidBehavior, KeyboardType};

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// Tag selecting the control that renders a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum FieldType {
    Text,
    Dropdown,
    Checkbox,
    Radio,
    Toggle,
    /// A caller-registered tag.
    Custom(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Dropdown => "dropdown",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Toggle => "toggle",
            FieldType::Custom(tag) => tag,
        }
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => FieldType::Text,
            "dropdown" => FieldType::Dropdown,
            "checkbox" => FieldType::Checkbox,
            "radio" => FieldType::Radio,
            "toggle" => FieldType::Toggle,
            other => FieldType::Custom(other.to_owned()),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from(tag.as_str())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChoiceOption
// ---------------------------------------------------------------------------

/// One choice of a checkbox group, radio group or dropdown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoiceOption {
    pub label: String,
    pub value: FieldValue,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldConfig
// ---------------------------------------------------------------------------

/// One declared form field.
///
/// `component`, when set, takes precedence over the `type` tag.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub validation: Option<Rule>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub keyboard: Option<KeyboardType>,
    #[serde(default)]
    pub styles: FieldStyles,
    /// Opaque values handed to the control untouched.
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(skip)]
    pub component: Option<Rc<dyn FormControl>>,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            label: label.into(),
            required: false,
            options: Vec::new(),
            validation: None,
            disabled: false,
            placeholder: None,
            secure: false,
            keyboard: None,
            styles: FieldStyles::default(),
            props: Map::new(),
            component: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn with_validation(mut self, rule: Rule) -> Self {
        self.validation = Some(rule);
        self
    }

    pub fn with_option(mut self, label: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.options.push(ChoiceOption::new(label, value));
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = ChoiceOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn keyboard(mut self, keyboard: KeyboardType) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn with_styles(mut self, styles: FieldStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Render this field with `control` regardless of its type tag.
    pub fn with_component(mut self, control: impl FormControl + 'static) -> Self {
        self.component = Some(Rc::new(control));
        self
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("label", &self.label)
            .field("required", &self.required)
            .field("options", &self.options)
            .field("validation", &self.validation)
            .field("disabled", &self.disabled)
            .field("component", &self.component.is_some())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// SectionConfig
// ---------------------------------------------------------------------------

/// An ordered group of fields with an optional title and layout.
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionConfig {
    pub title: Option<String>,
    pub fields: Vec<FieldConfig>,
    /// Layout tag looked up in the form's layout registry.
    pub layout: Option<String>,
    pub layout_props: LayoutProps,
    /// Explicit layout; wins over `layout`.
    #[serde(skip)]
    pub layout_component: Option<Rc<dyn Layout>>,
}

impl SectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldConfig>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn with_layout(mut self, tag: impl Into<String>) -> Self {
        self.layout = Some(tag.into());
        self
    }

    pub fn with_layout_component(mut self, layout: impl Layout + 'static) -> Self {
        self.layout_component = Some(Rc::new(layout));
        self
    }

    pub fn with_layout_props(mut self, props: LayoutProps) -> Self {
        self.layout_props = props;
        self
    }
}

impl fmt::Debug for SectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionConfig")
            .field("title", &self.title)
            .field("fields", &self.fields)
            .field("layout", &self.layout)
            .field("layout_props", &self.layout_props)
            .field("layout_component", &self.layout_component.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// FormConfig
// ---------------------------------------------------------------------------

/// Host platform; selects how the form makes room for the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Ios,
    Android,
}

impl Platform {
    pub fn keyboard_behavior(self) -> AvoidBehavior {
        match self {
            Platform::Ios => AvoidBehavior::Padding,
            Platform::Android => AvoidBehavior::Height,
        }
    }
}

/// The whole form: sections plus form-level metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Header text; no header when empty.
    pub title: String,
    pub sections: Vec<SectionConfig>,
    pub submit_label: String,
    pub cancel_label: String,
    /// Starting values by field name.
    pub initial_values: FormValues,
    pub styles: FormStyles,
    pub platform: Platform,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            title: "Form".to_owned(),
            sections: Vec::new(),
            submit_label: "Submit".to_owned(),
            cancel_label: "Cancel".to_owned(),
            initial_values: FormValues::new(),
            styles: FormStyles::default(),
            platform: Platform::default(),
        }
    }
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_section(mut self, section: SectionConfig) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    pub fn with_initial_value(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.initial_values.insert(name.into(), value.into());
        self
    }

    pub fn with_styles(mut self, styles: FormStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// All fields of all sections, in render order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldConfig> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
