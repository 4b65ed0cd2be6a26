//! Per-component style override slots.
//!
//! Each component recognizes a fixed set of keys; an override value is merged
//! after the component's default for that slot.

use serde::Deserialize;

use super::styles::Style;

/// Overrides recognized by the form controls.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldStyles {
    pub container: Option<Style>,
    pub label: Option<Style>,
    pub error: Option<Style>,
    pub input: Option<Style>,
    pub options_container: Option<Style>,
    pub option: Option<Style>,
    pub selected_option: Option<Style>,
    pub radio: Option<Style>,
    pub selected: Option<Style>,
    pub option_label: Option<Style>,
}

/// Overrides recognized by the button pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ButtonStyles {
    pub container: Option<Style>,
    pub submit_button: Option<Style>,
    pub cancel_button: Option<Style>,
    pub label_text: Option<Style>,
}

/// Overrides recognized by the dynamic form shell.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormStyles {
    pub form_container: Option<Style>,
    pub header_container: Option<Style>,
    pub header_text: Option<Style>,
    pub buttons: ButtonStyles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_styles_from_json() {
        let styles: FieldStyles =
            serde_json::from_str(r#"{ "container": { "margin_bottom": 2 }, "error": { "color": "orange" } }"#)
                .unwrap();
        assert_eq!(styles.container.unwrap().margin_bottom, Some(2.0));
        assert_eq!(styles.error.unwrap().color.as_deref(), Some("orange"));
        assert!(styles.label.is_none());
    }

    #[test]
    fn form_styles_nest_button_styles() {
        let styles: FormStyles =
            serde_json::from_str(r##"{ "buttons": { "submit_button": { "background_color": "#000" } } }"##)
                .unwrap();
        assert_eq!(
            styles.buttons.submit_button.unwrap().background_color.as_deref(),
            Some("#000")
        );
    }
}
