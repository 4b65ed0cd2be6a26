//! Stable test identifiers derived from role and field name.
//!
//! Every interactive or error-bearing element carries one of these so that
//! hosts and tests can locate it without walking the tree by position.

use crate::value::{value_key, FieldValue};

pub const FORM_HEADER: &str = "form-header";
pub const SUBMIT_BUTTON: &str = "submit-button";
pub const CANCEL_BUTTON: &str = "cancel-button";
pub const SUBMIT_ERROR: &str = "submit-error";
pub const LOADING_INDICATOR: &str = "loading-indicator";

pub fn label(name: &str) -> String {
    format!("label-{name}")
}

pub fn input(name: &str) -> String {
    format!("input-{name}")
}

pub fn error(name: &str) -> String {
    format!("error-{name}")
}

pub fn field(name: &str) -> String {
    format!("field-{name}")
}

pub fn checkbox(name: &str) -> String {
    format!("checkbox-{name}")
}

pub fn checkbox_option(name: &str, value: &FieldValue) -> String {
    format!("checkbox-{name}-{}", value_key(value))
}

pub fn checkmark(name: &str) -> String {
    format!("checkmark-{name}")
}

pub fn checkmark_option(name: &str, value: &FieldValue) -> String {
    format!("checkmark-{name}-{}", value_key(value))
}

pub fn radio_option(name: &str, value: &FieldValue) -> String {
    format!("radio-option-{name}-{}", value_key(value))
}

pub fn radio_selected(name: &str, value: &FieldValue) -> String {
    format!("radio-selected-{name}-{}", value_key(value))
}

pub fn dropdown(name: &str) -> String {
    format!("dropdown-{name}")
}

pub fn dropdown_overlay(name: &str) -> String {
    format!("dropdown-overlay-{name}")
}

pub fn dropdown_option(name: &str, value: &FieldValue) -> String {
    format!("dropdown-option-{name}-{}", value_key(value))
}

pub fn toggle(name: &str) -> String {
    format!("toggle-{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_scoped_ids() {
        assert_eq!(input("email"), "input-email");
        assert_eq!(error("email"), "error-email");
        assert_eq!(toggle("notify"), "toggle-notify");
    }

    #[test]
    fn option_ids_use_value_key() {
        assert_eq!(radio_option("plan", &json!("2")), "radio-option-plan-2");
        assert_eq!(radio_selected("plan", &json!(2)), "radio-selected-plan-2");
        assert_eq!(checkbox_option("tags", &json!("a")), "checkbox-tags-a");
    }
}
