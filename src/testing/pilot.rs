//! Pilot: drive a [`DynamicForm`] the way a user would.
//!
//! The pilot keeps a mounted [`Dom`] of the form's current render. Every
//! interaction goes through the mounted tree (press bubbling, disabled
//! nodes, editable inputs) and re-mounts afterwards, so assertions always
//! see the latest state.

use crate::dom::{Dom, NodeData, NodeId};
use crate::form::{DynamicForm, Outcome};
use crate::value::FieldValue;

use super::snapshot::dom_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless form driver for tests.
///
/// # Examples
///
/// ```ignore
/// use gilt_forms::testing::Pilot;
///
/// let mut pilot = Pilot::new(form);
/// pilot.change_text("input-email", "ada@example.com");
/// pilot.press("submit-button");
/// pilot.settle().await;
/// assert!(!pilot.exists("error-email"));
/// ```
pub struct Pilot {
    form: DynamicForm,
    dom: Dom,
}

impl Pilot {
    /// Mount the form's current render.
    pub fn new(form: DynamicForm) -> Self {
        let dom = Dom::mount(&form.render());
        Self { form, dom }
    }

    pub fn form(&self) -> &DynamicForm {
        &self.form
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Re-render and re-mount.
    pub fn refresh(&mut self) {
        self.dom = Dom::mount(&self.form.render());
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Press the node with `test_id`.
    ///
    /// The press bubbles to the nearest pressable ancestor. Returns `false` if
    /// the node is missing or the press was swallowed by a disabled or
    /// handler-less target.
    pub fn press(&mut self, test_id: &str) -> bool {
        let target = self.dom.query_by_test_id(test_id);
        self.press_node(target)
    }

    /// Press the first `Text` node reading exactly `text`.
    pub fn press_text(&mut self, text: &str) -> bool {
        let target = self.dom.query_by_text(text).first().copied();
        self.press_node(target)
    }

    /// Type `text` into the input with `test_id`. `false` if not editable.
    pub fn change_text(&mut self, test_id: &str, text: &str) -> bool {
        self.change_value(test_id, FieldValue::String(text.to_owned()))
    }

    /// Deliver a raw value change to the node with `test_id`. `false` if it
    /// does not accept changes right now.
    pub fn change_value(&mut self, test_id: &str, value: FieldValue) -> bool {
        let handler = self
            .node(test_id)
            .filter(|node| node.accepts_change())
            .and_then(|node| node.on_change.clone());
        match handler {
            Some(handler) => {
                handler.call(value);
                self.refresh();
                true
            }
            None => false,
        }
    }

    /// Wait for an in-flight submission, then re-mount.
    pub async fn settle(&mut self) -> Option<Outcome> {
        let outcome = self.form.settle().await;
        self.refresh();
        outcome
    }

    fn press_node(&mut self, start: Option<NodeId>) -> bool {
        let handler = start
            .and_then(|id| self.dom.press_target(id))
            .and_then(|id| self.dom.get(id))
            .filter(|node| !node.disabled)
            .and_then(|node| node.on_press.clone());
        match handler {
            Some(handler) => {
                handler.call();
                self.refresh();
                true
            }
            None => false,
        }
    }

    // ── Inspection ───────────────────────────────────────────────────

    pub fn node(&self, test_id: &str) -> Option<&NodeData> {
        self.dom
            .query_by_test_id(test_id)
            .and_then(|id| self.dom.get(id))
    }

    pub fn exists(&self, test_id: &str) -> bool {
        self.dom.query_by_test_id(test_id).is_some()
    }

    /// Concatenated text under the node with `test_id`.
    pub fn text_of(&self, test_id: &str) -> Option<String> {
        self.dom
            .query_by_test_id(test_id)
            .map(|id| self.dom.text_content(id))
    }

    /// Number of `Text` nodes reading exactly `text`.
    pub fn count_text(&self, text: &str) -> usize {
        self.dom.query_by_text(text).len()
    }

    pub fn is_disabled(&self, test_id: &str) -> bool {
        self.node(test_id).is_some_and(|node| node.disabled)
    }

    /// Outline of the mounted tree.
    pub fn outline(&self) -> String {
        dom_to_string(&self.dom)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldConfig, FieldType, FormConfig, SectionConfig};
    use serde_json::json;

    fn pilot() -> Pilot {
        let config = FormConfig::new().with_section(
            SectionConfig::new()
                .with_field(FieldConfig::new("name", FieldType::Text, "Name"))
                .with_field(FieldConfig::new("locked", FieldType::Text, "Locked").disabled())
                .with_field(FieldConfig::new("agree", FieldType::Checkbox, "Agree")),
        );
        Pilot::new(DynamicForm::new(config).unwrap())
    }

    #[test]
    fn change_text_updates_value_and_dom() {
        let mut pilot = pilot();
        assert!(pilot.change_text("input-name", "Ada"));
        assert_eq!(pilot.form().values().get("name"), Some(&json!("Ada")));
        let input = pilot.node("input-name").unwrap();
        assert_eq!(input.props.value, Some(json!("Ada")));
    }

    #[test]
    fn disabled_input_rejects_change() {
        let mut pilot = pilot();
        assert!(!pilot.change_text("input-locked", "x"));
        assert_eq!(pilot.form().values().get("locked"), Some(&json!(null)));
    }

    #[test]
    fn press_bubbles_from_label_to_checkbox() {
        let mut pilot = pilot();
        assert!(pilot.press("label-agree"));
        assert_eq!(pilot.form().values().get("agree"), Some(&json!(true)));
        assert!(pilot.exists("checkmark-agree"));
    }

    #[test]
    fn missing_node_is_not_pressed() {
        let mut pilot = pilot();
        assert!(!pilot.press("nope"));
        assert!(!pilot.change_text("nope", "x"));
        assert!(!pilot.exists("nope"));
        assert_eq!(pilot.text_of("nope"), None);
    }

    #[test]
    fn press_text_reaches_cancel() {
        let mut pilot = pilot();
        assert!(!pilot.press_text("Cancel"), "no cancel handler registered");
        let form = pilot.form().clone().on_cancel(|| {});
        let mut pilot = Pilot::new(form);
        assert!(pilot.press_text("Cancel"));
    }
}
