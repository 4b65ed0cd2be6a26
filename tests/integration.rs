//! Integration tests for gilt-forms.
//!
//! These tests drive whole forms from outside the crate through the
//! [`Pilot`], verifying that configuration, controls, layouts, validation and
//! the submit flow work together.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use gilt_forms::form::{fail, ChoiceOption, FieldConfig, FieldType, FormConfig, SectionConfig};
use gilt_forms::layout::LayoutProps;
use gilt_forms::testing::{subtree_to_string, Pilot};
use gilt_forms::validate::Rule;
use gilt_forms::{DynamicForm, FieldBinding, FormValues, Outcome, SubmitState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type Calls = Rc<RefCell<Vec<FormValues>>>;

/// A form whose sync submit handler records every call.
fn recording(config: FormConfig) -> (Pilot, Calls) {
    let calls: Calls = Rc::default();
    let seen = calls.clone();
    let form = DynamicForm::new(config).unwrap().on_submit_sync(move |values| {
        seen.borrow_mut().push(values);
        Ok(())
    });
    (Pilot::new(form), calls)
}

fn first_name_form() -> FormConfig {
    FormConfig::new().with_section(
        SectionConfig::new().with_field(
            FieldConfig::new("firstName", FieldType::Text, "First Name")
                .required()
                .with_validation(Rule::string().min_length(2, "Name must be at least 2 characters")),
        ),
    )
}

fn profile_form() -> FormConfig {
    FormConfig::new()
        .with_title("Profile")
        .with_section(
            SectionConfig::new()
                .with_title("About you")
                .with_field(FieldConfig::new("name", FieldType::Text, "Name").required())
                .with_field(
                    FieldConfig::new("email", FieldType::Text, "Email")
                        .required()
                        .with_validation(Rule::string().email("Invalid email format")),
                ),
        )
        .with_section(
            SectionConfig::new()
                .with_field(
                    FieldConfig::new("size", FieldType::Dropdown, "Size")
                        .with_option("Small", "s")
                        .with_option("Medium", "m"),
                )
                .with_field(FieldConfig::new("news", FieldType::Toggle, "Newsletter")),
        )
}

// ---------------------------------------------------------------------------
// Validation gate
// ---------------------------------------------------------------------------

#[test]
fn required_empty_fields_block_submit() {
    let (mut pilot, calls) = recording(profile_form());
    assert!(pilot.press("submit-button"));

    assert_eq!(pilot.text_of("error-name").as_deref(), Some("Required"));
    assert_eq!(pilot.text_of("error-email").as_deref(), Some("Required"));
    assert!(!pilot.exists("error-size"));
    assert!(calls.borrow().is_empty());
    assert!(pilot.is_disabled("submit-button"));
}

#[test]
fn valid_submit_sends_exactly_declared_fields() {
    let config = profile_form()
        .with_initial_value("name", "Ada")
        .with_initial_value("email", "ada@example.com")
        .with_initial_value("sessionToken", "not-a-field");
    let (mut pilot, calls) = recording(config);

    assert!(pilot.press("submit-button"));
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(
        Value::Object(calls.borrow()[0].clone()),
        json!({ "name": "Ada", "email": "ada@example.com", "size": null, "news": null })
    );
    assert_eq!(pilot.form().state(), SubmitState::Idle);
}

#[test]
fn first_name_scenario() {
    let (mut pilot, calls) = recording(first_name_form());

    assert!(pilot.change_text("input-firstName", ""));
    assert!(pilot.press("submit-button"));
    assert_eq!(
        pilot.text_of("error-firstName").as_deref(),
        Some("Name must be at least 2 characters")
    );
    assert!(calls.borrow().is_empty());

    assert!(pilot.change_text("input-firstName", "John"));
    assert!(!pilot.is_disabled("submit-button"));
    assert!(pilot.press("submit-button"));
    assert!(!pilot.exists("error-firstName"));
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(Value::Object(calls.borrow()[0].clone()), json!({ "firstName": "John" }));
}

#[test]
fn invalid_email_message() {
    let config = profile_form()
        .with_initial_value("name", "Ada")
        .with_initial_value("email", "not-an-email");
    let (mut pilot, calls) = recording(config);
    pilot.press("submit-button");
    assert_eq!(pilot.text_of("error-email").as_deref(), Some("Invalid email format"));
    assert!(!pilot.exists("error-name"));
    assert!(calls.borrow().is_empty());
}

#[test]
fn error_message_is_announced_as_alert() {
    let (mut pilot, _) = recording(first_name_form());
    pilot.press("submit-button");
    let error = pilot.node("error-firstName").unwrap();
    assert_eq!(error.accessibility.label.as_deref(), Some("Error: Required"));
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

#[test]
fn checkbox_toggles_on_and_off() {
    let config = FormConfig::new().with_section(
        SectionConfig::new().with_field(FieldConfig::new("agree", FieldType::Checkbox, "I agree")),
    );
    let mut pilot = Pilot::new(DynamicForm::new(config).unwrap());
    assert!(!pilot.exists("checkmark-agree"));

    assert!(pilot.press("checkbox-agree"));
    assert!(pilot.exists("checkmark-agree"));
    assert_eq!(pilot.form().values().get("agree"), Some(&json!(true)));

    assert!(pilot.press("checkbox-agree"));
    assert!(!pilot.exists("checkmark-agree"));
    assert_eq!(pilot.form().values().get("agree"), Some(&json!(false)));
}

#[test]
fn multi_checkbox_keeps_selection_order() {
    let config = FormConfig::new().with_section(
        SectionConfig::new().with_field(
            FieldConfig::new("tags", FieldType::Checkbox, "Tags")
                .with_option("Red", "red")
                .with_option("Green", "green")
                .with_option("Blue", "blue"),
        ),
    );
    let mut pilot = Pilot::new(DynamicForm::new(config).unwrap());
    pilot.press("checkbox-tags-blue");
    pilot.press("checkbox-tags-red");
    pilot.press("checkbox-tags-green");
    pilot.press("checkbox-tags-red");
    assert_eq!(pilot.form().values().get("tags"), Some(&json!(["blue", "green"])));
    assert!(pilot.exists("checkmark-tags-blue"));
    assert!(!pilot.exists("checkmark-tags-red"));
}

#[test]
fn radio_default_selects_option_two_only() {
    let config = FormConfig::new()
        .with_section(SectionConfig::new().with_field(
            FieldConfig::new("choice", FieldType::Radio, "Choice").with_options([
                ChoiceOption::new("Option 1", "1"),
                ChoiceOption::new("Option 2", "2"),
            ]),
        ))
        .with_initial_value("choice", "2");
    let pilot = Pilot::new(DynamicForm::new(config).unwrap());
    assert!(pilot.exists("radio-selected-choice-2"));
    assert!(!pilot.exists("radio-selected-choice-1"));
}

#[test]
fn radio_round_trip_leaves_last_choice() {
    let config = FormConfig::new().with_section(SectionConfig::new().with_field(
        FieldConfig::new("plan", FieldType::Radio, "Plan")
            .with_option("Free", "free")
            .with_option("Pro", "pro"),
    ));
    let mut pilot = Pilot::new(DynamicForm::new(config).unwrap());
    pilot.press("radio-option-plan-free");
    pilot.press("radio-option-plan-pro");
    assert_eq!(pilot.form().values().get("plan"), Some(&json!("pro")));
    assert!(pilot.exists("radio-selected-plan-pro"));
    assert!(!pilot.exists("radio-selected-plan-free"));
}

#[test]
fn dropdown_round_trip_leaves_last_choice() {
    let mut pilot = Pilot::new(DynamicForm::new(profile_form()).unwrap());
    assert_eq!(pilot.text_of("dropdown-size").as_deref(), Some("Select..."));
    assert!(!pilot.exists("dropdown-option-size-s"));

    assert!(pilot.press("dropdown-size"));
    assert!(pilot.press("dropdown-option-size-s"));
    assert!(!pilot.exists("dropdown-option-size-s"), "overlay closes after choosing");
    assert_eq!(pilot.text_of("dropdown-size").as_deref(), Some("Small"));

    pilot.press("dropdown-size");
    pilot.press("dropdown-option-size-m");
    assert_eq!(pilot.form().values().get("size"), Some(&json!("m")));
    assert_eq!(pilot.text_of("dropdown-size").as_deref(), Some("Medium"));
}

#[test]
fn toggle_writes_bool() {
    let mut pilot = Pilot::new(DynamicForm::new(profile_form()).unwrap());
    assert!(pilot.change_value("toggle-news", json!(true)));
    assert_eq!(pilot.form().values().get("news"), Some(&json!(true)));
    assert!(pilot.node("toggle-news").unwrap().accessibility.checked.unwrap_or(false));
}

#[test]
fn disabled_controls_never_change_values() {
    let config = FormConfig::new()
        .with_section(
            SectionConfig::new()
                .with_field(FieldConfig::new("text", FieldType::Text, "Text").disabled())
                .with_field(FieldConfig::new("check", FieldType::Checkbox, "Check").disabled())
                .with_field(
                    FieldConfig::new("radio", FieldType::Radio, "Radio")
                        .with_option("A", "a")
                        .disabled(),
                )
                .with_field(
                    FieldConfig::new("drop", FieldType::Dropdown, "Drop")
                        .with_option("A", "a")
                        .disabled(),
                )
                .with_field(FieldConfig::new("flag", FieldType::Toggle, "Flag").disabled()),
        )
        .with_initial_value("text", "keep");
    let form = DynamicForm::new(config).unwrap();
    let changes = Rc::new(Cell::new(0));
    let c = changes.clone();
    let _watch = form.on_change(move |_| c.set(c.get() + 1));
    let before = form.values();

    let mut pilot = Pilot::new(form);
    assert!(!pilot.change_text("input-text", "other"));
    assert!(!pilot.press("checkbox-check"));
    assert!(!pilot.press("radio-option-radio-a"));
    assert!(!pilot.press("dropdown-drop"));
    assert!(!pilot.exists("dropdown-option-drop-a"));
    assert!(!pilot.change_value("toggle-flag", json!(true)));

    assert_eq!(pilot.form().values(), before);
    assert_eq!(changes.get(), 0);
}

#[test]
fn custom_control_from_registry() {
    use gilt_forms::controls::{ControlContext, ControlProps, ControlRegistry, FormControl};
    use gilt_forms::view::Element;

    struct Stars;

    impl FormControl for Stars {
        fn render(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
            let set = ctx.setter(props);
            Element::pressable()
                .with_test_id(format!("stars-{}", props.name))
                .on_press(move || set(json!(5)))
                .with_child(Element::text(props.display_label()))
        }
    }

    let config = FormConfig::new().with_section(
        SectionConfig::new().with_field(FieldConfig::new("rating", "stars", "Rating").required()),
    );
    let form = DynamicForm::new(config)
        .unwrap()
        .with_controls(ControlRegistry::with_defaults().with("stars", Stars));
    let mut pilot = Pilot::new(form);
    assert_eq!(pilot.count_text("Rating *"), 1);
    assert!(pilot.press_text("Rating *"));
    assert_eq!(pilot.form().values().get("rating"), Some(&json!(5)));
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn row_layout_spacing() {
    let config = FormConfig::new().with_section(
        SectionConfig::new()
            .with_layout("row")
            .with_layout_props(LayoutProps::new().with_spacing(12.0))
            .with_field(FieldConfig::new("first", FieldType::Text, "First"))
            .with_field(FieldConfig::new("last", FieldType::Text, "Last")),
    );
    let pilot = Pilot::new(DynamicForm::new(config).unwrap());
    let dom = pilot.dom();

    let first = dom.query_by_test_id("field-first").unwrap();
    let cell = dom.parent(first).unwrap();
    let row = dom.parent(cell).unwrap();

    let cell_style = &dom.get(cell).unwrap().style;
    assert_eq!(cell_style.padding_left, Some(6.0));
    assert_eq!(cell_style.padding_right, Some(6.0));
    assert_eq!(cell_style.padding_top, None);

    let row_style = &dom.get(row).unwrap().style;
    assert_eq!(row_style.margin_left, Some(-6.0));
    assert_eq!(row_style.margin_right, Some(-6.0));
    assert_eq!(dom.children(row).len(), 2);
}

#[test]
fn unknown_layout_tag_falls_back_to_plain_view() {
    let config = FormConfig::new().with_section(
        SectionConfig::new()
            .with_layout("masonry")
            .with_field(FieldConfig::new("a", FieldType::Text, "A")),
    );
    let pilot = Pilot::new(DynamicForm::new(config).unwrap());
    let dom = pilot.dom();
    let field = dom.query_by_test_id("field-a").unwrap();
    let body = dom.get(dom.parent(field).unwrap()).unwrap();
    assert_eq!(body.style.margin_left, None);
    assert_eq!(body.style.padding_left, None);
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn double_press_in_flight_submits_once() {
    let calls = Rc::new(Cell::new(0));
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let gate = Rc::new(RefCell::new(Some(rx)));

    let c = calls.clone();
    let form = DynamicForm::new(first_name_form().with_initial_value("firstName", "John"))
        .unwrap()
        .on_submit(move |_| {
            c.set(c.get() + 1);
            let rx = gate.borrow_mut().take();
            async move {
                if let Some(rx) = rx {
                    let _ = rx.await;
                }
                Ok(())
            }
        });
    let mut pilot = Pilot::new(form);

    assert!(pilot.press("submit-button"));
    assert!(pilot.is_disabled("submit-button"));
    assert!(!pilot.press("submit-button"));
    assert_eq!(pilot.form().press_submit(), Outcome::Ignored);

    tx.send(()).unwrap();
    assert_eq!(pilot.settle().await, Some(Outcome::Submitted));
    assert_eq!(calls.get(), 1);
    assert!(!pilot.is_disabled("submit-button"));
}

#[tokio::test(start_paused = true)]
async fn loading_state_while_handler_runs() {
    let form = DynamicForm::new(first_name_form().with_initial_value("firstName", "John"))
        .unwrap()
        .on_submit(|_| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok(())
        });
    let mut pilot = Pilot::new(form);

    pilot.press("submit-button");
    assert!(pilot.exists("loading-indicator"));
    assert_eq!(pilot.count_text("Submitting..."), 1);
    assert!(!pilot.change_text("input-firstName", "Jane"), "fields are locked while submitting");

    assert_eq!(pilot.settle().await, Some(Outcome::Submitted));
    assert!(!pilot.exists("loading-indicator"));
    assert_eq!(pilot.count_text("Submit"), 1);
    assert!(pilot.change_text("input-firstName", "Jane"));
}

#[tokio::test]
async fn failed_submission_shows_message() {
    let form = DynamicForm::new(first_name_form().with_initial_value("firstName", "John"))
        .unwrap()
        .on_submit(|_| async { fail("Server unavailable") });
    let mut pilot = Pilot::new(form);

    pilot.press("submit-button");
    assert_eq!(pilot.settle().await, Some(Outcome::Failed("Server unavailable".into())));
    assert_eq!(pilot.text_of("submit-error").as_deref(), Some("Server unavailable"));
    assert!(!pilot.exists("error-firstName"));
    assert!(!pilot.is_disabled("submit-button"));
}

#[tokio::test]
async fn failed_submission_without_message_uses_fallback() {
    let form = DynamicForm::new(first_name_form().with_initial_value("firstName", "John"))
        .unwrap()
        .on_submit(|_| async { fail("") });
    assert_eq!(form.submit().await, Outcome::Failed("An error occurred".into()));
    assert_eq!(form.submit_error().as_deref(), Some("An error occurred"));
}

#[test]
fn cancel_invokes_handler_only() {
    let cancels = Rc::new(Cell::new(0));
    let c = cancels.clone();
    let (pilot, calls) = recording(first_name_form());
    let form = pilot.form().clone().on_cancel(move || c.set(c.get() + 1));
    let mut pilot = Pilot::new(form);

    assert!(pilot.press("cancel-button"));
    assert_eq!(cancels.get(), 1);
    assert!(calls.borrow().is_empty());
    assert!(!pilot.exists("error-firstName"));
}

#[test]
fn reset_restores_initial_state() {
    let config = first_name_form().with_initial_value("firstName", "Ada");
    let mut pilot = Pilot::new(DynamicForm::new(config).unwrap());
    pilot.change_text("input-firstName", "A");
    pilot.press("submit-button");
    assert!(pilot.exists("error-firstName"));

    pilot.form().reset();
    pilot.refresh();
    assert!(!pilot.exists("error-firstName"));
    assert_eq!(pilot.node("input-firstName").unwrap().props.value, Some(json!("Ada")));
}

#[test]
fn binding_is_shared_with_host() {
    let form = DynamicForm::new(first_name_form()).unwrap();
    form.binding().set("firstName", json!("Grace"));
    let pilot = Pilot::new(form);
    assert_eq!(pilot.node("input-firstName").unwrap().props.value, Some(json!("Grace")));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn json_config_end_to_end() {
    let config = FormConfig::from_json(
        r#"{
            "title": "Sign up",
            "sections": [{
                "title": "Account",
                "fields": [
                    {
                        "name": "email", "type": "text", "label": "Email", "required": true,
                        "validation": {
                            "type": "string",
                            "checks": [{ "check": "email", "message": "Invalid email format" }]
                        }
                    },
                    {
                        "name": "plan", "type": "radio", "label": "Plan",
                        "options": [{ "label": "Free", "value": "free" }, { "label": "Pro", "value": "pro" }]
                    }
                ]
            }]
        }"#,
    )
    .unwrap();
    let (mut pilot, calls) = recording(config);
    assert_eq!(pilot.text_of("form-header").as_deref(), Some("Sign up"));

    pilot.change_text("input-email", "nope");
    pilot.press("submit-button");
    assert_eq!(pilot.text_of("error-email").as_deref(), Some("Invalid email format"));

    pilot.change_text("input-email", "ada@example.com");
    pilot.press("radio-option-plan-pro");
    pilot.press("submit-button");
    assert_eq!(
        Value::Object(calls.borrow()[0].clone()),
        json!({ "email": "ada@example.com", "plan": "pro" })
    );
}

#[test]
fn duplicate_field_names_are_rejected() {
    let config = FormConfig::new()
        .with_section(SectionConfig::new().with_field(FieldConfig::new("x", FieldType::Text, "X")))
        .with_section(SectionConfig::new().with_field(FieldConfig::new("x", FieldType::Toggle, "X")));
    let err = DynamicForm::new(config).unwrap_err();
    assert_eq!(err.to_string(), "duplicate field name `x`");
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[test]
fn toggle_field_outline_after_failed_submit() {
    let config = FormConfig::new().with_section(
        SectionConfig::new().with_field(FieldConfig::new("agree", FieldType::Toggle, "Agree").required()),
    );
    let mut pilot = Pilot::new(DynamicForm::new(config).unwrap());
    pilot.press("submit-button");

    insta::assert_snapshot!(subtree_to_string(pilot.dom(), "field-agree"), @r###"
    View #field-agree
      View
        View
          Text #label-agree "Agree *"
          Switch #toggle-agree value=false
        Text #error-agree "Required"
    "###);
}
