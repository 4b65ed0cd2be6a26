//! ButtonPair widget: a Cancel and a Submit action, side by side.
//!
//! Both buttons are always rendered, Cancel first. `disabled` affects Submit
//! only; Cancel stays pressable.

use crate::style::{merge_styles, Align, ButtonStyles, FlexDirection, FontWeight, Justify, Style, StyleList};
use crate::view::{ids, Element, PressHandler, Role};

const SUBMIT_BLUE: &str = "#007BFF";
const BORDER_GREY: &str = "#cccccc";
const DISABLED_GREY: &str = "#999";
const PRESSED_OPACITY: f32 = 0.7;

// ---------------------------------------------------------------------------
// ButtonPair
// ---------------------------------------------------------------------------

/// Cancel + Submit buttons.
///
/// # Examples
///
/// ```ignore
/// let buttons = ButtonPair::new("Submit", "Cancel")
///     .on_submit(|| println!("submit"))
///     .on_cancel(|| println!("cancel"))
///     .disabled(false);
/// let element = buttons.render();
/// ```
#[derive(Debug, Clone)]
pub struct ButtonPair {
    submit_label: String,
    cancel_label: String,
    on_submit: Option<PressHandler>,
    on_cancel: Option<PressHandler>,
    disabled: bool,
    styles: ButtonStyles,
}

impl ButtonPair {
    /// Create a pair with the given labels and no handlers.
    pub fn new(submit_label: impl Into<String>, cancel_label: impl Into<String>) -> Self {
        Self {
            submit_label: submit_label.into(),
            cancel_label: cancel_label.into(),
            on_submit: None,
            on_cancel: None,
            disabled: false,
            styles: ButtonStyles::default(),
        }
    }

    /// Set the Submit press handler (builder pattern).
    pub fn on_submit(mut self, f: impl Fn() + 'static) -> Self {
        self.on_submit = Some(PressHandler::new(f));
        self
    }

    /// Set the Cancel press handler (builder pattern).
    pub fn on_cancel(mut self, f: impl Fn() + 'static) -> Self {
        self.on_cancel = Some(PressHandler::new(f));
        self
    }

    /// Set whether Submit is disabled (builder pattern).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set style overrides (builder pattern).
    pub fn with_styles(mut self, styles: ButtonStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn label_style(&self) -> StyleList {
        merge_styles(
            Style::new().font_weight(FontWeight::SemiBold).font_size(14.0),
            self.styles.label_text.as_ref(),
        )
    }

    fn cancel_button(&self) -> Element {
        let mut button = Element::pressable()
            .with_test_id(ids::CANCEL_BUTTON)
            .with_role(Role::Button)
            .with_accessibility_label(self.cancel_label.clone())
            .with_styles(merge_styles(
                Style::new()
                    .padding_horizontal(25.0)
                    .padding_vertical(10.0)
                    .border_width(0.8)
                    .border_color(BORDER_GREY)
                    .border_radius(5.0)
                    .align_items(Align::Center),
                self.styles.cancel_button.as_ref(),
            ))
            .with_pressed_style(Style::new().opacity(PRESSED_OPACITY))
            .with_child(Element::text(self.cancel_label.clone()).with_styles(self.label_style()));
        if let Some(handler) = self.on_cancel.clone() {
            button = button.on_press(move || handler.call());
        }
        button
    }

    fn submit_button(&self) -> Element {
        let mut button = Element::pressable()
            .with_test_id(ids::SUBMIT_BUTTON)
            .with_role(Role::Button)
            .with_accessibility_label(self.submit_label.clone())
            .disabled(self.disabled)
            .with_styles(
                StyleList::of(
                    Style::new()
                        .padding_horizontal(25.0)
                        .padding_vertical(10.0)
                        .background_color(SUBMIT_BLUE)
                        .border_radius(5.0)
                        .align_items(Align::Center),
                )
                .with_opt(self.styles.submit_button.as_ref())
                .with_if(self.disabled, Style::new().background_color(DISABLED_GREY)),
            )
            .with_pressed_style(Style::new().opacity(PRESSED_OPACITY))
            .with_child(
                Element::text(self.submit_label.clone())
                    .with_styles(self.label_style().with(Style::new().color("#ffffff"))),
            );
        if let (false, Some(handler)) = (self.disabled, self.on_submit.clone()) {
            button = button.on_press(move || handler.call());
        }
        button
    }

    /// Build the element tree: `container [cancel, submit]`.
    pub fn render(&self) -> Element {
        Element::view()
            .with_styles(merge_styles(
                Style::new()
                    .flex_direction(FlexDirection::Row)
                    .justify_content(Justify::SpaceEvenly)
                    .padding_vertical(24.0)
                    .background_color("#ffffff")
                    .margin_horizontal(-12.0),
                self.styles.container.as_ref(),
            ))
            .with_child(self.cancel_button())
            .with_child(self.submit_button())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
