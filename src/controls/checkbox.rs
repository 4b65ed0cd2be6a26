//! Checkbox: a single boolean, or a multi-select set when options are given.

use serde_json::Value;

use super::{container, dimmed, error, label, ControlContext, ControlProps, FormControl, ACCENT};
use crate::form::ChoiceOption;
use crate::style::{merge_styles, Align, FlexDirection, Justify, Style, StyleList};
use crate::value::{is_truthy, FieldValue};
use crate::view::{ids, Element, Role};

/// Checkbox control.
///
/// Without options the value is a `bool` and each press flips it. With
/// options the value is an array of the selected option values, in the order
/// they were selected: pressing a selected option removes it, pressing an
/// unselected one appends it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkbox;

impl Checkbox {
    pub fn new() -> Self {
        Self
    }
}

/// `current` with `option` added or removed.
fn toggled(current: &FieldValue, option: &FieldValue) -> FieldValue {
    let mut selected = current.as_array().cloned().unwrap_or_default();
    match selected.iter().position(|v| v == option) {
        Some(index) => {
            selected.remove(index);
        }
        None => selected.push(option.clone()),
    }
    Value::Array(selected)
}

fn is_selected(current: &FieldValue, option: &FieldValue) -> bool {
    current.as_array().is_some_and(|items| items.contains(option))
}

fn row_style(props: &ControlProps<'_>) -> StyleList {
    StyleList::of(
        Style::new()
            .flex_direction(FlexDirection::Row)
            .align_items(Align::Center)
            .margin_vertical(4.0),
    )
    .with_if(props.disabled, dimmed())
    .with_opt(props.styles.option.as_ref())
}

/// The square, filled with a checkmark when `checked`.
fn square(checked: bool, mark_id: String) -> Element {
    let style = StyleList::of(
        Style::new()
            .width(20.0)
            .height(20.0)
            .border_width(2.0)
            .border_color(ACCENT)
            .border_radius(4.0)
            .margin_right(8.0)
            .align_items(Align::Center)
            .justify_content(Justify::Center),
    )
    .with_if(checked, Style::new().background_color(ACCENT));
    let mark = checked.then(|| {
        Element::text("✓")
            .with_test_id(mark_id)
            .with_style(Style::new().color("white").font_size(12.0))
    });
    Element::view().with_styles(style).with_child_opt(mark)
}

fn option_text(text: impl Into<String>, props: &ControlProps<'_>) -> Element {
    Element::text(text).with_styles(merge_styles(
        Style::new().font_size(16.0),
        props.styles.option_label.as_ref(),
    ))
}

impl Checkbox {
    fn single(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
        let checked = is_truthy(&ctx.get(props.name));
        let text = props.display_label();

        let mut row = Element::pressable()
            .with_test_id(ids::checkbox(props.name))
            .with_role(Role::Checkbox)
            .with_accessibility_label(text.clone())
            .checked(checked)
            .disabled(props.disabled)
            .with_styles(row_style(props))
            .with_child(square(checked, ids::checkmark(props.name)))
            .with_child(option_text(text, props).with_test_id(ids::label(props.name)));
        if !props.disabled {
            let binding = ctx.binding().clone();
            let set = ctx.setter(props);
            let name = props.name.to_owned();
            row = row.on_press(move || set(Value::Bool(!is_truthy(&binding.get(&name)))));
        }

        container(props).with_child(row).with_child_opt(error(props))
    }

    fn option_row(&self, option: &ChoiceOption, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
        let checked = is_selected(&ctx.get(props.name), &option.value);
        let mut row = Element::pressable()
            .with_test_id(ids::checkbox_option(props.name, &option.value))
            .with_role(Role::Checkbox)
            .with_accessibility_label(option.label.clone())
            .checked(checked)
            .disabled(props.disabled)
            .with_styles(row_style(props))
            .with_child(square(checked, ids::checkmark_option(props.name, &option.value)))
            .with_child(option_text(option.label.clone(), props));
        if !props.disabled {
            let binding = ctx.binding().clone();
            let set = ctx.setter(props);
            let name = props.name.to_owned();
            let value = option.value.clone();
            row = row.on_press(move || set(toggled(&binding.get(&name), &value)));
        }
        row
    }

    fn multi(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
        let rows = props
            .options
            .iter()
            .map(|option| self.option_row(option, props, ctx));
        let group = Element::view()
            .with_styles(StyleList::new().with_opt(props.styles.options_container.as_ref()))
            .with_children(rows);

        container(props)
            .with_child_opt(label(props))
            .with_child(group)
            .with_child_opt(error(props))
    }
}

impl FormControl for Checkbox {
    fn render(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
        if props.options.is_empty() {
            self.single(props, ctx)
        } else {
            self.multi(props, ctx)
        }
    }
}
