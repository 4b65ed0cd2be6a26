//! RadioGroup: exactly one value out of a fixed option list.

use super::{dimmed, field_shell, ControlContext, ControlProps, FormControl, ACCENT};
use crate::form::ChoiceOption;
use crate::style::{merge_styles, Align, FlexDirection, Justify, Style, StyleList};
use crate::value::FieldValue;
use crate::view::{ids, Element, Role};

/// Radio group control.
///
/// Pressing an option writes its value. Pressing the selected option again
/// keeps it selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadioGroup;

impl RadioGroup {
    pub fn new() -> Self {
        Self
    }

    fn option(
        &self,
        option: &ChoiceOption,
        current: &FieldValue,
        props: &ControlProps<'_>,
        ctx: &ControlContext,
    ) -> Element {
        let selected = *current == option.value;
        let styles = props.styles;

        let dot = selected.then(|| {
            Element::view()
                .with_test_id(ids::radio_selected(props.name, &option.value))
                .with_styles(merge_styles(
                    Style::new()
                        .width(10.0)
                        .height(10.0)
                        .border_radius(5.0)
                        .background_color(ACCENT),
                    styles.selected.as_ref(),
                ))
        });
        let circle = Element::view()
            .with_styles(merge_styles(
                Style::new()
                    .width(20.0)
                    .height(20.0)
                    .border_radius(10.0)
                    .border_width(2.0)
                    .border_color(ACCENT)
                    .margin_right(8.0)
                    .align_items(Align::Center)
                    .justify_content(Justify::Center),
                styles.radio.as_ref(),
            ))
            .with_child_opt(dot);

        let mut row = Element::pressable()
            .with_test_id(ids::radio_option(props.name, &option.value))
            .with_role(Role::Radio)
            .with_accessibility_label(option.label.clone())
            .selected(selected)
            .disabled(props.disabled)
            .with_styles(
                StyleList::of(
                    Style::new()
                        .flex_direction(FlexDirection::Row)
                        .align_items(Align::Center)
                        .margin_bottom(8.0),
                )
                .with_opt(styles.option.as_ref())
                .with_if(selected, Style::new().opacity(1.0))
                .with_opt(if selected { styles.selected_option.as_ref() } else { None })
                .with_if(props.disabled, dimmed()),
            )
            .with_child(circle)
            .with_child(Element::text(option.label.clone()).with_styles(merge_styles(
                Style::new().font_size(16.0),
                styles.option_label.as_ref(),
            )));
        if !props.disabled {
            let set = ctx.setter(props);
            let value = option.value.clone();
            row = row.on_press(move || set(value.clone()));
        }
        row
    }
}

impl FormControl for RadioGroup {
    fn render(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
        let current = ctx.get(props.name);
        let options = Element::view()
            .with_styles(merge_styles(
                Style::new().margin_top(8.0),
                props.styles.options_container.as_ref(),
            ))
            .with_children(
                props
                    .options
                    .iter()
                    .map(|option| self.option(option, &current, props, ctx)),
            );
        field_shell(props, options)
    }
}
