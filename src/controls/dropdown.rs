//! Dropdown: one value out of a list presented in a transient overlay.

use super::{dimmed, field_shell, input_box, ControlContext, ControlProps, FormControl};
use crate::style::{merge_styles, Justify, Style, StyleList};
use crate::view::{ids, Element, Role};

/// Trigger text when nothing is selected and no placeholder is configured.
pub const DROPDOWN_PLACEHOLDER: &str = "Select...";

/// Dropdown control.
///
/// Pressing the trigger opens the overlay (no-op while disabled). Choosing an
/// option writes its value and then closes the overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dropdown;

impl Dropdown {
    pub fn new() -> Self {
        Self
    }

    fn overlay(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
        let open = ctx.overlays().is_open(props.name);
        let overlay = Element::overlay(open)
            .with_test_id(ids::dropdown_overlay(props.name))
            .with_style(
                Style::new()
                    .flex(1.0)
                    .justify_content(Justify::FlexEnd)
                    .background_color("rgba(0,0,0,0.5)"),
            );
        if !open {
            return overlay;
        }

        let options = props.options.iter().map(|option| {
            let mut row = Element::pressable()
                .with_test_id(ids::dropdown_option(props.name, &option.value))
                .with_role(Role::Button)
                .with_accessibility_label(option.label.clone())
                .with_styles(merge_styles(
                    Style::new()
                        .padding(16.0)
                        .border_bottom_width(1.0)
                        .border_bottom_color("#eee"),
                    props.styles.option.as_ref(),
                ))
                .with_child(Element::text(option.label.clone()));
            if !props.disabled {
                let set = ctx.setter(props);
                let overlays = ctx.overlays().clone();
                let name = props.name.to_owned();
                let value = option.value.clone();
                row = row.on_press(move || {
                    set(value.clone());
                    overlays.close(&name);
                });
            }
            row
        });
        let sheet = Element::view()
            .with_style(
                Style::new()
                    .background_color("white")
                    .border_radius(20.0)
                    .padding(16.0),
            )
            .with_children(options);
        overlay.with_child(sheet)
    }
}

impl FormControl for Dropdown {
    fn render(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
        let current = ctx.get(props.name);
        let shown = props
            .options
            .iter()
            .find(|option| option.value == current)
            .map(|option| option.label.clone())
            .unwrap_or_else(|| props.placeholder.unwrap_or(DROPDOWN_PLACEHOLDER).to_owned());

        let mut trigger = Element::pressable()
            .with_test_id(ids::dropdown(props.name))
            .with_role(Role::Button)
            .with_accessibility_label(props.display_label())
            .disabled(props.disabled)
            .with_styles(
                StyleList::of(input_box().padding(12.0))
                    .with_if(props.disabled, dimmed())
                    .with_opt(props.styles.input.as_ref()),
            )
            .with_child(Element::text(shown));
        if !props.disabled {
            let overlays = ctx.overlays().clone();
            let name = props.name.to_owned();
            trigger = trigger.on_press(move || overlays.open(&name));
        }

        let body = Element::view()
            .with_child(trigger)
            .with_child(self.overlay(props, ctx));
        field_shell(props, body)
    }
}
