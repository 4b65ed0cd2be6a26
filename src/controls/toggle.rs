//! Toggle: boolean value behind a binary switch.

use serde_json::Value;

use super::{container, dimmed, error, ControlContext, ControlProps, FormControl};
use crate::style::{merge_styles, Align, FlexDirection, Justify, Style, StyleList};
use crate::value::is_truthy;
use crate::view::{ids, Element, Role};

/// Switch control writing `Value::Bool`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Toggle;

impl Toggle {
    pub fn new() -> Self {
        Self
    }
}

impl FormControl for Toggle {
    fn render(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
        let on = is_truthy(&ctx.get(props.name));

        let mut switch = Element::switch()
            .with_test_id(ids::toggle(props.name))
            .with_role(Role::Switch)
            .with_accessibility_label(props.display_label())
            .checked(on)
            .with_value(Value::Bool(on))
            .disabled(props.disabled)
            .with_styles(
                StyleList::new()
                    .with_if(props.disabled, dimmed())
                    .with_opt(props.styles.input.as_ref()),
            );
        if !props.disabled {
            switch = switch.on_change(ctx.setter(props));
        }

        let text = Element::text(props.display_label())
            .with_test_id(ids::label(props.name))
            .with_styles(merge_styles(
                Style::new().font_size(16.0),
                props.styles.label.as_ref(),
            ));
        let row = Element::view()
            .with_style(
                Style::new()
                    .flex_direction(FlexDirection::Row)
                    .align_items(Align::Center)
                    .justify_content(Justify::SpaceBetween),
            )
            .with_child(text)
            .with_child(switch);

        container(props).with_child(row).with_child_opt(error(props))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{FieldBinding, FormStore};
    use crate::dom::Dom;
    use crate::view::ElementKind;
    use serde_json::json;
    use std::rc::Rc;

    #[test]
    fn reflects_and_writes_bool() {
        let store = Rc::new(FormStore::new());
        let ctx = ControlContext::new(store.clone());
        let props = ControlProps::new("notify", "Notifications");

        let dom = Dom::mount(&Toggle.render(&props, &ctx));
        let id = dom.query_by_test_id("toggle-notify").unwrap();
        let node = dom.get(id).unwrap();
        assert_eq!(node.kind, ElementKind::Switch);
        assert_eq!(node.accessibility.checked, Some(false));
        node.on_change.as_ref().unwrap().call(json!(true));
        assert_eq!(store.get("notify"), json!(true));

        let dom = Dom::mount(&Toggle.render(&props, &ctx));
        let node = dom.get(dom.query_by_test_id("toggle-notify").unwrap()).unwrap();
        assert_eq!(node.props.value, Some(json!(true)));
    }

    #[test]
    fn label_and_error() {
        let store = Rc::new(FormStore::new());
        let ctx = ControlContext::new(store);
        let props = ControlProps::new("notify", "Notifications")
            .required(true)
            .with_error(Some("Required"));
        let dom = Dom::mount(&Toggle.render(&props, &ctx));
        assert_eq!(dom.query_by_text("Notifications *").len(), 1);
        assert!(dom.query_by_test_id("error-notify").is_some());
    }

    #[test]
    fn disabled_switch_rejects_changes() {
        let store = Rc::new(FormStore::new());
        let ctx = ControlContext::new(store.clone());
        let props = ControlProps::new("notify", "Notifications").disabled(true);
        let dom = Dom::mount(&Toggle.render(&props, &ctx));
        let node = dom.get(dom.query_by_test_id("toggle-notify").unwrap()).unwrap();
        assert!(!node.accepts_change());
        assert_eq!(node.style.opacity, Some(0.5));
        assert_eq!(store.get("notify"), Value::Null);
    }
}
