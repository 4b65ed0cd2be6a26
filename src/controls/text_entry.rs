//! TextEntry: free-text input.

use super::{dimmed, field_shell, input_box, ControlContext, ControlProps, FormControl};
use crate::style::StyleList;
use crate::value::value_key;
use crate::view::{ids, Element};

/// Single-line text input writing `Value::String`.
///
/// Supports masked entry and a keyboard hint. Disabled maps to non-editable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEntry;

impl TextEntry {
    pub fn new() -> Self {
        Self
    }
}

impl FormControl for TextEntry {
    fn render(&self, props: &ControlProps<'_>, ctx: &ControlContext) -> Element {
        let current = ctx.get(props.name);
        let text = if current.is_null() {
            String::new()
        } else {
            value_key(&current)
        };

        let mut input = Element::text_input()
            .with_test_id(ids::input(props.name))
            .with_accessibility_label(props.display_label())
            .with_styles(
                StyleList::of(input_box().padding(8.0))
                    .with_if(props.disabled, dimmed())
                    .with_opt(props.styles.input.as_ref()),
            )
            .with_value(text.into())
            .secure(props.secure)
            .keyboard(props.keyboard)
            .editable(!props.disabled)
            .disabled(props.disabled);
        if let Some(placeholder) = props.placeholder {
            input = input.with_placeholder(placeholder);
        }
        if !props.disabled {
            input = input.on_change(ctx.setter(props));
        }

        field_shell(props, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{FieldBinding, FormStore};
    use crate::dom::Dom;
    use crate::view::{ElementKind, KeyboardType};
    use serde_json::{json, Value};
    use std::rc::Rc;

    fn setup() -> (Rc<FormStore>, ControlContext) {
        let store = Rc::new(FormStore::new());
        let ctx = ControlContext::new(store.clone());
        (store, ctx)
    }

    #[test]
    fn renders_label_input_and_error() {
        let (_, ctx) = setup();
        let props = ControlProps::new("email", "Email")
            .required(true)
            .with_error(Some("Invalid email format"));
        let dom = Dom::mount(&TextEntry.render(&props, &ctx));
        assert_eq!(dom.query_by_text("Email *").len(), 1);
        let input = dom.get(dom.query_by_test_id("input-email").unwrap()).unwrap();
        assert_eq!(input.kind, ElementKind::TextInput);
        assert_eq!(input.accessibility.label.as_deref(), Some("Email *"));
        assert!(dom.query_by_test_id("error-email").is_some());
    }

    #[test]
    fn shows_current_value() {
        let (store, ctx) = setup();
        store.set("first", json!("Ada"));
        let el = TextEntry.render(&ControlProps::new("first", "First"), &ctx);
        let dom = Dom::mount(&el);
        let input = dom.get(dom.query_by_test_id("input-first").unwrap()).unwrap();
        assert_eq!(input.props.value, Some(json!("Ada")));
    }

    #[test]
    fn change_writes_string() {
        let (store, ctx) = setup();
        let dom = Dom::mount(&TextEntry.render(&ControlProps::new("first", "First"), &ctx));
        let input = dom.get(dom.query_by_test_id("input-first").unwrap()).unwrap();
        input.on_change.as_ref().unwrap().call(json!("John"));
        assert_eq!(store.get("first"), json!("John"));
    }

    #[test]
    fn passes_secure_and_keyboard() {
        let (_, ctx) = setup();
        let mut props = ControlProps::new("pw", "Password");
        props.secure = true;
        props.keyboard = KeyboardType::EmailAddress;
        props.placeholder = Some("secret");
        let dom = Dom::mount(&TextEntry.render(&props, &ctx));
        let input = dom.get(dom.query_by_test_id("input-pw").unwrap()).unwrap();
        assert!(input.props.secure);
        assert_eq!(input.props.keyboard, Some(KeyboardType::EmailAddress));
        assert_eq!(input.props.placeholder.as_deref(), Some("secret"));
    }

    #[test]
    fn disabled_is_read_only_and_dimmed() {
        let (store, ctx) = setup();
        let props = ControlProps::new("first", "First").disabled(true);
        let dom = Dom::mount(&TextEntry.render(&props, &ctx));
        let input = dom.get(dom.query_by_test_id("input-first").unwrap()).unwrap();
        assert!(!input.accepts_change());
        assert!(input.on_change.is_none());
        assert_eq!(input.props.editable, Some(false));
        assert_eq!(input.style.opacity, Some(0.5));
        assert_eq!(store.get("first"), Value::Null);
    }
}
