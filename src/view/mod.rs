//! Declarative view tree: [`Element`], handlers, accessibility, test ids.

pub mod element;
pub mod ids;

pub use element::{
    Accessibility, AvoidBehavior, ChangeHandler, Element, ElementKind, ElementProps,
    KeyboardType, PressHandler, Role,
};
