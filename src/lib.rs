//! # gilt-forms
//!
//! Declarative, schema-validated dynamic forms built from headless widgets.
//!
//! A [`FormConfig`] describes sections of typed fields. [`DynamicForm`] turns
//! it into a validation schema, a value store and an element tree of
//! controls, then runs the submit flow: validate, call the handler once,
//! surface field or submission errors. Nothing is drawn; the element tree is
//! mounted into a [`Dom`](dom::Dom) for queries and press delivery, and a host
//! toolkit maps it onto real widgets.
//!
//! ## Core Systems
//!
//! - **[`form`]**: Form and field configuration, the [`DynamicForm`] engine, submit flow
//! - **[`validate`]**: Pluggable [`Validator`] trait, rules, schema derivation
//! - **[`controls`]**: Field controls: text, checkbox, radio, dropdown, toggle; registry
//! - **[`layout`]**: Row / column arrangement of a section's fields; registry
//! - **[`widgets`]**: Built-in widgets: ButtonPair
//! - **[`binding`]**: Field binding trait and the signal-backed form store
//! - **[`reactive`]**: Signals, effects, batching (Leptos-style auto-tracking)
//! - **[`view`]**: Declarative element tree, handlers, accessibility, test ids
//! - **[`dom`]**: Slotmap-backed mounted tree with queries and press bubbling
//! - **[`style`]**: Typed style properties, layering, override slots
//! - **[`testing`]**: Headless pilot and tree outlines
//! - **[`geometry`]**: Axis and Spacing primitives

// Foundation
pub mod error;
pub mod geometry;
pub mod value;

// Core systems
pub mod dom;
pub mod style;
pub mod view;

// Events and reactivity
pub mod binding;
pub mod reactive;

// Forms
pub mod controls;
pub mod form;
pub mod layout;
pub mod validate;
pub mod widgets;

// Testing
pub mod testing;

pub use binding::{FieldBinding, FormStore, Subscription};
pub use controls::{ControlRegistry, FormControl};
pub use error::{Error, Result};
pub use form::{
    DynamicForm, FieldConfig, FieldType, FormConfig, Outcome, SectionConfig, SubmitError, SubmitState,
};
pub use layout::{Layout, LayoutProps, LayoutRegistry};
pub use validate::{FieldErrors, Rule, Validator};
pub use value::{FieldValue, FormValues};
