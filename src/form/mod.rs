//! Form configuration and the [`DynamicForm`] engine.
//!
//! - [`config`]: declarative field, section and form descriptions.
//! - [`submit`]: submit handler, failure, state and outcome types.
//! - [`engine`]: validation, submission and rendering of one form instance.

pub mod config;
pub mod engine;
pub mod submit;

pub use config::{ChoiceOption, FieldConfig, FieldType, FormConfig, Platform, SectionConfig};
pub use engine::{fail, DynamicForm, SUBMITTING_LABEL, UNTITLED_SECTION};
pub use submit::{
    Dispatch, LocalBoxFuture, Outcome, SubmitError, SubmitHandler, SubmitResult, SubmitState, FALLBACK_MESSAGE,
};
