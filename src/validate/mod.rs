//! Validation: the pluggable [`Validator`] capability and its built-in rule engine.
//!
//! The form engine only ever talks to `dyn Validator`. [`DerivedSchema`] is the
//! default implementation, derived from field configuration; any other type
//! (including a plain closure) can be plugged in instead.

mod rule;
mod schema;

pub use rule::{Check, Kind, Pattern, Refinement, Rule, REQUIRED_MESSAGE};
pub use schema::{DerivedSchema, FieldErrors};

use crate::value::{FieldValue, FormValues};

/// Validates one named field value.
pub trait Validator {
    /// `Ok(())` if `value` is acceptable for `field`, otherwise the message to show.
    fn validate(&self, field: &str, value: &FieldValue) -> Result<(), String>;
}

impl<F> Validator for F
where
    F: Fn(&str, &FieldValue) -> Result<(), String>,
{
    fn validate(&self, field: &str, value: &FieldValue) -> Result<(), String> {
        self(field, value)
    }
}

/// Run `validator` over `names`, reading each value from `values`.
///
/// Missing values are validated as `null`. Errors come back in `names` order.
pub fn validate_fields<'a, V>(
    validator: &V,
    names: impl IntoIterator<Item = &'a str>,
    values: &FormValues,
) -> FieldErrors
where
    V: Validator + ?Sized,
{
    let null = FieldValue::Null;
    names
        .into_iter()
        .filter_map(|name| {
            let value = values.get(name).unwrap_or(&null);
            validator
                .validate(name, value)
                .err()
                .map(|message| (name.to_owned(), message))
        })
        .collect()
}
