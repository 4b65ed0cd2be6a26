//! Field values: the dynamic value type bound to every form field.

use serde_json::{Map, Value};

/// The value held by a single form field.
pub type FieldValue = Value;

/// Submitted form values keyed by field name, in declaration order.
pub type FormValues = Map<String, Value>;

/// Textual form of a value, used for option keys and test ids.
///
/// Strings are used verbatim; everything else uses its JSON rendering.
pub fn value_key(value: &FieldValue) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a value counts as "empty" for required-ness purposes.
///
/// `null`, the empty string and the empty array are empty. Booleans, numbers
/// and objects are present.
pub fn is_empty_value(value: &FieldValue) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Whether a required field is still unanswered: empty, or an unchecked `false`.
pub fn is_unanswered(value: &FieldValue) -> bool {
    is_empty_value(value) || matches!(value, Value::Bool(false))
}

/// Interpret a value as a boolean flag: only `true` is set.
pub fn is_truthy(value: &FieldValue) -> bool {
    matches!(value, Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_key_strings_verbatim() {
        assert_eq!(value_key(&json!("2")), "2");
        assert_eq!(value_key(&json!("a b")), "a b");
    }

    #[test]
    fn value_key_non_strings_as_json() {
        assert_eq!(value_key(&json!(2)), "2");
        assert_eq!(value_key(&json!(true)), "true");
        assert_eq!(value_key(&Value::Null), "null");
    }

    #[test]
    fn emptiness() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!([])));
        assert!(!is_empty_value(&json!("x")));
        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!(0)));
    }

    #[test]
    fn unanswered() {
        assert!(is_unanswered(&Value::Null));
        assert!(is_unanswered(&json!("")));
        assert!(is_unanswered(&json!(false)));
        assert!(!is_unanswered(&json!(true)));
        assert!(!is_unanswered(&json!(0)));
        assert!(!is_unanswered(&json!(["a"])));
    }

    #[test]
    fn truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("true")));
        assert!(!is_truthy(&Value::Null));
    }
}
