//! Rule: a composable, declarative validation fragment for one field.
//!
//! A rule is a base [`Kind`], an ordered list of [`Check`]s and an optional
//! flag. Evaluation stops at the first failure and reports that check's
//! message. Rules deserialize from JSON (all checks except `refine`).
//!
//! ```ignore
//! let name = Rule::string().min_length(2, "Name must be at least 2 characters");
//! let email = Rule::string().email("Invalid email format").optional();
//! ```

use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::Validator;
use crate::value::{is_empty_value, is_unanswered, FieldValue};

/// Message reported when a typed rule sees no value.
pub const REQUIRED_MESSAGE: &str = "Required";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// The value type a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[default]
    Any,
    String,
    Number,
    Boolean,
    Array,
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Kind::Any => "any",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Array => "array",
        }
    }

    fn accepts(self, value: &FieldValue) -> bool {
        match self {
            Kind::Any => true,
            Kind::String => value.is_string(),
            Kind::Number => value.is_number(),
            Kind::Boolean => value.is_boolean(),
            Kind::Array => value.is_array(),
        }
    }
}

fn type_name(value: &FieldValue) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// A compiled regular expression that deserializes from its source string.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(regex: Regex) -> Self {
        Self(regex)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Pattern {
    type Error = regex::Error;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Regex::new(&source).map(Pattern)
    }
}

/// A caller-supplied predicate with its failure message.
#[derive(Clone)]
pub struct Refinement {
    predicate: Rc<dyn Fn(&FieldValue) -> bool>,
    message: String,
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// One constraint inside a rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Check {
    /// String length (in chars) or array length at least `len`.
    MinLength { len: usize, message: String },
    /// String length (in chars) or array length at most `len`.
    MaxLength { len: usize, message: String },
    /// A plausible email address.
    Email { message: String },
    /// String matches the regex.
    Pattern { pattern: Pattern, message: String },
    /// Number at least `value`.
    Min { value: f64, message: String },
    /// Number at most `value`.
    Max { value: f64, message: String },
    /// Array with at least `len` items.
    MinItems { len: usize, message: String },
    /// Not null, not an empty string, not an empty array.
    NonEmpty { message: String },
    /// An answered required field: not empty and not `false`.
    Filled { message: String },
    /// Value equals one of `values`.
    OneOf { values: Vec<FieldValue>, message: String },
    #[serde(skip)]
    Refine(Refinement),
}

fn length(value: &FieldValue) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

impl Check {
    /// `Ok(())` if `value` satisfies the check, otherwise its message.
    pub fn check(&self, value: &FieldValue) -> Result<(), String> {
        let (passed, message) = match self {
            Check::MinLength { len, message } => (length(value).is_some_and(|n| n >= *len), message),
            Check::MaxLength { len, message } => (length(value).is_some_and(|n| n <= *len), message),
            Check::Email { message } => (value.as_str().is_some_and(|s| EMAIL.is_match(s)), message),
            Check::Pattern { pattern, message } => {
                (value.as_str().is_some_and(|s| pattern.0.is_match(s)), message)
            }
            Check::Min { value: min, message } => (value.as_f64().is_some_and(|n| n >= *min), message),
            Check::Max { value: max, message } => (value.as_f64().is_some_and(|n| n <= *max), message),
            Check::MinItems { len, message } => {
                (value.as_array().is_some_and(|items| items.len() >= *len), message)
            }
            Check::NonEmpty { message } => (!is_empty_value(value), message),
            Check::Filled { message } => (!is_unanswered(value), message),
            Check::OneOf { values, message } => (values.contains(value), message),
            Check::Refine(refinement) => ((refinement.predicate)(value), &refinement.message),
        };
        if passed {
            Ok(())
        } else {
            Err(message.clone())
        }
    }

    /// Identity of the check, message included. Refinements are keyed on
    /// their predicate's address, so clones share a fingerprint and
    /// separately built closures never do.
    fn fingerprint(&self) -> String {
        match self {
            Check::MinLength { len, message } => format!("min_length:{len}:{message:?}"),
            Check::MaxLength { len, message } => format!("max_length:{len}:{message:?}"),
            Check::Email { message } => format!("email:{message:?}"),
            Check::Pattern { pattern, message } => format!("pattern:{:?}:{message:?}", pattern.as_str()),
            Check::Min { value, message } => format!("min:{value}:{message:?}"),
            Check::Max { value, message } => format!("max:{value}:{message:?}"),
            Check::MinItems { len, message } => format!("min_items:{len}:{message:?}"),
            Check::NonEmpty { message } => format!("non_empty:{message:?}"),
            Check::Filled { message } => format!("filled:{message:?}"),
            Check::OneOf { values, message } => {
                format!("one_of:{}:{message:?}", Value::from(values.clone()))
            }
            Check::Refine(r) => format!("refine:{:p}:{:?}", Rc::as_ptr(&r.predicate), r.message),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// Declarative validation rule for a single field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rule {
    #[serde(rename = "type")]
    kind: Kind,
    checks: Vec<Check>,
    optional: bool,
}

impl Rule {
    /// Accepts anything (including `null`) unless checks are added.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn string() -> Self {
        Self::of_kind(Kind::String)
    }

    pub fn number() -> Self {
        Self::of_kind(Kind::Number)
    }

    pub fn boolean() -> Self {
        Self::of_kind(Kind::Boolean)
    }

    pub fn array() -> Self {
        Self::of_kind(Kind::Array)
    }

    /// Any answered value: not `null`, `""`, `[]` or `false`.
    pub fn required(message: impl Into<String>) -> Self {
        Self::any().filled(message)
    }

    fn of_kind(kind: Kind) -> Self {
        Self { kind, ..Self::default() }
    }

    /// Append a check (builder).
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub fn min_length(self, len: usize, message: impl Into<String>) -> Self {
        self.check(Check::MinLength { len, message: message.into() })
    }

    pub fn max_length(self, len: usize, message: impl Into<String>) -> Self {
        self.check(Check::MaxLength { len, message: message.into() })
    }

    pub fn email(self, message: impl Into<String>) -> Self {
        self.check(Check::Email { message: message.into() })
    }

    pub fn pattern(self, regex: Regex, message: impl Into<String>) -> Self {
        self.check(Check::Pattern { pattern: Pattern::new(regex), message: message.into() })
    }

    pub fn min(self, value: f64, message: impl Into<String>) -> Self {
        self.check(Check::Min { value, message: message.into() })
    }

    pub fn max(self, value: f64, message: impl Into<String>) -> Self {
        self.check(Check::Max { value, message: message.into() })
    }

    pub fn min_items(self, len: usize, message: impl Into<String>) -> Self {
        self.check(Check::MinItems { len, message: message.into() })
    }

    pub fn non_empty(self, message: impl Into<String>) -> Self {
        self.check(Check::NonEmpty { message: message.into() })
    }

    /// Reject unanswered values, including an unchecked `false`.
    pub fn filled(self, message: impl Into<String>) -> Self {
        self.check(Check::Filled { message: message.into() })
    }

    pub fn one_of(self, values: impl IntoIterator<Item = FieldValue>, message: impl Into<String>) -> Self {
        self.check(Check::OneOf { values: values.into_iter().collect(), message: message.into() })
    }

    /// Custom predicate; fails with `message` when it returns `false`.
    pub fn refine(self, predicate: impl Fn(&FieldValue) -> bool + 'static, message: impl Into<String>) -> Self {
        self.check(Check::Refine(Refinement {
            predicate: Rc::new(predicate),
            message: message.into(),
        }))
    }

    /// Let `null` pass without running any check.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Evaluate the rule. The first failing step's message wins.
    pub fn evaluate(&self, value: &FieldValue) -> Result<(), String> {
        if value.is_null() && self.optional {
            return Ok(());
        }
        if !self.kind.accepts(value) {
            if value.is_null() {
                return Err(REQUIRED_MESSAGE.to_owned());
            }
            return Err(format!(
                "Expected {}, received {}",
                self.kind.name(),
                type_name(value)
            ));
        }
        self.checks.iter().try_for_each(|check| check.check(value))
    }

    /// Stable description of the rule's shape, used as a memo key.
    pub fn fingerprint(&self) -> String {
        let mut parts = vec![self.kind.name().to_owned()];
        parts.extend(self.checks.iter().map(Check::fingerprint));
        if self.optional {
            parts.push("optional".to_owned());
        }
        parts.join("|")
    }
}

impl Validator for Rule {
    fn validate(&self, _field: &str, value: &FieldValue) -> Result<(), String> {
        self.evaluate(value)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
