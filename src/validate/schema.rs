//! DerivedSchema: per-field rules computed from field configuration.

use std::collections::HashSet;

use super::rule::{Rule, REQUIRED_MESSAGE};
use super::{validate_fields, Validator};
use crate::error::{Error, Result};
use crate::form::{FieldConfig, SectionConfig};
use crate::value::{FieldValue, FormValues};

// ---------------------------------------------------------------------------
// FieldErrors
// ---------------------------------------------------------------------------

/// Field name → error message, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message for `field`, replacing any previous one in place.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((field, message)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        let index = self.entries.iter().position(|(name, _)| name == field)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// DerivedSchema
// ---------------------------------------------------------------------------

/// The rule for every declared field, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct DerivedSchema {
    rules: Vec<(String, Rule)>,
}

impl DerivedSchema {
    /// Build the schema from all fields of all sections.
    ///
    /// Fails with [`Error::DuplicateField`] if a name is declared twice.
    pub fn derive(sections: &[SectionConfig]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut rules = Vec::new();
        for field in sections.iter().flat_map(|s| s.fields.iter()) {
            if !seen.insert(field.name.as_str()) {
                return Err(Error::DuplicateField(field.name.clone()));
            }
            rules.push((field.name.clone(), Self::field_rule(field)));
        }
        Ok(Self { rules })
    }

    /// The effective rule for a single field.
    pub fn field_rule(field: &FieldConfig) -> Rule {
        match (field.required, &field.validation) {
            (true, None) => Rule::required(REQUIRED_MESSAGE),
            (true, Some(rule)) => rule.clone().filled(REQUIRED_MESSAGE),
            (false, Some(rule)) => rule.clone(),
            (false, None) => Rule::any(),
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    pub fn rule(&self, field: &str) -> Option<&Rule> {
        self.rules.iter().find(|(name, _)| name == field).map(|(_, rule)| rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Field names and rule shapes; equal fingerprints mean equal schemas.
    pub fn fingerprint(&self) -> String {
        self.rules
            .iter()
            .map(|(name, rule)| format!("{name}={}", rule.fingerprint()))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Validate every declared field against `values`.
    pub fn validate_all(&self, values: &FormValues) -> FieldErrors {
        validate_fields(self, self.field_names(), values)
    }
}

impl Validator for DerivedSchema {
    /// Undeclared fields always pass.
    fn validate(&self, field: &str, value: &FieldValue) -> std::result::Result<(), String> {
        match self.rule(field) {
            Some(rule) => rule.evaluate(value),
            None => Ok(()),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldType;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn sections() -> Vec<SectionConfig> {
        vec![
            SectionConfig::new()
                .with_field(
                    FieldConfig::new("firstName", FieldType::Text, "First Name")
                        .required()
                        .with_validation(
                            Rule::string().min_length(2, "Name must be at least 2 characters"),
                        ),
                )
                .with_field(FieldConfig::new("nickname", FieldType::Text, "Nickname")),
            SectionConfig::new()
                .with_field(FieldConfig::new("agree", FieldType::Checkbox, "Agree").required()),
        ]
    }

    #[test]
    fn field_set_matches_declarations() {
        let schema = DerivedSchema::derive(&sections()).unwrap();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["firstName", "nickname", "agree"]);
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut sections = sections();
        sections[1]
            .fields
            .push(FieldConfig::new("nickname", FieldType::Toggle, "Again"));
        let err = DerivedSchema::derive(&sections).unwrap_err();
        assert!(matches!(err, Error::DuplicateField(name) if name == "nickname"));
    }

    #[test]
    fn required_without_rule_needs_an_answer() {
        let schema = DerivedSchema::derive(&sections()).unwrap();
        assert_eq!(schema.validate("agree", &Value::Null), Err("Required".to_owned()));
        assert_eq!(schema.validate("agree", &json!(false)), Err("Required".to_owned()));
        assert_eq!(schema.validate("agree", &json!("")), Err("Required".to_owned()));
        assert!(schema.validate("agree", &json!(true)).is_ok());
    }

    #[test]
    fn required_composes_into_rule() {
        let schema = DerivedSchema::derive(&sections()).unwrap();
        assert_eq!(
            schema.validate("firstName", &json!("")),
            Err("Name must be at least 2 characters".to_owned())
        );
        assert_eq!(schema.validate("firstName", &Value::Null), Err("Required".to_owned()));
        assert!(schema.validate("firstName", &json!("John")).is_ok());
    }

    #[test]
    fn optional_fields_always_pass() {
        let schema = DerivedSchema::derive(&sections()).unwrap();
        assert!(schema.validate("nickname", &Value::Null).is_ok());
        assert!(schema.validate("undeclared", &json!(1)).is_ok());
    }

    #[test]
    fn validate_all_in_declaration_order() {
        let schema = DerivedSchema::derive(&sections()).unwrap();
        let errors = schema.validate_all(&FormValues::new());
        let collected: Vec<_> = errors.iter().collect();
        assert_eq!(collected, vec![("firstName", "Required"), ("agree", "Required")]);
    }

    #[test]
    fn fingerprint_tracks_rules() {
        let a = DerivedSchema::derive(&sections()).unwrap();
        let mut changed = sections();
        changed[0].fields[1].required = true;
        let b = DerivedSchema::derive(&changed).unwrap();
        assert_eq!(a.fingerprint(), DerivedSchema::derive(&sections()).unwrap().fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn field_errors_insert_replaces_in_place() {
        let mut errors = FieldErrors::new();
        errors.insert("a", "one");
        errors.insert("b", "two");
        errors.insert("a", "three");
        assert_eq!(errors.iter().collect::<Vec<_>>(), vec![("a", "three"), ("b", "two")]);
        assert_eq!(errors.remove("a"), Some("three".to_owned()));
        assert!(!errors.contains("a"));
        assert_eq!(errors.len(), 1);
    }
}
