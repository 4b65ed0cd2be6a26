//! ControlRegistry: field type tag → control implementation.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::{Checkbox, Dropdown, FormControl, RadioGroup, TextEntry, Toggle};
use crate::form::FieldType;

/// Lookup table consulted by the form engine for each field's type tag.
///
/// Built-ins and caller-registered controls share the same table; a later
/// [`register`](Self::register) for an existing tag replaces it.
#[derive(Clone, Default)]
pub struct ControlRegistry {
    controls: HashMap<String, Rc<dyn FormControl>>,
}

impl ControlRegistry {
    /// An empty registry: every field without an explicit component is omitted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The five built-in controls under their tags.
    pub fn with_defaults() -> Self {
        Self::new()
            .with(FieldType::Text, TextEntry)
            .with(FieldType::Checkbox, Checkbox)
            .with(FieldType::Radio, RadioGroup)
            .with(FieldType::Dropdown, Dropdown)
            .with(FieldType::Toggle, Toggle)
    }

    /// Register `control` under `tag` (builder).
    pub fn with(mut self, tag: impl Into<FieldType>, control: impl FormControl + 'static) -> Self {
        self.register(tag, Rc::new(control));
        self
    }

    /// Register `control` under `tag`, replacing any previous entry.
    pub fn register(&mut self, tag: impl Into<FieldType>, control: Rc<dyn FormControl>) {
        let tag: FieldType = tag.into();
        self.controls.insert(tag.as_str().to_owned(), control);
    }

    pub fn get(&self, tag: &FieldType) -> Option<Rc<dyn FormControl>> {
        self.controls.get(tag.as_str()).cloned()
    }

    pub fn contains(&self, tag: &FieldType) -> bool {
        self.controls.contains_key(tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.controls.keys().collect();
        tags.sort();
        f.debug_struct("ControlRegistry").field("tags", &tags).finish()
    }
}
