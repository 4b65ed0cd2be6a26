//! LayoutRegistry: layout tag → layout implementation.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::{Column, Layout, Row};

/// Tag consulted when a section names no layout of its own.
pub const DEFAULT_LAYOUT: &str = "default";

/// Named layouts available to form sections.
#[derive(Clone, Default)]
pub struct LayoutRegistry {
    layouts: HashMap<String, Rc<dyn Layout>>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `row` and `column`. No `default` entry.
    pub fn with_defaults() -> Self {
        Self::new().with("row", Row).with("column", Column)
    }

    /// Register `layout` under `tag` (builder).
    pub fn with(mut self, tag: impl Into<String>, layout: impl Layout + 'static) -> Self {
        self.register(tag, Rc::new(layout));
        self
    }

    pub fn register(&mut self, tag: impl Into<String>, layout: Rc<dyn Layout>) {
        self.layouts.insert(tag.into(), layout);
    }

    pub fn get(&self, tag: &str) -> Option<Rc<dyn Layout>> {
        self.layouts.get(tag).cloned()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Pick the layout for a section: the explicit component, then the
    /// section's tag, then the `default` entry. `None` means plain stacking.
    pub fn resolve(&self, explicit: Option<&Rc<dyn Layout>>, tag: Option<&str>) -> Option<Rc<dyn Layout>> {
        if let Some(layout) = explicit {
            return Some(layout.clone());
        }
        if let Some(tag) = tag {
            match self.get(tag) {
                Some(layout) => return Some(layout),
                None => trace!(tag, "unknown layout tag, falling back"),
            }
        }
        self.get(DEFAULT_LAYOUT)
    }
}

impl fmt::Debug for LayoutRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.layouts.keys().collect();
        tags.sort();
        f.debug_struct("LayoutRegistry").field("tags", &tags).finish()
    }
}
