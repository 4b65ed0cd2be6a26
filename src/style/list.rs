//! StyleList: an ordered stack of style layers resolved last-wins.
//!
//! Every component builds its element styles the same way: a default layer,
//! then zero or more conditional layers (disabled, selected, pressed), then the
//! caller's override. [`merge_styles`] is the common two-layer case.

use super::styles::Style;

/// Ordered style layers. Later layers override earlier ones per property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleList {
    layers: Vec<Style>,
}

impl StyleList {
    /// An empty list; resolves to an empty [`Style`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A list holding a single layer.
    pub fn of(style: Style) -> Self {
        Self { layers: vec![style] }
    }

    /// Append a layer (builder).
    pub fn with(mut self, style: Style) -> Self {
        self.push(style);
        self
    }

    /// Append a layer only when `style` is present (builder).
    pub fn with_opt(mut self, style: Option<&Style>) -> Self {
        if let Some(style) = style {
            self.push(style.clone());
        }
        self
    }

    /// Append a layer only when `condition` holds (builder).
    pub fn with_if(mut self, condition: bool, style: Style) -> Self {
        if condition {
            self.push(style);
        }
        self
    }

    /// Append a layer. Empty layers are skipped.
    pub fn push(&mut self, style: Style) {
        if !style.is_empty() {
            self.layers.push(style);
        }
    }

    /// The layers in application order.
    pub fn layers(&self) -> &[Style] {
        &self.layers
    }

    /// Number of non-empty layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no layer has been added.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Fold all layers into one [`Style`].
    pub fn resolve(&self) -> Style {
        self.layers
            .iter()
            .fold(Style::new(), |acc, layer| acc.merge(layer))
    }
}

impl From<Style> for StyleList {
    fn from(style: Style) -> Self {
        StyleList::of(style)
    }
}

/// Combine a default style with an optional caller override.
pub fn merge_styles(default: Style, custom: Option<&Style>) -> StyleList {
    StyleList::of(default).with_opt(custom)
}
