//! Layout primitives: arrange a sequence of elements with uniform spacing.
//!
//! Spacing uses negative-outer / positive-inner margins: the group container
//! gets `-spacing / 2` margin on the layout axis and every child is wrapped in
//! a view with `spacing / 2` padding on the same axis, so the group's outer
//! bounds are unaffected by the spacing at its own edges.

mod registry;
mod stack;

pub use registry::{LayoutRegistry, DEFAULT_LAYOUT};
pub use stack::{Column, Row};

use serde::Deserialize;

use crate::style::Style;
use crate::view::Element;

/// Spacing used when none is configured.
pub const DEFAULT_SPACING: f32 = 8.0;

/// Arranges children into a single container element.
pub trait Layout {
    fn arrange(&self, children: Vec<Element>, props: &LayoutProps) -> Element;
}

/// Per-section layout parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutProps {
    /// Gap between adjacent children; [`DEFAULT_SPACING`] when unset.
    pub spacing: Option<f32>,
    /// Applied to the outer container after the layout's own style.
    pub style: Option<Style>,
}

impl LayoutProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn spacing(&self) -> f32 {
        self.spacing.unwrap_or(DEFAULT_SPACING)
    }
}
