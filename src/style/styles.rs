//! Style struct with typed `Option<T>` fields for every supported property.
//!
//! This is the central style representation. `None` means "not set": when
//! styles are merged, an unset property never overrides a set one.

use serde::Deserialize;

use crate::geometry::{Axis, Spacing};

/// Main-axis direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexDirection {
    Row,
    Column,
}

/// Whether children wrap onto new lines when they overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexWrap {
    NoWrap,
    Wrap,
}

/// Cross-axis alignment of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
}

/// Main-axis distribution of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justify {
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceEvenly,
}

/// Positioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Relative,
    /// Absolutely positioned, covering the parent on all four sides.
    AbsoluteFill,
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Medium,
    SemiBold,
    Bold,
}

/// All style properties for an element. Each field is `Option<T>`; `None` means unset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    // Flex layout
    pub flex: Option<f32>,
    pub flex_grow: Option<f32>,
    pub flex_direction: Option<FlexDirection>,
    pub flex_wrap: Option<FlexWrap>,
    pub align_items: Option<Align>,
    pub justify_content: Option<Justify>,
    pub position: Option<Position>,

    // Sizing
    pub width: Option<f32>,
    pub height: Option<f32>,

    // Spacing
    pub margin_top: Option<f32>,
    pub margin_right: Option<f32>,
    pub margin_bottom: Option<f32>,
    pub margin_left: Option<f32>,
    pub padding_top: Option<f32>,
    pub padding_right: Option<f32>,
    pub padding_bottom: Option<f32>,
    pub padding_left: Option<f32>,

    // Border
    pub border_width: Option<f32>,
    pub border_bottom_width: Option<f32>,
    pub border_radius: Option<f32>,
    pub border_color: Option<String>,
    pub border_bottom_color: Option<String>,

    // Colors
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub opacity: Option<f32>,

    // Text
    pub font_size: Option<f32>,
    pub font_weight: Option<FontWeight>,
}

impl Style {
    /// Create a new `Style` with all fields set to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `other` on top of `self`. For each field, if `other` has a value (`Some`),
    /// use it; otherwise keep `self`'s value. Later layers win.
    pub fn merge(&self, other: &Style) -> Style {
        /// Helper: pick `other` if set, otherwise keep `base`.
        fn merge_opt<T: Clone>(base: &Option<T>, other: &Option<T>) -> Option<T> {
            if other.is_some() {
                other.clone()
            } else {
                base.clone()
            }
        }

        Style {
            flex: merge_opt(&self.flex, &other.flex),
            flex_grow: merge_opt(&self.flex_grow, &other.flex_grow),
            flex_direction: merge_opt(&self.flex_direction, &other.flex_direction),
            flex_wrap: merge_opt(&self.flex_wrap, &other.flex_wrap),
            align_items: merge_opt(&self.align_items, &other.align_items),
            justify_content: merge_opt(&self.justify_content, &other.justify_content),
            position: merge_opt(&self.position, &other.position),

            width: merge_opt(&self.width, &other.width),
            height: merge_opt(&self.height, &other.height),

            margin_top: merge_opt(&self.margin_top, &other.margin_top),
            margin_right: merge_opt(&self.margin_right, &other.margin_right),
            margin_bottom: merge_opt(&self.margin_bottom, &other.margin_bottom),
            margin_left: merge_opt(&self.margin_left, &other.margin_left),
            padding_top: merge_opt(&self.padding_top, &other.padding_top),
            padding_right: merge_opt(&self.padding_right, &other.padding_right),
            padding_bottom: merge_opt(&self.padding_bottom, &other.padding_bottom),
            padding_left: merge_opt(&self.padding_left, &other.padding_left),

            border_width: merge_opt(&self.border_width, &other.border_width),
            border_bottom_width: merge_opt(&self.border_bottom_width, &other.border_bottom_width),
            border_radius: merge_opt(&self.border_radius, &other.border_radius),
            border_color: merge_opt(&self.border_color, &other.border_color),
            border_bottom_color: merge_opt(&self.border_bottom_color, &other.border_bottom_color),

            color: merge_opt(&self.color, &other.color),
            background_color: merge_opt(&self.background_color, &other.background_color),
            opacity: merge_opt(&self.opacity, &other.opacity),

            font_size: merge_opt(&self.font_size, &other.font_size),
            font_weight: merge_opt(&self.font_weight, &other.font_weight),
        }
    }

    /// Returns `true` if no property is set.
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }

    /// Resolved margin box; unset sides count as zero.
    pub fn margin_box(&self) -> Spacing {
        Spacing::new(
            self.margin_top.unwrap_or(0.0),
            self.margin_right.unwrap_or(0.0),
            self.margin_bottom.unwrap_or(0.0),
            self.margin_left.unwrap_or(0.0),
        )
    }

    /// Resolved padding box; unset sides count as zero.
    pub fn padding_box(&self) -> Spacing {
        Spacing::new(
            self.padding_top.unwrap_or(0.0),
            self.padding_right.unwrap_or(0.0),
            self.padding_bottom.unwrap_or(0.0),
            self.padding_left.unwrap_or(0.0),
        )
    }

    // -- builders ----------------------------------------------------------

    pub fn flex(mut self, value: f32) -> Self {
        self.flex = Some(value);
        self
    }

    pub fn flex_grow(mut self, value: f32) -> Self {
        self.flex_grow = Some(value);
        self
    }

    pub fn flex_direction(mut self, value: FlexDirection) -> Self {
        self.flex_direction = Some(value);
        self
    }

    pub fn flex_wrap(mut self, value: FlexWrap) -> Self {
        self.flex_wrap = Some(value);
        self
    }

    pub fn align_items(mut self, value: Align) -> Self {
        self.align_items = Some(value);
        self
    }

    pub fn justify_content(mut self, value: Justify) -> Self {
        self.justify_content = Some(value);
        self
    }

    pub fn position(mut self, value: Position) -> Self {
        self.position = Some(value);
        self
    }

    pub fn width(mut self, value: f32) -> Self {
        self.width = Some(value);
        self
    }

    pub fn height(mut self, value: f32) -> Self {
        self.height = Some(value);
        self
    }

    pub fn margin_top(mut self, value: f32) -> Self {
        self.margin_top = Some(value);
        self
    }

    pub fn margin_right(mut self, value: f32) -> Self {
        self.margin_right = Some(value);
        self
    }

    pub fn margin_bottom(mut self, value: f32) -> Self {
        self.margin_bottom = Some(value);
        self
    }

    pub fn margin_left(mut self, value: f32) -> Self {
        self.margin_left = Some(value);
        self
    }

    /// Set left and right margins.
    pub fn margin_horizontal(self, value: f32) -> Self {
        self.margin_left(value).margin_right(value)
    }

    /// Set top and bottom margins.
    pub fn margin_vertical(self, value: f32) -> Self {
        self.margin_top(value).margin_bottom(value)
    }

    /// Set both margins on `axis`.
    pub fn margin_along(self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => self.margin_horizontal(value),
            Axis::Vertical => self.margin_vertical(value),
        }
    }

    /// Set padding on all four sides.
    pub fn padding(self, value: f32) -> Self {
        self.padding_horizontal(value).padding_vertical(value)
    }

    /// Set left and right padding.
    pub fn padding_horizontal(mut self, value: f32) -> Self {
        self.padding_left = Some(value);
        self.padding_right = Some(value);
        self
    }

    /// Set top and bottom padding.
    pub fn padding_vertical(mut self, value: f32) -> Self {
        self.padding_top = Some(value);
        self.padding_bottom = Some(value);
        self
    }

    /// Set both paddings on `axis`.
    pub fn padding_along(self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => self.padding_horizontal(value),
            Axis::Vertical => self.padding_vertical(value),
        }
    }

    pub fn border_width(mut self, value: f32) -> Self {
        self.border_width = Some(value);
        self
    }

    pub fn border_bottom_width(mut self, value: f32) -> Self {
        self.border_bottom_width = Some(value);
        self
    }

    pub fn border_radius(mut self, value: f32) -> Self {
        self.border_radius = Some(value);
        self
    }

    pub fn border_color(mut self, value: impl Into<String>) -> Self {
        self.border_color = Some(value.into());
        self
    }

    pub fn border_bottom_color(mut self, value: impl Into<String>) -> Self {
        self.border_bottom_color = Some(value.into());
        self
    }

    pub fn color(mut self, value: impl Into<String>) -> Self {
        self.color = Some(value.into());
        self
    }

    pub fn background_color(mut self, value: impl Into<String>) -> Self {
        self.background_color = Some(value.into());
        self
    }

    pub fn opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn font_size(mut self, value: f32) -> Self {
        self.font_size = Some(value);
        self
    }

    pub fn font_weight(mut self, value: FontWeight) -> Self {
        self.font_weight = Some(value);
        self
    }
}
