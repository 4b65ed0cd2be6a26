//! Geometry primitives: Axis, Spacing.
//!
//! Form layouts are measured in density-independent points (`f32`). Spacing
//! may be negative: the layout primitives pull their outer container in by half
//! the inter-child gap so the group's bounding box is unaffected by spacing.

use std::ops::{Add, Neg};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// The main axis of a layout primitive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Four-sided spacing (margin or padding) in points.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Create spacing with explicit values for each side.
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Symmetric spacing: `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// `value` on both sides of `axis`, zero on the cross axis.
    #[inline]
    pub const fn along(axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::symmetric(0.0, value),
            Axis::Vertical => Self::symmetric(value, 0.0),
        }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub fn width(self) -> f32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub fn height(self) -> f32 {
        self.top + self.bottom
    }

    /// Total extent along `axis`.
    #[inline]
    pub fn extent(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width(),
            Axis::Vertical => self.height(),
        }
    }
}

impl Add for Spacing {
    type Output = Spacing;
    #[inline]
    fn add(self, rhs: Spacing) -> Spacing {
        Spacing {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

impl Neg for Spacing {
    type Output = Spacing;
    #[inline]
    fn neg(self) -> Spacing {
        Spacing {
            top: -self.top,
            right: -self.right,
            bottom: -self.bottom,
            left: -self.left,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
