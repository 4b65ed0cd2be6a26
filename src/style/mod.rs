//! Styling: typed style properties, last-wins layering, override slots.
//!
//! - [`Style`]: every supported property as `Option<T>`.
//! - [`StyleList`] / [`merge_styles`]: ordered layers resolved last-wins.
//! - [`FieldStyles`], [`ButtonStyles`], [`FormStyles`]: caller override slots.

pub mod list;
pub mod overrides;
pub mod styles;

pub use list::{merge_styles, StyleList};
pub use overrides::{ButtonStyles, FieldStyles, FormStyles};
pub use styles::{Align, FlexDirection, FlexWrap, FontWeight, Justify, Position, Style};
