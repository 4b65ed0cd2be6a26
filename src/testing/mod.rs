//! Headless testing helpers: [`Pilot`] and tree outlines.
//!
//! Use the [`Pilot`] to press, type into and settle a
//! [`DynamicForm`](crate::form::DynamicForm) through its mounted tree. Use
//! [`render_tree`] and related helpers to capture a tree as plain text for
//! snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{dom_to_string, render_tree, subtree_to_string};
