//! Built-in widgets: ButtonPair.

pub mod button_pair;

pub use button_pair::ButtonPair;
