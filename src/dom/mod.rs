//! Mounted element tree: slotmap arena, parent links, queries, press bubbling.

pub mod node;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::Dom;
