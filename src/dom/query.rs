//! DOM queries: by test id, text, kind; generic predicate matching.
//!
//! All queries return nodes in tree order.

use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::view::ElementKind;

impl Dom {
    /// Find the first node whose test id matches.
    pub fn query_by_test_id(&self, id: &str) -> Option<NodeId> {
        self.iter_tree()
            .find(|(_, data)| data.test_id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Find all `Text` nodes whose content equals `text` exactly.
    pub fn query_by_text(&self, text: &str) -> Vec<NodeId> {
        self.query_all(|data| data.kind == ElementKind::Text && data.text.as_deref() == Some(text))
    }

    /// Find all nodes of the given kind.
    pub fn query_by_kind(&self, kind: ElementKind) -> Vec<NodeId> {
        self.query_all(|data| data.kind == kind)
    }

    /// Find all nodes whose accessibility label equals `label`.
    pub fn query_by_accessibility_label(&self, label: &str) -> Vec<NodeId> {
        self.query_all(|data| data.accessibility.label.as_deref() == Some(label))
    }

    /// Find all nodes matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.iter_tree()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// Concatenated text of `id` and all its descendants, in tree order.
    pub fn text_content(&self, id: NodeId) -> String {
        self.walk_depth_first(id)
            .into_iter()
            .filter_map(|n| self.get(n).and_then(|d| d.text.as_deref()))
            .collect::<Vec<_>>()
            .join("")
    }

    /// Iterate `(NodeId, &NodeData)` pairs in tree order.
    fn iter_tree(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.walk()
            .into_iter()
            .filter_map(move |id| self.get(id).map(|data| (id, data)))
    }
}
