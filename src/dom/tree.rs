//! Tree operations: mount, insert, walk, bubble path.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};
use crate::view::Element;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// A mounted element tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that lookup is O(1) and bubbling walks parent links.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    /// Create an empty DOM.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Mount an element tree into a fresh DOM. The element becomes the root.
    pub fn mount(element: &Element) -> Self {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::from_element(element));
        dom.mount_children(root, element);
        dom
    }

    fn mount_children(&mut self, parent: NodeId, element: &Element) {
        for child in element.children() {
            let id = self.insert_child(parent, NodeData::from_element(child));
            self.mount_children(id, child);
        }
    }

    /// Insert a root-level node (no parent).
    ///
    /// If no root has been set yet, this node becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist in the tree.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        debug_assert!(
            self.nodes.contains_key(parent),
            "parent node does not exist"
        );
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        id
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no children
    /// or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// `[start, parent, grandparent, ..., root]`, or empty if `start` is unknown.
    pub fn bubble_path(&self, start: NodeId) -> Vec<NodeId> {
        if !self.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(self.ancestors(start));
        path
    }

    /// The node that receives a press delivered to `start`.
    ///
    /// Walks the bubble path and stops at the first node that captures presses.
    pub fn press_target(&self, start: NodeId) -> Option<NodeId> {
        self.bubble_path(start)
            .into_iter()
            .find(|&id| self.nodes.get(id).is_some_and(NodeData::captures_press))
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes in the DOM.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the DOM is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the DOM contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// All nodes in tree order (pre-order from the root).
    pub fn walk(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => self.walk_depth_first(root),
            None => Vec::new(),
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Element, ElementKind};

    /// ```text
    ///        root (View)
    ///       /          \
    ///   press (Pressable)   note (Text)
    ///      |
    ///   label (Text "Go")
    /// ```
    fn sample() -> Element {
        Element::view()
            .with_test_id("root")
            .with_child(
                Element::pressable()
                    .with_test_id("press")
                    .on_press(|| {})
                    .with_child(Element::text("Go").with_test_id("label")),
            )
            .with_child(Element::text("note").with_test_id("note"))
    }

    fn by_id(dom: &Dom, id: &str) -> NodeId {
        dom.query_by_test_id(id).unwrap()
    }

    #[test]
    fn mount_preserves_structure() {
        let dom = Dom::mount(&sample());
        assert_eq!(dom.len(), 4);
        let root = dom.root().unwrap();
        assert_eq!(dom.children(root).len(), 2);
        assert_eq!(dom.parent(by_id(&dom, "label")), Some(by_id(&dom, "press")));
    }

    #[test]
    fn walk_is_pre_order() {
        let dom = Dom::mount(&sample());
        let ids: Vec<_> = dom
            .walk()
            .into_iter()
            .filter_map(|id| dom.get(id).unwrap().test_id.clone())
            .collect();
        assert_eq!(ids, vec!["root", "press", "label", "note"]);
    }

    #[test]
    fn ancestors_and_bubble_path() {
        let dom = Dom::mount(&sample());
        let label = by_id(&dom, "label");
        assert_eq!(dom.ancestors(label), vec![by_id(&dom, "press"), by_id(&dom, "root")]);
        assert_eq!(dom.bubble_path(label).len(), 3);
        assert_eq!(dom.bubble_path(label)[0], label);
    }

    #[test]
    fn press_bubbles_to_pressable() {
        let dom = Dom::mount(&sample());
        assert_eq!(dom.press_target(by_id(&dom, "label")), Some(by_id(&dom, "press")));
        assert_eq!(dom.press_target(by_id(&dom, "note")), None);
    }

    #[test]
    fn insert_child_links_parent() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new(ElementKind::View));
        let child = dom.insert_child(root, NodeData::new(ElementKind::Text));
        assert_eq!(dom.root(), Some(root));
        assert_eq!(dom.children(root), &[child]);
        assert!(dom.children(child).is_empty());
    }

    #[test]
    fn empty_dom() {
        let dom = Dom::default();
        assert!(dom.is_empty());
        assert!(dom.walk().is_empty());
    }
}
