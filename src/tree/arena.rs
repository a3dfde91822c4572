//! Slotmap-backed node arena with ordered children.
//!
//! Child order matters: linear layout flows children in order, and modal
//! dismissal cascades across later siblings. Removal detaches the whole
//! subtree and frees every key in it.

use slotmap::{SecondaryMap, SlotMap};

use crate::tree::node::{NodeData, NodeId};

/// The layout tree.
#[derive(Debug, Default)]
pub struct Tree {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parents: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Tree::default()
    }

    // ── Insertion ────────────────────────────────────────────────────

    /// Insert a detached node.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Insert a node as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        debug_assert!(self.nodes.contains_key(parent));
        let id = self.insert(data);
        self.attach(parent, id);
        id
    }

    /// Attach an existing detached node as the last child of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes.contains_key(parent));
        debug_assert!(self.parents.get(child).is_none());
        self.parents.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(child);
        }
    }

    /// Make `node` the root of the tree.
    pub fn set_root(&mut self, node: NodeId) {
        debug_assert!(self.nodes.contains_key(node));
        self.root = Some(node);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    // ── Removal ──────────────────────────────────────────────────────

    /// Detach `node` from its parent and free its whole subtree.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.parents.get(node).copied() {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&sibling| sibling != node);
            }
        }
        if self.root == Some(node) {
            self.root = None;
        }

        // Breadth-first sweep over the subtree.
        let mut queue = vec![node];
        while let Some(current) = queue.pop() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.parents.remove(current);
            self.nodes.remove(current);
        }
    }

    // ── Access ───────────────────────────────────────────────────────

    pub fn get(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node).copied()
    }

    /// The ordered children of `node`.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.children.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The position of `child` among its parent's children.
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Walk from `node`'s parent up to the root.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(node);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.parent(next);
            Some(next)
        })
    }

    /// Find a node by its markup element id.
    pub fn node_by_element_id(&self, element_id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, data)| data.id.as_deref() == Some(element_id))
            .map(|(id, _)| id)
    }

    /// Every node id currently in the arena, in arbitrary order.
    pub fn iter_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::NodeKind;

    fn build_tree() -> (Tree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.insert(NodeData::new(NodeKind::Linear));
        tree.set_root(root);
        let a = tree.insert_child(root, NodeData::new(NodeKind::View));
        let b = tree.insert_child(root, NodeData::new(NodeKind::Free));
        let b1 = tree.insert_child(b, NodeData::new(NodeKind::View));
        (tree, root, a, b, b1)
    }

    #[test]
    fn children_keep_insertion_order() {
        let (tree, root, a, b, _) = build_tree();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.index_of(root, a), Some(0));
        assert_eq!(tree.index_of(root, b), Some(1));
    }

    #[test]
    fn parents_and_ancestors() {
        let (tree, root, _, b, b1) = build_tree();
        assert_eq!(tree.parent(b1), Some(b));
        assert_eq!(tree.parent(root), None);
        let chain: Vec<NodeId> = tree.ancestors(b1).collect();
        assert_eq!(chain, vec![b, root]);
    }

    #[test]
    fn remove_frees_the_whole_subtree() {
        let (mut tree, root, a, b, b1) = build_tree();
        assert_eq!(tree.len(), 4);
        tree.remove(b);
        assert_eq!(tree.len(), 2);
        assert!(!tree.contains(b));
        assert!(!tree.contains(b1));
        assert_eq!(tree.children(root), &[a]);
    }

    #[test]
    fn remove_root_clears_root() {
        let (mut tree, root, ..) = build_tree();
        tree.remove(root);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn stale_keys_stay_dead() {
        let (mut tree, root, a, ..) = build_tree();
        tree.remove(a);
        let replacement = tree.insert_child(root, NodeData::new(NodeKind::View));
        assert!(!tree.contains(a));
        assert!(tree.contains(replacement));
    }

    #[test]
    fn lookup_by_element_id() {
        let mut tree = Tree::new();
        let root = tree.insert(NodeData::new(NodeKind::Linear));
        let hit = tree.insert_child(root, NodeData::with_id(NodeKind::View, "target"));
        assert_eq!(tree.node_by_element_id("target"), Some(hit));
        assert_eq!(tree.node_by_element_id("missing"), None);
    }

    #[test]
    fn attach_detached_node() {
        let mut tree = Tree::new();
        let root = tree.insert(NodeData::new(NodeKind::Bound));
        let floating = tree.insert(NodeData::new(NodeKind::View));
        assert_eq!(tree.parent(floating), None);
        tree.attach(root, floating);
        assert_eq!(tree.parent(floating), Some(root));
        assert_eq!(tree.children(root), &[floating]);
    }
}
