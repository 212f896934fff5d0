//! Node storage for the search, with subtree promotion for reuse
//! between moves.

use std::hash::Hash;

use uttt_core::Player;

use crate::node::{Node, NodeId};

/// Arena-allocated MCTS tree.
///
/// Nodes are stored in a contiguous vector and referenced by index. The
/// root is always at index 0; [`Tree::promote`] re-packs a subtree so that
/// stays true when the search moves down the game.
#[derive(Debug)]
pub struct Tree<M: Copy + Eq + Hash> {
    nodes: Vec<Node<M>>,
}

impl<M: Copy + Eq + Hash> Tree<M> {
    /// Create a new tree with an empty root for a position where
    /// `to_move` is next.
    pub fn new(to_move: Player) -> Self {
        Self {
            nodes: vec![Node::root(to_move)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<M> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<M> {
        &mut self.nodes[id.0]
    }

    /// Add a new node to the tree, returning its ID.
    pub fn add(&mut self, node: Node<M>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should never be true as root always exists).
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    pub fn root(&self) -> &Node<M> {
        self.get(NodeId::ROOT)
    }

    /// The child of `id` reached by `mv`, if `id` has been expanded.
    pub fn child(&self, id: NodeId, mv: M) -> Option<NodeId> {
        self.get(id)
            .children
            .iter()
            .find(|(m, _)| *m == mv)
            .map(|(_, child)| *child)
    }

    /// Makes `new_root` the root, discarding everything outside its subtree.
    ///
    /// Surviving nodes keep their statistics and are packed breadth-first
    /// into a fresh arena.
    pub fn promote(&mut self, new_root: NodeId) {
        if new_root == NodeId::ROOT {
            return;
        }

        let mut old: Vec<Option<Node<M>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut remap: Vec<Option<NodeId>> = vec![None; old.len()];

        // Breadth-first order of the kept subtree; position = new index.
        let mut order = vec![new_root];
        remap[new_root.0] = Some(NodeId::ROOT);
        let mut next = 0;
        while next < order.len() {
            let id = order[next];
            if let Some(node) = &old[id.0] {
                for &(_, child) in &node.children {
                    remap[child.0] = Some(NodeId(order.len()));
                    order.push(child);
                }
            }
            next += 1;
        }

        self.nodes = order
            .iter()
            .map(|id| {
                let mut node = old[id.0]
                    .take()
                    .expect("BUG: node reachable twice during promotion");
                node.parent = node.parent.and_then(|parent| remap[parent.0]);
                for (_, child) in &mut node.children {
                    *child = remap[child.0].expect("BUG: child missing from remap");
                }
                node
            })
            .collect();
    }
}
