//! Arena-backed tree of simulated move sequences.
//!
//! Nodes live in a flat vector and reference each other by index, so the
//! parent/child linkage carries no ownership. A node's children form a
//! FIFO queue filled exactly once from an ordered move set; the search
//! consumes them destructively via [`SearchTree::pop`]. Pruned and
//! consumed nodes simply stay behind in the arena, which is discarded
//! wholesale after one move selection.

use std::collections::VecDeque;

use crate::moves::Move;
use crate::priority_set::MultiPrioritySet;

pub(crate) type NodeId = u32;

struct NodeData {
    depth: u32,
    /// `None` only for the root, which precedes any move.
    mv: Option<Move>,
    prnt: NodeId,
    children: VecDeque<NodeId>,
}

pub(crate) struct SearchTree {
    nodes: Vec<NodeData>,
}

impl SearchTree {
    /// Creates a tree holding only the root, the state before any
    /// simulated move.
    pub fn new() -> SearchTree {
        SearchTree {
            nodes: vec![NodeData {
                depth: 0,
                mv: None,
                prnt: 0,
                children: VecDeque::new(),
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        0
    }

    #[inline]
    pub fn depth(&self, node: NodeId) -> u32 {
        self.nodes[node as usize].depth
    }

    #[inline]
    pub fn parent(&self, node: NodeId) -> NodeId {
        self.nodes[node as usize].prnt
    }

    /// The move leading from the node's parent into the node.
    ///
    /// # Panics
    /// Panics when called on the root.
    pub fn move_of(&self, node: NodeId) -> &Move {
        self.nodes[node as usize]
            .mv
            .as_ref()
            .expect("the root carries no move")
    }

    #[inline]
    pub fn has_child(&self, node: NodeId) -> bool {
        !self.nodes[node as usize].children.is_empty()
    }

    /// Appends one move as the node's last child.
    pub fn add(&mut self, parent: NodeId, mv: Move) -> NodeId {
        let id = self.nodes.len() as NodeId;
        let depth = self.nodes[parent as usize].depth + 1;
        self.nodes.push(NodeData {
            depth,
            mv: Some(mv),
            prnt: parent,
            children: VecDeque::new(),
        });
        self.nodes[parent as usize].children.push_back(id);
        id
    }

    /// Appends every move in the set as children, in the sequence of the
    /// set's `c`-th order.
    pub fn add_all(&mut self, parent: NodeId, set: &MultiPrioritySet<Move>, c: usize) {
        for mv in set.iter(c) {
            self.add(parent, mv.clone());
        }
    }

    /// Detaches and returns the node's first child.
    pub fn pop(&mut self, node: NodeId) -> Option<NodeId> {
        self.nodes[node as usize].children.pop_front()
    }

    /// Drops all remaining children of the node.
    pub fn clear(&mut self, node: NodeId) {
        self.nodes[node as usize].children.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Location;
    use crate::player::Player;
    use crate::search::move_set;

    fn mv(from: u8, to: u8) -> Move {
        Move::relocation(Player::White, Location::Cell(from), Location::Cell(to))
    }

    #[test]
    fn children_come_back_in_insertion_order() {
        let mut tree = SearchTree::new();
        let root = tree.root();
        let a = tree.add(root, mv(0, 1));
        let b = tree.add(root, mv(3, 4));
        assert_eq!(tree.pop(root), Some(a));
        assert_eq!(tree.pop(root), Some(b));
        assert_eq!(tree.pop(root), None);
        assert_eq!(tree.parent(a), root);
        assert_eq!(tree.depth(a), 1);
        assert_eq!(*tree.move_of(b), mv(3, 4));
    }

    #[test]
    fn add_all_follows_the_estimation_order() {
        let mut set = move_set();
        let mut strong = mv(9, 10);
        strong.raise_estimation(5);
        set.add(mv(0, 1));
        set.add(strong);
        let mut tree = SearchTree::new();
        let root = tree.root();
        tree.add_all(root, &set, 1);
        let first = tree.pop(root).unwrap();
        assert_eq!(*tree.move_of(first), mv(9, 10));
    }

    #[test]
    fn clear_discards_pending_children() {
        let mut tree = SearchTree::new();
        let root = tree.root();
        tree.add(root, mv(0, 1));
        tree.add(root, mv(0, 9));
        assert!(tree.has_child(root));
        tree.clear(root);
        assert!(!tree.has_child(root));
    }
}
