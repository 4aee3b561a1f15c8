//! Search tree storage.
//!
//! Nodes live in a flat arena owned by [`SearchTree`] and refer to each other
//! by index. The parent link is a plain index, never ownership, so the tree
//! stays a strict out-tree: children are reachable only through their parent's
//! `children` list, and dropping the tree frees everything at once.

use crate::game::RulesEngine;

/// Index of a node inside a [`SearchTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

/// One position in the search tree together with its accumulated statistics.
#[derive(Debug, Clone)]
pub struct SearchNode<A> {
    /// Back-reference to the owning node; `None` only at the root.
    pub parent: Option<NodeId>,

    /// The action that produced this node from its parent.
    pub parent_action: Option<A>,

    /// Expanded children in insertion order. An action appears here at most
    /// once, and only after it has been consumed from `untried_actions`.
    pub children: Vec<(A, NodeId)>,

    /// Legal actions from this position not yet expanded into a child.
    pub untried_actions: Vec<A>,

    /// Number of completed simulations that passed through this node.
    pub visits: u64,

    /// Number of those simulations the searching agent won.
    pub wins: u64,
}

impl<A: Clone + PartialEq> SearchNode<A> {
    fn new(parent: Option<NodeId>, parent_action: Option<A>, untried_actions: Vec<A>) -> Self {
        SearchNode {
            parent,
            parent_action,
            children: Vec::new(),
            untried_actions,
            visits: 0,
            wins: 0,
        }
    }

    /// Folds one finished simulation into this node's statistics.
    pub fn record_outcome(&mut self, won: bool) {
        self.visits += 1;
        if won {
            self.wins += 1;
        }
    }

    /// Removes and returns one untried action, or `None` when exhausted.
    pub fn pop_untried_action(&mut self) -> Option<A> {
        self.untried_actions.pop()
    }

    /// Whether every legal action from this position has been expanded.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Fraction of simulations through this node the agent won.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }

    /// Looks up the child expanded from `action`, if any.
    pub fn child(&self, action: &A) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| a == action)
            .map(|&(_, id)| id)
    }
}

/// Arena owning every node of one search.
///
/// The root is created with the arena and always sits at index 0. All other
/// nodes are added lazily through [`SearchTree::add_child`] and never removed;
/// the whole tree is discarded after the best action is extracted.
#[derive(Debug, Clone)]
pub struct SearchTree<A> {
    nodes: Vec<SearchNode<A>>,
}

impl<A: Clone + PartialEq> SearchTree<A> {
    /// The root node's id.
    pub const ROOT: NodeId = NodeId(0);

    /// Creates a tree whose root has the given legal actions left to try.
    pub fn new(root_actions: Vec<A>) -> Self {
        SearchTree {
            nodes: vec![SearchNode::new(None, None, root_actions)],
        }
    }

    pub fn node(&self, id: NodeId) -> &SearchNode<A> {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SearchNode<A> {
        &mut self.nodes[id.0]
    }

    /// Total number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a child of `parent` reached via `action` and registers it in
    /// the parent's children list.
    pub fn add_child(&mut self, parent: NodeId, action: A, untried_actions: Vec<A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode::new(
            Some(parent),
            Some(action.clone()),
            untried_actions,
        ));
        self.node_mut(parent).children.push((action, id));
        id
    }
}

/// Convenience constructor: a tree rooted at `state`, seeded with the legal
/// actions the rules engine reports there.
pub fn tree_for_state<R: RulesEngine>(engine: &R, state: &R::State) -> SearchTree<R::Action> {
    SearchTree::new(engine.legal_actions(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_single_root() {
        let tree = SearchTree::new(vec![0usize, 1, 2]);

        assert_eq!(tree.len(), 1);
        let root = tree.node(SearchTree::<usize>::ROOT);
        assert!(root.parent.is_none());
        assert!(root.parent_action.is_none());
        assert_eq!(root.untried_actions, vec![0, 1, 2]);
        assert_eq!(root.visits, 0);
        assert_eq!(root.wins, 0);
        assert!(root.is_leaf());
        assert!(!root.is_fully_expanded());
    }

    #[test]
    fn test_pop_untried_action_shrinks_by_one() {
        let mut tree = SearchTree::new(vec![0usize, 1, 2]);
        let root = tree.node_mut(SearchTree::<usize>::ROOT);

        assert_eq!(root.pop_untried_action(), Some(2));
        assert_eq!(root.untried_actions.len(), 2);
        assert_eq!(root.pop_untried_action(), Some(1));
        assert_eq!(root.pop_untried_action(), Some(0));
        assert_eq!(root.pop_untried_action(), None);
        assert!(root.is_fully_expanded());
    }

    #[test]
    fn test_add_child_registers_in_parent() {
        let mut tree = SearchTree::new(vec![7usize]);
        let root_id = SearchTree::<usize>::ROOT;

        let child_id = tree.add_child(root_id, 7, vec![3, 4]);

        assert_eq!(tree.len(), 2);
        let root = tree.node(root_id);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.child(&7), Some(child_id));
        assert_eq!(root.child(&8), None);

        let child = tree.node(child_id);
        assert_eq!(child.parent, Some(root_id));
        assert_eq!(child.parent_action, Some(7));
        assert_eq!(child.untried_actions, vec![3, 4]);
    }

    #[test]
    fn test_record_outcome_keeps_wins_bounded() {
        let mut tree = SearchTree::new(vec![0usize]);
        let root = tree.node_mut(SearchTree::<usize>::ROOT);

        root.record_outcome(true);
        root.record_outcome(false);
        root.record_outcome(true);

        assert_eq!(root.visits, 3);
        assert_eq!(root.wins, 2);
        assert!(root.wins <= root.visits);
        assert!((root.win_rate() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_win_rate_of_unvisited_node() {
        let tree = SearchTree::new(vec![0usize]);
        assert_eq!(tree.node(SearchTree::<usize>::ROOT).win_rate(), 0.0);
    }
}
