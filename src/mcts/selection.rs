//! UCB child selection and statistics backpropagation.
//!
//! Scores are always oriented to the searching agent: when the child being
//! scored was reached through an opponent decision, the win-rate term is
//! inverted so that "good for the opponent" reads as "bad for us". Ties are
//! broken by the first child encountered, which is deterministic because
//! children are stored in insertion order.

use crate::mcts::node::{NodeId, SearchTree};

/// UCB1 score of `child` from the searching agent's perspective.
///
/// Zero-visit children score positive infinity so every child is explored at
/// least once before win rates are compared. A zero-visit parent would make
/// the exploration term undefined (`ln 0`); that case also scores infinity.
pub fn ucb_score<A: Clone + PartialEq>(
    tree: &SearchTree<A>,
    child: NodeId,
    is_opponent: bool,
    exploration_constant: f64,
) -> f64 {
    let node = tree.node(child);
    if node.visits == 0 {
        return f64::INFINITY;
    }

    let parent_visits = match node.parent {
        Some(parent) => tree.node(parent).visits,
        None => 0,
    };
    if parent_visits == 0 {
        return f64::INFINITY;
    }

    let mut win_rate = node.win_rate();
    if is_opponent {
        win_rate = 1.0 - win_rate;
    }

    let exploration_term =
        exploration_constant * ((parent_visits as f64).ln() / node.visits as f64).sqrt();

    win_rate + exploration_term
}

/// Picks the child of `parent` with the highest UCB score.
///
/// # Returns
/// Index into the parent's children list, or `None` if it has no children.
pub fn select_child<A: Clone + PartialEq>(
    tree: &SearchTree<A>,
    parent: NodeId,
    is_opponent: bool,
    exploration_constant: f64,
) -> Option<usize> {
    let node = tree.node(parent);
    if node.children.is_empty() {
        return None;
    }

    let mut best_score = f64::NEG_INFINITY;
    let mut best_index = 0;

    for (i, &(_, child)) in node.children.iter().enumerate() {
        let score = ucb_score(tree, child, is_opponent, exploration_constant);
        if score > best_score {
            best_score = score;
            best_index = i;
        }
    }

    Some(best_index)
}

/// Walks from `start` up to the root, folding one simulation outcome into
/// every node on the path. A `None` start performs no updates.
pub fn backpropagate<A: Clone + PartialEq>(
    tree: &mut SearchTree<A>,
    start: Option<NodeId>,
    won: bool,
) {
    let mut current = start;
    while let Some(id) = current {
        let node = tree.node_mut(id);
        node.record_outcome(won);
        current = node.parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: NodeId = SearchTree::<usize>::ROOT;

    /// Root with `n` expanded children, no statistics yet.
    fn tree_with_children(n: usize) -> SearchTree<usize> {
        let mut tree = SearchTree::new((0..n).collect());
        for _ in 0..n {
            let action = tree
                .node_mut(ROOT)
                .pop_untried_action()
                .expect("action available");
            tree.add_child(ROOT, action, vec![]);
        }
        tree
    }

    #[test]
    fn test_unvisited_child_scores_infinity() {
        let tree = tree_with_children(1);
        let (_, child) = tree.node(ROOT).children[0];

        assert_eq!(ucb_score(&tree, child, false, 2.0), f64::INFINITY);
    }

    #[test]
    fn test_zero_visit_parent_scores_infinity() {
        let mut tree = tree_with_children(1);
        let (_, child) = tree.node(ROOT).children[0];

        // Visited child under an unvisited parent: ln(0) is undefined, so the
        // score falls back to infinity.
        tree.node_mut(child).visits = 3;
        tree.node_mut(child).wins = 1;

        assert_eq!(ucb_score(&tree, child, false, 2.0), f64::INFINITY);
    }

    #[test]
    fn test_perspective_inversion() {
        let mut tree = tree_with_children(1);
        let (_, child) = tree.node(ROOT).children[0];

        tree.node_mut(ROOT).visits = 10;
        tree.node_mut(child).visits = 10;
        tree.node_mut(child).wins = 0;

        // With the exploration term zeroed out, only the win-rate term is
        // left: 0/10 for us, 1 - 0/10 seen through the opponent.
        assert_eq!(ucb_score(&tree, child, false, 0.0), 0.0);
        assert_eq!(ucb_score(&tree, child, true, 0.0), 1.0);
    }

    #[test]
    fn test_ucb_formula() {
        let mut tree = tree_with_children(1);
        let (_, child) = tree.node(ROOT).children[0];

        tree.node_mut(ROOT).visits = 100;
        tree.node_mut(child).visits = 25;
        tree.node_mut(child).wins = 20;

        let expected = 0.8 + 2.0 * ((100.0f64).ln() / 25.0).sqrt();
        let score = ucb_score(&tree, child, false, 2.0);
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_selection_prefers_unvisited_child() {
        let mut tree = tree_with_children(3);
        tree.node_mut(ROOT).visits = 20;

        // Two children carry strong statistics, the middle one is untouched.
        let (_, first) = tree.node(ROOT).children[0];
        let (_, last) = tree.node(ROOT).children[2];
        tree.node_mut(first).visits = 10;
        tree.node_mut(first).wins = 10;
        tree.node_mut(last).visits = 10;
        tree.node_mut(last).wins = 9;

        assert_eq!(select_child(&tree, ROOT, false, 2.0), Some(1));
    }

    #[test]
    fn test_selection_ties_break_on_first_encountered() {
        let mut tree = tree_with_children(3);
        tree.node_mut(ROOT).visits = 30;

        for i in 0..3 {
            let (_, child) = tree.node(ROOT).children[i];
            tree.node_mut(child).visits = 10;
            tree.node_mut(child).wins = 5;
        }

        assert_eq!(select_child(&tree, ROOT, false, 2.0), Some(0));
    }

    #[test]
    fn test_selection_on_childless_node() {
        let tree = SearchTree::new(vec![0usize]);
        assert_eq!(select_child(&tree, ROOT, false, 2.0), None);
    }

    #[test]
    fn test_backpropagate_updates_whole_path() {
        let mut tree = SearchTree::new(vec![0usize]);
        let action = tree.node_mut(ROOT).pop_untried_action().expect("action");
        let child = tree.add_child(ROOT, action, vec![1]);
        let grandchild_action = tree.node_mut(child).pop_untried_action().expect("action");
        let grandchild = tree.add_child(child, grandchild_action, vec![]);

        backpropagate(&mut tree, Some(grandchild), true);
        backpropagate(&mut tree, Some(grandchild), false);
        backpropagate(&mut tree, Some(child), true);

        assert_eq!(tree.node(grandchild).visits, 2);
        assert_eq!(tree.node(grandchild).wins, 1);
        assert_eq!(tree.node(child).visits, 3);
        assert_eq!(tree.node(child).wins, 2);
        assert_eq!(tree.node(ROOT).visits, 3);
        assert_eq!(tree.node(ROOT).wins, 2);
    }

    #[test]
    fn test_backpropagate_from_none_is_a_no_op() {
        let mut tree = tree_with_children(2);

        backpropagate(&mut tree, None, true);

        assert_eq!(tree.node(ROOT).visits, 0);
        assert_eq!(tree.node(ROOT).wins, 0);
    }
}
