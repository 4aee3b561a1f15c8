//! Core Monte Carlo Tree Search loop.
//!
//! Each iteration walks the tree under the UCB selection policy, expands at
//! most one new node, plays the position out with uniformly random moves, and
//! folds the result back along the path to the root. After the iteration
//! budget is spent, the recommended action is the root child with the most
//! visits. The resulting [`SearchReport`] snapshot carries the decision
//! together with the root statistics that justified it.

use rand::{Rng, RngExt};

use crate::game::{PlayerId, RulesEngine};
use crate::mcts::hyperparameters::SearchParams;
use crate::mcts::node::{tree_for_state, NodeId, SearchTree};
use crate::mcts::report::{ActionStats, SearchReport};
use crate::mcts::selection::{backpropagate, select_child};
use crate::{Result, SearchError};

/// Runs a full search and returns only the recommended action.
///
/// Rollout randomness comes from the process RNG; use
/// [`decide_action_with_rng`] when reproducibility matters.
pub fn decide_action<R: RulesEngine>(
    engine: &R,
    state: &R::State,
    params: &SearchParams,
) -> Result<R::Action> {
    let mut rng = rand::rng();
    decide_action_with_rng(engine, state, params, &mut rng)
}

/// Runs a full search with caller-supplied randomness and returns the
/// recommended action.
pub fn decide_action_with_rng<R: RulesEngine, G: Rng>(
    engine: &R,
    state: &R::State,
    params: &SearchParams,
    rng: &mut G,
) -> Result<R::Action> {
    search(engine, state, params, rng).map(|report| report.best_action)
}

/// Runs a full search and returns the decision together with root statistics.
///
/// # Errors
/// [`SearchError::InvalidParameters`] if `params` fail validation, and
/// [`SearchError::NoDecisionPossible`] if `state` admits no legal action
/// (already-terminal root).
pub fn search<R: RulesEngine, G: Rng>(
    engine: &R,
    root_state: &R::State,
    params: &SearchParams,
    rng: &mut G,
) -> Result<SearchReport<R::Action>> {
    params.validate()?;

    // The searching agent is whoever moves at the root. The convention below
    // treats root children as the agent's own choices even if the rules
    // engine would disagree about turn order in exotic positions.
    let searcher = engine.current_player(root_state);

    let mut tree = tree_for_state(engine, root_state);
    if tree.node(SearchTree::<R::Action>::ROOT).untried_actions.is_empty() {
        return Err(SearchError::NoDecisionPossible(format!(
            "root state has no legal actions for {searcher}"
        )));
    }

    for _ in 0..params.iterations {
        let (node_id, state) = traverse(
            engine,
            &tree,
            root_state.clone(),
            searcher,
            params.exploration_constant,
        );
        let (node_id, state) = expand_leaf(engine, &mut tree, node_id, state);
        let final_state = rollout(engine, state, params.max_rollout_depth, rng);
        let won = is_win(engine, &final_state, searcher);
        backpropagate(&mut tree, Some(node_id), won);
    }

    let report = report_from_tree(&tree)?;

    log::debug!(
        "[Mcts] chose {:?} after {} iterations ({} nodes, {} candidate actions)",
        report.best_action,
        params.iterations,
        tree.len(),
        report.action_stats.len()
    );
    if log::log_enabled!(log::Level::Trace) {
        for stats in &report.action_stats {
            log::trace!(
                "[Mcts] {:?}: visits={} wins={} win_rate={:.3}",
                stats.action,
                stats.visits,
                stats.wins,
                stats.win_rate()
            );
        }
    }

    Ok(report)
}

/// Selection phase: descend through fully expanded interior nodes, taking the
/// max-UCB child at each step, and stop at the first node that still has an
/// untried action or has no children at all.
///
/// Root children are scored from the agent's own perspective; below the root
/// the win-rate term is inverted whenever the mover at the current state is
/// not the searching agent.
fn traverse<R: RulesEngine>(
    engine: &R,
    tree: &SearchTree<R::Action>,
    mut state: R::State,
    searcher: PlayerId,
    exploration_constant: f64,
) -> (NodeId, R::State) {
    let mut node_id = SearchTree::<R::Action>::ROOT;

    loop {
        let node = tree.node(node_id);
        if node.is_leaf() || !node.is_fully_expanded() {
            break;
        }

        let is_opponent = node.parent.is_some() && engine.current_player(&state) != searcher;
        let Some(index) = select_child(tree, node_id, is_opponent, exploration_constant) else {
            break;
        };

        let (action, child) = node.children[index].clone();
        state = engine.next_state(&state, &action);
        node_id = child;
    }

    (node_id, state)
}

/// Expansion phase: consume one untried action and grow a child for it.
///
/// A node with nothing left to try (terminal, or a position that never had
/// legal actions) passes through unchanged.
fn expand_leaf<R: RulesEngine>(
    engine: &R,
    tree: &mut SearchTree<R::Action>,
    node_id: NodeId,
    state: R::State,
) -> (NodeId, R::State) {
    match tree.node_mut(node_id).pop_untried_action() {
        Some(action) => {
            let child_state = engine.next_state(&state, &action);
            let untried = engine.legal_actions(&child_state);
            let child = tree.add_child(node_id, action, untried);
            (child, child_state)
        }
        None => (node_id, state),
    }
}

/// Simulation phase: play uniformly random legal moves until the game ends,
/// the depth cap is hit, or no legal action remains.
///
/// The returned state is not guaranteed to be terminal; scoring tolerates
/// that (see [`is_win`]).
fn rollout<R: RulesEngine, G: Rng>(
    engine: &R,
    mut state: R::State,
    max_depth: usize,
    rng: &mut G,
) -> R::State {
    let mut depth = 0;
    while depth < max_depth && !engine.is_ended(&state) {
        let legal_actions = engine.legal_actions(&state);
        if legal_actions.is_empty() {
            break;
        }

        let action = &legal_actions[rng.random_range(0..legal_actions.len())];
        state = engine.next_state(&state, action);
        depth += 1;
    }

    state
}

/// Classifies a rollout end state as a win or non-win for the searcher.
///
/// States the rules engine cannot score yet, reachable when the depth cap
/// cuts a rollout short, count as non-wins.
fn is_win<R: RulesEngine>(engine: &R, state: &R::State, searcher: PlayerId) -> bool {
    match engine.points_values(state) {
        Some(points) => points.get(&searcher) == Some(&1),
        None => false,
    }
}

/// Final choice: the root child with the strictly highest visit count, ties
/// broken by creation order.
fn report_from_tree<A: Clone + PartialEq>(tree: &SearchTree<A>) -> Result<SearchReport<A>> {
    let root = tree.node(SearchTree::<A>::ROOT);

    let action_stats: Vec<ActionStats<A>> = root
        .children
        .iter()
        .map(|&(ref action, child_id)| {
            let child = tree.node(child_id);
            ActionStats {
                action: action.clone(),
                visits: child.visits,
                wins: child.wins,
            }
        })
        .collect();

    let mut best: Option<&ActionStats<A>> = None;
    for stats in &action_stats {
        if best.map_or(true, |b| stats.visits > b.visits) {
            best = Some(stats);
        }
    }

    let best_action = best
        .map(|stats| stats.action.clone())
        .ok_or_else(|| {
            SearchError::NoDecisionPossible("search produced no root children".to_string())
        })?;

    Ok(SearchReport {
        best_action,
        root_visits: root.visits,
        action_stats,
    })
}
