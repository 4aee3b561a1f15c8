//! Rules-engine abstraction.
//!
//! The search never inspects game states itself: everything it needs to know
//! about the game flows through [`RulesEngine`]. Implementations are expected
//! to be cheap to query, deterministic, and total for legal inputs.

use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;

/// Identifies one of the two players of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// The game interface the search runs against.
///
/// `next_state` must be deterministic; applying an action that is not in the
/// current legal set is a precondition violation, not a recoverable error.
pub trait RulesEngine {
    /// Full game position. Cloned once per search iteration, so keep it light.
    type State: Clone;

    /// A legal move. Equality is used to key children in the search tree.
    type Action: Clone + PartialEq + Debug;

    /// Whose turn it is in `state`.
    fn current_player(&self, state: &Self::State) -> PlayerId;

    /// Every action legal in `state`. May be empty.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The position reached by playing `action` in `state`.
    fn next_state(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Whether the game is over in `state`.
    fn is_ended(&self, state: &Self::State) -> bool;

    /// Outcome value per player, or `None` when no outcome is derivable yet.
    ///
    /// A value of `1` is a win for that player. Rollouts cut off by the depth
    /// cap may query this on non-terminal states, so `None` must be returned
    /// there rather than panicking.
    fn points_values(&self, state: &Self::State) -> Option<HashMap<PlayerId, i32>>;
}
