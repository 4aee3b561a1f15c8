//! Snapshot of a finished search.
//!
//! The tree itself is discarded when the search returns; what survives is the
//! chosen action plus the root-level statistics that justified it, enough for
//! logging and for callers that want to inspect how contested the decision
//! was.

/// Statistics accumulated for one root-level action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionStats<A> {
    pub action: A,
    pub visits: u64,
    pub wins: u64,
}

impl<A> ActionStats<A> {
    /// Fraction of simulations through this action the agent won.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }
}

/// Result of one search invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport<A> {
    /// The recommended action: the root child with the most visits.
    pub best_action: A,

    /// Total simulations backpropagated through the root.
    pub root_visits: u64,

    /// Per-action statistics for every expanded root child, in the order the
    /// children were created.
    pub action_stats: Vec<ActionStats<A>>,
}
