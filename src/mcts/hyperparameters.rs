//! Search configuration.
//!
//! The knobs the search exposes are deliberately few: how many iterations to
//! run, how aggressively to explore, and how deep a random playout may go.
//! They travel as an explicit value passed into the entry points instead of
//! process-wide state, so two searches with different budgets can coexist.

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Tunable parameters for one search invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Number of select/expand/simulate/backpropagate iterations.
    /// Default: 1000
    pub iterations: usize,

    /// Exploration constant `C` in the UCB formula.
    /// Higher values favor under-sampled actions.
    /// Default: 2.0
    pub exploration_constant: f64,

    /// Safety bound on random playout length, in moves. Guards against
    /// non-terminating or pathologically long rollouts.
    /// Default: 100
    pub max_rollout_depth: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            iterations: 1000,
            exploration_constant: 2.0,
            max_rollout_depth: 100,
        }
    }
}

impl SearchParams {
    /// Checks that the parameters describe a runnable search.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(SearchError::InvalidParameters(
                "iterations must be at least 1".to_string(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidParameters(format!(
                "exploration_constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if self.max_rollout_depth == 0 {
            return Err(SearchError::InvalidParameters(
                "max_rollout_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
