//! # MCTS Engine
//!
//! A Monte Carlo Tree Search decision engine for deterministic,
//! perfect-information, turn-based two-player board games.
//!
//! The crate does not ship a game: callers provide a rules engine through the
//! [`game::RulesEngine`] trait and receive back the action the search judges
//! best after a fixed number of simulated playouts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mcts_engine::{decide_action, SearchParams};
//!
//! let params = SearchParams::default();
//! let action = decide_action(&engine, &state, &params)?;
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Rules-engine abstraction the search runs against
pub mod game;

/// Log setup for host applications
pub mod logging;

/// Monte Carlo Tree Search core
pub mod mcts;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::{PlayerId, RulesEngine};

pub use mcts::algorithm::{decide_action, decide_action_with_rng, search};
pub use mcts::hyperparameters::SearchParams;
pub use mcts::node::{NodeId, SearchNode, SearchTree};
pub use mcts::report::{ActionStats, SearchReport};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the search engine
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The root state admits no legal action, so no recommendation exists.
    #[error("no decision possible: {0}")]
    NoDecisionPossible(String),

    /// The supplied [`SearchParams`] are unusable.
    #[error("invalid search parameters: {0}")]
    InvalidParameters(String),

    #[error("logging setup error: {0}")]
    Logging(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SearchError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
