//! Minimax search for Ultimate Tic-Tac-Toe.
//!
//! - [`MinimaxAgent`] - Iterative-deepening alpha-beta player
//! - [`Heuristic`] - Static evaluation, with three built-in strategies
//!   selected by [`HeuristicKind`]
//!
//! # Example
//!
//! ```
//! use uttt_board::Board;
//! use uttt_core::Agent;
//! use uttt_minimax::{MinimaxAgent, MinimaxConfig};
//!
//! let mut agent = MinimaxAgent::new(MinimaxConfig::with_depth(1));
//! let board = Board::new();
//! let mv = agent.pick_move(&board).unwrap();
//! assert!(board.is_legal(mv));
//! ```

pub mod config;
pub mod heuristics;
pub mod search;

pub use config::MinimaxConfig;
pub use heuristics::{
    terminal_value, Attack, Heuristic, HeuristicKind, Positional, PositionalDrawPenalty, WIN_VALUE,
};
pub use search::{terminal_score, MinimaxAgent, SearchOutcome};
