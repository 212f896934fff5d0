//! Monte Carlo Tree Search for Ultimate Tic-Tac-Toe.
//!
//! This crate provides a generic MCTS agent that can play any game
//! implementing the `uttt_core::Game` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `Game` implementation
//! - **UCB1 Selection**: Win/tie tallies per node, random tie-breaking
//! - **Evaluator Abstraction**: Random playouts by default
//! - **Tree Reuse**: The subtree under the opponent's reply survives between moves
//! - **Budgets**: Iteration counts, difficulty levels and wall-clock limits
//!
//! # Example
//!
//! ```
//! use uttt_board::Board;
//! use uttt_core::Agent;
//! use uttt_mcts::{Mcts, MctsConfig, RolloutEvaluator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = MctsConfig::with_iterations(100);
//! let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
//! let mut mcts = Mcts::new(config, evaluator, ChaCha8Rng::seed_from_u64(43));
//!
//! let mut board = Board::new();
//! let mv = mcts.make_move(&mut board).unwrap();
//! println!("MCTS opened with {}", mv);
//! ```

pub mod config;
pub mod evaluator;
mod node;
pub mod playout;
pub mod search;
mod tree;

#[cfg(test)]
mod testing;

pub use config::{Difficulty, MctsConfig};
pub use evaluator::{Evaluator, RolloutEvaluator};
pub use playout::{play_out, RandomAgent};
pub use search::{ChildStats, Mcts, SearchResult};
