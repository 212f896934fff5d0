//! Ultimate Tic-Tac-Toe board state
//!
//! A 3×3 grid of 3×3 sub-boards. Each move sends the opponent to the
//! sub-board matching the move's local coordinate; a sub-board is won by
//! three in a row, and the game is won by three sub-boards in a row.
//!
//! The [`Board`] is the single source of truth for legality and outcome.
//! It implements [`uttt_core::Game`] so the search engines can drive it.

mod board;
mod game_impl;
pub mod lines;
mod moves;

pub use board::{Board, SubBoard};
pub use lines::{compute_overall_outcome, compute_sub_outcome};
pub use moves::Move;

/// Side length of both a sub-board and the global board.
pub const DIM: usize = 3;

/// Total number of cells on the board.
pub const NUM_CELLS: usize = DIM * DIM * DIM * DIM;
