//! Ultimate Tic-Tac-Toe Core - Game abstractions and common types
//!
//! This crate provides the traits that connect the board to the search
//! engines and to front ends.
//!
//! # Types
//!
//! - [`Game`] - State-machine trait implemented by the board
//! - [`Agent`] - Decision capability implemented by every player type
//! - [`Player`] - The two tokens, `X` (moves first) and `O`
//! - [`Outcome`] - Incomplete, won or drawn

mod agent;
mod error;
mod game;
mod types;

pub use agent::Agent;
pub use error::{Result, UtttError};
pub use game::Game;
pub use types::{Outcome, Player};
