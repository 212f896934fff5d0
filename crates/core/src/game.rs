use std::fmt::Debug;
use std::hash::Hash;

use crate::{Outcome, Player, Result};

/// A two-player, alternating-move game state machine.
///
/// Implementors own the whole position and mutate it in place. `Clone`
/// must produce an independent deep copy, which is what search agents
/// simulate on; the live state is only touched through a single committed
/// move.
pub trait Game: Clone + Send {
    /// A move (e.g. a cell coordinate)
    type Move: Clone + Copy + Send + Eq + Hash + Debug;

    /// Returns all legal moves from this position.
    ///
    /// Must be empty if and only if [`Game::outcome`] is decided.
    fn available_moves(&self) -> Vec<Self::Move>;

    /// Plays `mv` for the player to move.
    ///
    /// # Errors
    /// Returns [`crate::UtttError::IllegalMove`] and leaves the state
    /// untouched if the move is not legal.
    fn apply_move(&mut self, mv: Self::Move) -> Result<()>;

    /// Current result of the game.
    fn outcome(&self) -> Outcome;

    /// The player whose turn it is.
    fn to_move(&self) -> Player;

    /// The most recent move, if any.
    fn last_move(&self) -> Option<Self::Move>;

    /// Number of moves played since the initial position.
    fn moves_played(&self) -> usize;

    /// Returns true once the game has been won or drawn.
    fn is_terminal(&self) -> bool {
        self.outcome().is_decided()
    }
}
