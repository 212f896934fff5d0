//! Evaluation abstraction for MCTS.
//!
//! The `Evaluator` trait decides how a freshly reached leaf is scored. The
//! stock strategy is a uniformly random playout to the end of the game.

use rand::Rng;
use uttt_core::{Game, Outcome, Result};

use crate::playout::play_out;

/// Trait for evaluating game positions.
pub trait Evaluator<G: Game> {
    /// Estimate the result of the game from `state`.
    ///
    /// The returned outcome is credited to every node on the path back to
    /// the root, each from the point of view of the player who moved into
    /// it.
    fn evaluate(&mut self, state: &G) -> Result<Outcome>;
}

/// Evaluator that plays uniformly random moves until the game ends.
#[derive(Clone, Debug)]
pub struct RolloutEvaluator<R: Rng> {
    rng: R,
}

impl<R: Rng> RolloutEvaluator<R> {
    /// Create a new rollout evaluator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<G: Game, R: Rng> Evaluator<G> for RolloutEvaluator<R> {
    fn evaluate(&mut self, state: &G) -> Result<Outcome> {
        play_out(state, &mut self.rng)
    }
}
