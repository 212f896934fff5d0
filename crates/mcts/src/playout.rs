//! Uniformly random play.

use rand::seq::SliceRandom;
use rand::Rng;
use uttt_core::{Agent, Game, Outcome, Result, UtttError};

/// Plays uniformly random legal moves on a copy of `state` until the game
/// ends, returning the final outcome.
///
/// # Errors
/// Returns `NoAvailableMoves` if an undecided position has no moves, and
/// propagates errors from [`Game::apply_move`]. A correct game produces
/// neither.
pub fn play_out<G: Game, R: Rng + ?Sized>(state: &G, rng: &mut R) -> Result<Outcome> {
    let mut state = state.clone();
    loop {
        let moves = state.available_moves();
        match moves.choose(rng) {
            Some(&mv) => state.apply_move(mv)?,
            None if state.is_terminal() => return Ok(state.outcome()),
            None => return Err(UtttError::NoAvailableMoves),
        }
    }
}

/// Agent that picks a uniformly random legal move.
#[derive(Clone, Debug)]
pub struct RandomAgent<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<G: Game, R: Rng> Agent<G> for RandomAgent<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn pick_move(&mut self, state: &G) -> Result<G::Move> {
        state
            .available_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(UtttError::NoAvailableMoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RaceToFive;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uttt_core::Player;

    #[test]
    fn test_play_out_reaches_end() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let state = RaceToFive::new();
        for _ in 0..20 {
            let outcome = play_out(&state, &mut rng).unwrap();
            assert!(outcome.is_decided());
        }
        // The input is never touched
        assert_eq!(state, RaceToFive::new());
    }

    #[test]
    fn test_play_out_of_finished_game() {
        let mut state = RaceToFive::new();
        for _ in 0..5 {
            state.apply_move(1).unwrap();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(play_out(&state, &mut rng).unwrap(), Outcome::Win(Player::X));
    }

    #[test]
    fn test_random_agent_picks_legal_moves() {
        let mut agent = RandomAgent::new(ChaCha8Rng::seed_from_u64(7));
        let mut state = RaceToFive::new();
        while !state.is_terminal() {
            let mv = agent.make_move(&mut state).unwrap();
            assert!(mv == 1 || mv == 2);
        }
        assert!(Agent::<RaceToFive>::pick_move(&mut agent, &state).is_err());
    }
}
