use crate::{Game, Result};

/// A move-picking strategy.
///
/// Front ends hold agents behind this trait and choose whichever entry
/// point fits their control flow: [`Agent::pick_move`] only decides,
/// [`Agent::make_move`] decides and commits the move to the live state.
pub trait Agent<G: Game> {
    /// Short human-readable name used in logs and summaries.
    fn name(&self) -> &str;

    /// Chooses a legal move for the player to move in `state`.
    ///
    /// Must not mutate `state`. Agents may update internal state (e.g. a
    /// search tree kept between moves).
    ///
    /// # Errors
    /// Returns [`crate::UtttError::NoAvailableMoves`] if `state` has no
    /// legal moves.
    fn pick_move(&mut self, state: &G) -> Result<G::Move>;

    /// Chooses a move and applies it to `state`.
    fn make_move(&mut self, state: &mut G) -> Result<G::Move> {
        let mv = self.pick_move(state)?;
        state.apply_move(mv)?;
        Ok(mv)
    }

    /// Forgets anything remembered from a previous game.
    fn reset(&mut self) {}
}

impl<G: Game, A: Agent<G> + ?Sized> Agent<G> for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn pick_move(&mut self, state: &G) -> Result<G::Move> {
        (**self).pick_move(state)
    }

    fn make_move(&mut self, state: &mut G) -> Result<G::Move> {
        (**self).make_move(state)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
