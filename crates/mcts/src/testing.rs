//! A tiny solved game for exercising the search.

use uttt_core::{Game, Outcome, Player, Result, UtttError};

/// Race to five: players alternately add 1 or 2 to a running total, and
/// whoever reaches exactly 5 wins.
///
/// The first player wins by opening with 2; totals of 2 are lost for the
/// player to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceToFive {
    count: u8,
    to_move: Player,
    history: Vec<u8>,
}

impl RaceToFive {
    pub fn new() -> Self {
        Self {
            count: 0,
            to_move: Player::X,
            history: Vec::new(),
        }
    }

    pub fn count(&self) -> u8 {
        self.count
    }
}

impl Game for RaceToFive {
    type Move = u8;

    fn available_moves(&self) -> Vec<u8> {
        (1..=2).filter(|step| self.count + step <= 5).collect()
    }

    fn apply_move(&mut self, mv: u8) -> Result<()> {
        if !self.available_moves().contains(&mv) {
            return Err(UtttError::IllegalMove(format!(
                "cannot add {} to {}",
                mv, self.count
            )));
        }
        self.count += mv;
        self.history.push(mv);
        self.to_move = self.to_move.opposite();
        Ok(())
    }

    fn outcome(&self) -> Outcome {
        if self.count >= 5 {
            Outcome::Win(self.to_move.opposite())
        } else {
            Outcome::Incomplete
        }
    }

    fn to_move(&self) -> Player {
        self.to_move
    }

    fn last_move(&self) -> Option<u8> {
        self.history.last().copied()
    }

    fn moves_played(&self) -> usize {
        self.history.len()
    }
}
