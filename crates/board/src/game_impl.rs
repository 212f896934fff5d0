//! Implementation of the core Game trait for the Ultimate Tic-Tac-Toe board.

use uttt_core::{Game, Outcome, Player, Result};

use crate::{Board, Move};

impl Game for Board {
    type Move = Move;

    fn available_moves(&self) -> Vec<Move> {
        Board::available_moves(self)
    }

    fn apply_move(&mut self, mv: Move) -> Result<()> {
        Board::apply_move(self, mv)
    }

    fn outcome(&self) -> Outcome {
        Board::outcome(self)
    }

    fn to_move(&self) -> Player {
        Board::to_move(self)
    }

    fn last_move(&self) -> Option<Move> {
        Board::last_move(self)
    }

    fn moves_played(&self) -> usize {
        Board::moves_played(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_first_available<G: Game>(state: &mut G) -> Option<G::Move> {
        let mv = *state.available_moves().first()?;
        state.apply_move(mv).ok()?;
        Some(mv)
    }

    #[test]
    fn test_game_trait_basic() {
        let board = Board::new();

        assert!(!Game::is_terminal(&board));
        assert_eq!(Game::outcome(&board), Outcome::Incomplete);
        assert_eq!(Game::available_moves(&board).len(), 81);
        assert_eq!(Game::to_move(&board), Player::X);
    }

    #[test]
    fn test_game_trait_apply_move() {
        let mut board = Board::new();
        let mv = play_first_available(&mut board).unwrap();

        assert_eq!(mv, Move::new_unchecked(0, 0, 0, 0));
        assert_eq!(Game::last_move(&board), Some(mv));
        assert_eq!(Game::moves_played(&board), 1);
        assert_eq!(Game::to_move(&board), Player::O);
    }

    #[test]
    fn test_first_available_game_terminates() {
        let mut board = Board::new();
        let mut plies = 0;
        while play_first_available(&mut board).is_some() {
            plies += 1;
        }
        assert!(Game::is_terminal(&board));
        assert!(plies <= crate::NUM_CELLS);
    }
}
