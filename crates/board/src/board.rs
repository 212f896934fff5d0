//! Ultimate Tic-Tac-Toe position.

use std::fmt;

use uttt_core::{Outcome, Player, Result, UtttError};

use crate::lines::{compute_overall_outcome, compute_sub_outcome, Coord};
use crate::{Move, DIM, NUM_CELLS};

/// Cells of one sub-board, indexed `[local_row][local_col]`.
pub type SubBoard = [[Option<Player>; DIM]; DIM];

/// Everything a move changes that cannot be recomputed from the move itself.
///
/// The affected sub-board and the overall game were necessarily
/// `Incomplete` before any legal move, and the mover is the opposite of
/// the player to move afterwards, so only the constraint needs saving.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct UndoRecord {
    mv: Move,
    next_board: Option<Coord>,
}

/// A complete game state.
///
/// ```
/// use uttt_board::{Board, Move};
///
/// let mut board = Board::new();
/// board.apply_move(Move::new_unchecked(1, 1, 1, 1)).unwrap();
/// assert_eq!(board.next_board(), Some((1, 1)));
/// assert_eq!(board.available_moves().len(), 8);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    /// Tokens indexed `[global_row][global_col][local_row][local_col]`
    cells: [[SubBoard; DIM]; DIM],
    /// Outcome of each sub-board
    sub_outcomes: [[Outcome; DIM]; DIM],
    /// Outcome of the whole game
    outcome: Outcome,
    /// Sub-board the player to move must play in (None = any undecided one)
    next_board: Option<Coord>,
    /// Player to move
    to_move: Player,
    /// Moves played so far, with the state needed to take them back
    history: Vec<UndoRecord>,
}

impl Board {
    /// Create an empty board with X to move and no constraint.
    pub fn new() -> Self {
        Self {
            cells: [[[[None; DIM]; DIM]; DIM]; DIM],
            sub_outcomes: [[Outcome::Incomplete; DIM]; DIM],
            outcome: Outcome::Incomplete,
            next_board: None,
            to_move: Player::X,
            history: Vec::with_capacity(NUM_CELLS),
        }
    }

    /// Replay a sequence of moves from the empty board.
    ///
    /// # Errors
    /// Returns the first `IllegalMove` encountered.
    pub fn from_moves(moves: &[Move]) -> Result<Self> {
        let mut board = Self::new();
        for &mv in moves {
            board.apply_move(mv)?;
        }
        Ok(board)
    }

    /// Token at the cell addressed by `mv`.
    #[inline]
    pub fn cell(&self, mv: Move) -> Option<Player> {
        let (gr, gc) = mv.global();
        let (lr, lc) = mv.local();
        self.cells[gr][gc][lr][lc]
    }

    /// The nine cells of the sub-board at `(gr, gc)`.
    #[inline]
    pub fn sub_board(&self, gr: usize, gc: usize) -> &SubBoard {
        &self.cells[gr][gc]
    }

    /// Outcome of the sub-board at `(gr, gc)`.
    #[inline]
    pub fn sub_outcome(&self, gr: usize, gc: usize) -> Outcome {
        self.sub_outcomes[gr][gc]
    }

    /// Outcomes of all sub-boards.
    #[inline]
    pub fn sub_outcomes(&self) -> &[[Outcome; DIM]; DIM] {
        &self.sub_outcomes
    }

    /// Outcome of the whole game.
    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Sub-board the player to move is sent to, or `None` if unconstrained.
    #[inline]
    pub fn next_board(&self) -> Option<Coord> {
        self.next_board
    }

    /// Player to move.
    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Number of moves played.
    #[inline]
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Most recent move.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.mv)
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = Move> + '_ {
        self.history.iter().map(|record| record.mv)
    }

    /// Whether the player to move may play in the sub-board at `(gr, gc)`.
    fn board_playable(&self, gr: usize, gc: usize) -> bool {
        !self.sub_outcomes[gr][gc].is_decided()
            && self.next_board.map_or(true, |target| target == (gr, gc))
    }

    /// Explains why `mv` is illegal, or returns `Ok(())` if it is legal.
    fn check_legal(&self, mv: Move) -> Result<()> {
        let (gr, gc) = mv.global();
        if self.outcome.is_decided() {
            return Err(UtttError::IllegalMove(format!(
                "{}: the game is already over ({})",
                mv, self.outcome
            )));
        }
        if self.sub_outcomes[gr][gc].is_decided() {
            return Err(UtttError::IllegalMove(format!(
                "{}: sub-board ({}, {}) is already decided",
                mv, gr, gc
            )));
        }
        if let Some(target) = self.next_board {
            if target != (gr, gc) {
                return Err(UtttError::IllegalMove(format!(
                    "{}: must play in sub-board ({}, {})",
                    mv, target.0, target.1
                )));
            }
        }
        if self.cell(mv).is_some() {
            return Err(UtttError::IllegalMove(format!("{}: cell is occupied", mv)));
        }
        Ok(())
    }

    /// Whether `mv` can be played by the player to move.
    pub fn is_legal(&self, mv: Move) -> bool {
        self.check_legal(mv).is_ok()
    }

    /// All legal moves in row-major `(gr, gc, lr, lc)` order.
    ///
    /// Empty once the game is decided.
    pub fn available_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        if self.outcome.is_decided() {
            return moves;
        }

        for gr in 0..DIM {
            for gc in 0..DIM {
                if !self.board_playable(gr, gc) {
                    continue;
                }
                for lr in 0..DIM {
                    for lc in 0..DIM {
                        if self.cells[gr][gc][lr][lc].is_none() {
                            moves.push(Move::new_unchecked(gr, gc, lr, lc));
                        }
                    }
                }
            }
        }
        moves
    }

    /// Play `mv` for the player to move.
    ///
    /// Places the token, updates the sub-board and overall outcomes, sends
    /// the opponent to the sub-board matching the move's local coordinate
    /// (unconstrained if that sub-board is decided) and passes the turn.
    ///
    /// # Errors
    /// Returns `IllegalMove` without touching the board if the game is
    /// over, the sub-board is decided or not the constrained one, or the
    /// cell is occupied.
    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        self.check_legal(mv)?;

        let (gr, gc) = mv.global();
        let (lr, lc) = mv.local();

        self.history.push(UndoRecord {
            mv,
            next_board: self.next_board,
        });

        self.cells[gr][gc][lr][lc] = Some(self.to_move);
        self.sub_outcomes[gr][gc] = compute_sub_outcome(&self.cells[gr][gc]);
        self.outcome = compute_overall_outcome(&self.sub_outcomes);

        self.next_board = if self.sub_outcomes[lr][lc].is_decided() {
            None
        } else {
            Some((lr, lc))
        };
        self.to_move = self.to_move.opposite();
        Ok(())
    }

    /// Take back the most recent move, restoring the exact previous state.
    ///
    /// Returns the move that was undone, or `None` if no move was played.
    pub fn undo_move(&mut self) -> Option<Move> {
        let record = self.history.pop()?;
        let (gr, gc) = record.mv.global();
        let (lr, lc) = record.mv.local();

        self.cells[gr][gc][lr][lc] = None;
        self.sub_outcomes[gr][gc] = Outcome::Incomplete;
        self.outcome = Outcome::Incomplete;
        self.next_board = record.next_board;
        self.to_move = self.to_move.opposite();
        Some(record.mv)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlay drawn on top of a decided sub-board.
fn outcome_mark(outcome: Outcome) -> Option<[[char; DIM]; DIM]> {
    match outcome {
        Outcome::Incomplete => None,
        Outcome::Win(Player::X) => Some([['\\', ' ', '/'], [' ', 'X', ' '], ['/', ' ', '\\']]),
        Outcome::Win(Player::O) => Some([['/', '-', '\\'], ['|', 'O', '|'], ['\\', '-', '/']]),
        Outcome::Draw => Some([['#', ' ', '#'], [' ', '#', ' '], ['#', ' ', '#']]),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = vec!["-".repeat(2 * DIM + 1); DIM].join("+");

        for gr in 0..DIM {
            if gr > 0 {
                writeln!(f, "{}", separator)?;
            }
            for lr in 0..DIM {
                for gc in 0..DIM {
                    if gc > 0 {
                        write!(f, "|")?;
                    }
                    let mark = outcome_mark(self.sub_outcomes[gr][gc]);
                    for lc in 0..DIM {
                        let c = match (&mark, self.cells[gr][gc][lr][lc]) {
                            (Some(mark), _) => mark[lr][lc],
                            (None, Some(Player::X)) => 'X',
                            (None, Some(Player::O)) => 'O',
                            (None, None) => '.',
                        };
                        write!(f, " {}", c)?;
                    }
                    write!(f, " ")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(gr: usize, gc: usize, lr: usize, lc: usize) -> Move {
        Move::new_unchecked(gr, gc, lr, lc)
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.to_move(), Player::X);
        assert_eq!(board.outcome(), Outcome::Incomplete);
        assert_eq!(board.next_board(), None);
        assert_eq!(board.available_moves().len(), NUM_CELLS);
        assert_eq!(board.moves_played(), 0);
    }

    #[test]
    fn test_center_opening() {
        let mut board = Board::new();
        board.apply_move(mv(1, 1, 1, 1)).unwrap();

        assert_eq!(board.cell(mv(1, 1, 1, 1)), Some(Player::X));
        assert_eq!(board.next_board(), Some((1, 1)));
        assert_eq!(board.to_move(), Player::O);
        assert_eq!(board.last_move(), Some(mv(1, 1, 1, 1)));

        let moves = board.available_moves();
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.global() == (1, 1)));
    }

    #[test]
    fn test_constraint_is_enforced() {
        let mut board = Board::new();
        board.apply_move(mv(0, 0, 2, 1)).unwrap();

        let err = board.apply_move(mv(0, 0, 0, 0)).unwrap_err();
        assert!(matches!(err, UtttError::IllegalMove(_)));
        assert!(board.apply_move(mv(2, 1, 0, 0)).is_ok());
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut board = Board::new();
        board.apply_move(mv(1, 1, 1, 1)).unwrap();
        let before = board.clone();

        assert!(board.apply_move(mv(1, 1, 1, 1)).is_err());
        assert_eq!(board, before);
    }

    /// X takes the top row of (0,0); O keeps sending X back there.
    fn top_row_sequence() -> Vec<Move> {
        vec![
            mv(1, 1, 1, 1), // X -> O to (1,1)
            mv(1, 1, 0, 0), // O -> X to (0,0)
            mv(0, 0, 0, 1), // X -> O to (0,1)
            mv(0, 1, 0, 0), // O -> X to (0,0)
            mv(0, 0, 0, 2), // X -> O to (0,2)
            mv(0, 2, 0, 0), // O -> X to (0,0)
            mv(0, 0, 0, 0), // X completes the top row
        ]
    }

    #[test]
    fn test_top_row_wins_sub_board() {
        let moves = top_row_sequence();
        let mut board = Board::from_moves(&moves[..6]).unwrap();
        assert_eq!(board.sub_outcome(0, 0), Outcome::Incomplete);

        board.apply_move(moves[6]).unwrap();
        assert_eq!(board.sub_outcome(0, 0), Outcome::Win(Player::X));
        assert_eq!(board.outcome(), Outcome::Incomplete);
    }

    #[test]
    fn test_sent_to_decided_board_is_unconstrained() {
        let board = Board::from_moves(&top_row_sequence()).unwrap();

        // The winning move's local coordinate points at the board it just won.
        assert_eq!(board.next_board(), None);

        let moves = board.available_moves();
        assert!(moves.iter().all(|m| m.global() != (0, 0)));
        assert!(moves.iter().any(|m| m.global() == (2, 2)));
        // 8 open boards x 9 cells, minus the 4 tokens outside (0,0)
        assert_eq!(moves.len(), 8 * 9 - 4);
    }

    #[test]
    fn test_decided_board_rejects_moves() {
        let mut board = Board::from_moves(&top_row_sequence()).unwrap();
        assert!(board.apply_move(mv(0, 0, 2, 2)).is_err());
        assert!(!board.is_legal(mv(0, 0, 1, 1)));
    }

    #[test]
    fn test_undo_restores_everything() {
        let mut board = Board::new();
        board.apply_move(mv(1, 1, 0, 2)).unwrap();
        let before = board.clone();

        board.apply_move(mv(0, 2, 1, 1)).unwrap();
        assert_eq!(board.undo_move(), Some(mv(0, 2, 1, 1)));
        assert_eq!(board, before);

        assert_eq!(board.undo_move(), Some(mv(1, 1, 0, 2)));
        assert_eq!(board, Board::new());
        assert_eq!(board.undo_move(), None);
    }

    #[test]
    fn test_history_order() {
        let moves = [mv(1, 1, 0, 2), mv(0, 2, 1, 1), mv(1, 1, 2, 2)];
        let board = Board::from_moves(&moves).unwrap();
        assert_eq!(board.history().collect::<Vec<_>>(), moves.to_vec());
        assert_eq!(board.moves_played(), 3);
    }

    #[test]
    fn test_display_contains_tokens() {
        let mut board = Board::new();
        board.apply_move(mv(0, 0, 0, 0)).unwrap();
        board.apply_move(mv(0, 0, 2, 2)).unwrap();

        let text = board.to_string();
        assert_eq!(text.lines().count(), DIM * DIM + DIM - 1);
        assert!(text.starts_with(" X . ."));
        assert!(text.contains('O'));
    }
}
