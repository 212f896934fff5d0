//! Three-in-a-row detection shared by sub-boards and the global board.

use uttt_core::{Outcome, Player};

use crate::DIM;

/// A square on a `DIM x DIM` grid.
pub type Coord = (usize, usize);

/// Every winning line of a `DIM x DIM` grid: rows, columns, then the two diagonals.
pub fn lines() -> impl Iterator<Item = [Coord; DIM]> {
    let rows = (0..DIM).map(|r| -> [Coord; DIM] { std::array::from_fn(|i| (r, i)) });
    let cols = (0..DIM).map(|c| -> [Coord; DIM] { std::array::from_fn(|i| (i, c)) });
    let diagonal = std::iter::once::<[Coord; DIM]>(std::array::from_fn(|i| (i, i)));
    let anti_diagonal = std::iter::once::<[Coord; DIM]>(std::array::from_fn(|i| (i, DIM - 1 - i)));
    rows.chain(cols).chain(diagonal).chain(anti_diagonal)
}

/// Outcome of a grid of signed squares (`+1` X, `-1` O, `0` neutral).
///
/// A line whose absolute sum equals `DIM` is a win for the sign of the sum.
/// Without a winning line the grid is drawn when `complete`, otherwise
/// still in progress.
pub fn grid_outcome(signs: &[[i8; DIM]; DIM], complete: bool) -> Outcome {
    for line in lines() {
        let sum: i8 = line.iter().map(|&(r, c)| signs[r][c]).sum();
        if sum.unsigned_abs() as usize == DIM {
            if let Some(player) = Player::from_sign(sum) {
                return Outcome::Win(player);
            }
        }
    }

    if complete {
        Outcome::Draw
    } else {
        Outcome::Incomplete
    }
}

/// Outcome of one sub-board from its nine cells.
pub fn compute_sub_outcome(cells: &[[Option<Player>; DIM]; DIM]) -> Outcome {
    let signs = cells.map(|row| row.map(|cell| cell.map_or(0, Player::sign)));
    let full = cells.iter().flatten().all(Option::is_some);
    grid_outcome(&signs, full)
}

/// Outcome of the whole game from the grid of sub-board outcomes.
///
/// Drawn sub-boards count for neither player in line sums but do count
/// as decided when checking for an overall draw.
pub fn compute_overall_outcome(outcomes: &[[Outcome; DIM]; DIM]) -> Outcome {
    let signs = outcomes.map(|row| row.map(Outcome::sign));
    let all_decided = outcomes.iter().flatten().all(|o| o.is_decided());
    grid_outcome(&signs, all_decided)
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Player> = Some(Player::X);
    const O: Option<Player> = Some(Player::O);
    const E: Option<Player> = None;

    #[test]
    fn test_line_count() {
        assert_eq!(lines().count(), 2 * DIM + 2);
    }

    #[test]
    fn test_empty_is_incomplete() {
        assert_eq!(compute_sub_outcome(&[[E; 3]; 3]), Outcome::Incomplete);
    }

    #[test]
    fn test_row_column_and_diagonals() {
        let row = [[E, E, E], [O, O, O], [X, X, E]];
        assert_eq!(compute_sub_outcome(&row), Outcome::Win(Player::O));

        let col = [[X, O, E], [X, O, E], [X, E, E]];
        assert_eq!(compute_sub_outcome(&col), Outcome::Win(Player::X));

        let diag = [[X, O, O], [E, X, E], [E, E, X]];
        assert_eq!(compute_sub_outcome(&diag), Outcome::Win(Player::X));

        let anti = [[X, X, O], [E, O, E], [O, E, X]];
        assert_eq!(compute_sub_outcome(&anti), Outcome::Win(Player::O));
    }

    #[test]
    fn test_full_without_line_is_draw() {
        let cells = [[X, O, X], [X, O, O], [O, X, X]];
        assert_eq!(compute_sub_outcome(&cells), Outcome::Draw);
    }

    #[test]
    fn test_full_with_line_is_win() {
        let cells = [[X, X, X], [O, O, X], [X, O, O]];
        assert_eq!(compute_sub_outcome(&cells), Outcome::Win(Player::X));
    }

    #[test]
    fn test_overall_draw_is_neutral_in_lines() {
        let mut outcomes = [[Outcome::Incomplete; 3]; 3];
        outcomes[0][0] = Outcome::Win(Player::X);
        outcomes[0][1] = Outcome::Draw;
        outcomes[0][2] = Outcome::Win(Player::X);
        assert_eq!(compute_overall_outcome(&outcomes), Outcome::Incomplete);

        outcomes[0][1] = Outcome::Win(Player::X);
        assert_eq!(compute_overall_outcome(&outcomes), Outcome::Win(Player::X));
    }

    #[test]
    fn test_overall_all_decided_without_line_is_draw() {
        let x = Outcome::Win(Player::X);
        let o = Outcome::Win(Player::O);
        let d = Outcome::Draw;
        let outcomes = [[x, o, x], [x, d, o], [o, x, d]];
        assert_eq!(compute_overall_outcome(&outcomes), Outcome::Draw);
    }
}
