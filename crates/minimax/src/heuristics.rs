//! Static evaluation of unfinished positions.
//!
//! Every evaluator scores from one player's point of view, higher is
//! better, and hands decided positions to [`terminal_value`].

use std::fmt;
use std::str::FromStr;

use uttt_board::lines::lines;
use uttt_board::{Board, DIM};
use uttt_core::{Outcome, Player, UtttError};

/// Score of a won game. Far above anything a heuristic can produce.
pub const WIN_VALUE: f32 = 100_000.0;

/// One weight per square of a 3x3 grid.
pub type Weights = [[f32; DIM]; DIM];

/// Local cell weights: centre, then corners, then edges.
pub const DEFAULT_CELL_WEIGHTS: Weights = [[2.0, 1.0, 2.0], [1.0, 3.0, 1.0], [2.0, 1.0, 2.0]];

/// Weights for won sub-boards: the centre board is worth most.
pub const DEFAULT_BOARD_WEIGHTS: Weights = [[8.0, 6.0, 8.0], [6.0, 10.0, 6.0], [8.0, 6.0, 8.0]];

/// Bonus for one or two won sub-boards on an otherwise open global line.
pub const DEFAULT_ATTACK_WEIGHTS: [f32; 2] = [4.0, 5.0];

pub const DEFAULT_DRAW_VALUE: f32 = 0.5;

/// Static position evaluator.
pub trait Heuristic: Send + Sync {
    /// Score `board` for `player`; higher is better.
    fn evaluate(&self, board: &Board, player: Player) -> f32;
}

/// Value of a finished game for `player`.
pub fn terminal_value(outcome: Outcome, player: Player) -> f32 {
    match outcome {
        Outcome::Win(winner) if winner == player => WIN_VALUE,
        Outcome::Win(_) => -WIN_VALUE,
        Outcome::Draw | Outcome::Incomplete => 0.0,
    }
}

/// Sum of `weights[lr][lc]` over `player`'s tokens in undecided sub-boards.
fn cell_score(board: &Board, player: Player, weights: &Weights) -> f32 {
    let mut score = 0.0;
    for gr in 0..DIM {
        for gc in 0..DIM {
            if board.sub_outcome(gr, gc).is_decided() {
                continue;
            }
            for (lr, row) in board.sub_board(gr, gc).iter().enumerate() {
                for (lc, cell) in row.iter().enumerate() {
                    if *cell == Some(player) {
                        score += weights[lr][lc];
                    }
                }
            }
        }
    }
    score
}

/// Sum of `board_weights` over sub-boards won by `player`, with drawn
/// sub-boards counted at `draw_value` of their weight.
fn board_score(board: &Board, player: Player, board_weights: &Weights, draw_value: f32) -> f32 {
    let mut score = 0.0;
    for (gr, row) in board.sub_outcomes().iter().enumerate() {
        for (gc, outcome) in row.iter().enumerate() {
            match outcome {
                Outcome::Win(winner) if *winner == player => score += board_weights[gr][gc],
                Outcome::Draw => score += draw_value * board_weights[gr][gc],
                _ => {}
            }
        }
    }
    score
}

/// Pressure on the global lines: for every line where exactly one side
/// has won one or two sub-boards and the rest are still open, add that
/// side's attack weight (negated for the opponent).
fn line_pressure(outcomes: &[[Outcome; DIM]; DIM], player: Player, attack_weights: &[f32; 2]) -> f32 {
    let mut score = 0.0;
    for line in lines() {
        let (mut mine, mut theirs, mut open) = (0, 0, 0);
        for (r, c) in line {
            match outcomes[r][c] {
                Outcome::Win(winner) if winner == player => mine += 1,
                Outcome::Win(_) => theirs += 1,
                Outcome::Incomplete => open += 1,
                Outcome::Draw => {}
            }
        }
        if mine + open == DIM && (1..=2).contains(&mine) {
            score += attack_weights[mine - 1];
        } else if theirs + open == DIM && (1..=2).contains(&theirs) {
            score -= attack_weights[theirs - 1];
        }
    }
    score
}

/// Cell weights in open sub-boards plus board weights for won ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Positional {
    pub cell_weights: Weights,
    pub board_weights: Weights,
}

impl Default for Positional {
    fn default() -> Self {
        Self {
            cell_weights: DEFAULT_CELL_WEIGHTS,
            board_weights: DEFAULT_BOARD_WEIGHTS,
        }
    }
}

impl Heuristic for Positional {
    fn evaluate(&self, board: &Board, player: Player) -> f32 {
        if board.outcome().is_decided() {
            return terminal_value(board.outcome(), player);
        }
        cell_score(board, player, &self.cell_weights)
            + board_score(board, player, &self.board_weights, 0.0)
    }
}

/// [`Positional`], with drawn sub-boards worth `draw_value` of their
/// board weight. Negative values make the search avoid draws.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionalDrawPenalty {
    pub positional: Positional,
    pub draw_value: f32,
}

impl Default for PositionalDrawPenalty {
    fn default() -> Self {
        Self {
            positional: Positional::default(),
            draw_value: DEFAULT_DRAW_VALUE,
        }
    }
}

impl Heuristic for PositionalDrawPenalty {
    fn evaluate(&self, board: &Board, player: Player) -> f32 {
        if board.outcome().is_decided() {
            return terminal_value(board.outcome(), player);
        }
        let Positional {
            cell_weights,
            board_weights,
        } = &self.positional;
        cell_score(board, player, cell_weights)
            + board_score(board, player, board_weights, self.draw_value)
    }
}

/// Cell weights plus pressure on the global lines.
#[derive(Clone, Debug, PartialEq)]
pub struct Attack {
    pub cell_weights: Weights,
    pub attack_weights: [f32; 2],
}

impl Default for Attack {
    fn default() -> Self {
        Self {
            cell_weights: DEFAULT_CELL_WEIGHTS,
            attack_weights: DEFAULT_ATTACK_WEIGHTS,
        }
    }
}

impl Heuristic for Attack {
    fn evaluate(&self, board: &Board, player: Player) -> f32 {
        if board.outcome().is_decided() {
            return terminal_value(board.outcome(), player);
        }
        cell_score(board, player, &self.cell_weights)
            + line_pressure(board.sub_outcomes(), player, &self.attack_weights)
    }
}

/// The built-in evaluators, by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    #[default]
    Positional,
    DrawPenalty,
    Attack,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [Self::Positional, Self::DrawPenalty, Self::Attack];

    /// The evaluator with its default weights.
    pub fn build(self) -> Box<dyn Heuristic> {
        match self {
            Self::Positional => Box::new(Positional::default()),
            Self::DrawPenalty => Box::new(PositionalDrawPenalty::default()),
            Self::Attack => Box::new(Attack::default()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Positional => "positional",
            Self::DrawPenalty => "draw-penalty",
            Self::Attack => "attack",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeuristicKind {
    type Err = UtttError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UtttError::InvalidConfig(format!("unknown heuristic '{}'", s)))
    }
}
