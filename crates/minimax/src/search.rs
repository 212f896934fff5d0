//! Iterative-deepening minimax with alpha-beta pruning.
//!
//! Scores are always from the searching player's point of view: their
//! plies maximise, the opponent's minimise. The search plays and takes
//! back moves on a private copy of the board.

use std::time::Instant;

use tracing::{debug, trace};
use uttt_board::{Board, Move, NUM_CELLS};
use uttt_core::{Agent, Outcome, Player, Result, UtttError};

use crate::config::MinimaxConfig;
use crate::heuristics::{terminal_value, Heuristic, WIN_VALUE};

/// Result of one fixed-depth pass.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub best_move: Move,
    pub score: f32,
    pub depth: usize,
    /// Positions visited during the pass.
    pub nodes: u64,
}

impl SearchOutcome {
    /// The score proves a win or a loss.
    pub fn is_proven(&self) -> bool {
        self.score.abs() >= WIN_VALUE
    }
}

/// Value of a finished game found with `depth_left` plies of search
/// remaining. Earlier wins score higher and earlier losses lower.
pub fn terminal_score(outcome: Outcome, player: Player, depth_left: usize) -> f32 {
    let value = terminal_value(outcome, player);
    if value > 0.0 {
        value + depth_left as f32
    } else if value < 0.0 {
        value - depth_left as f32
    } else {
        value
    }
}

/// Minimax player.
pub struct MinimaxAgent {
    config: MinimaxConfig,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    /// Create an agent using the heuristic named in `config`.
    pub fn new(config: MinimaxConfig) -> Self {
        let heuristic = config.heuristic.build();
        Self::with_heuristic(config, heuristic)
    }

    /// Create an agent with a custom evaluator.
    pub fn with_heuristic(config: MinimaxConfig, heuristic: Box<dyn Heuristic>) -> Self {
        Self { config, heuristic }
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Runs one full alpha-beta pass to `depth` with no clock.
    ///
    /// # Errors
    /// Returns `NoAvailableMoves` if the game is over.
    pub fn search_depth(&self, board: &Board, depth: usize) -> Result<SearchOutcome> {
        let mut board = board.clone();
        let mut searcher = Searcher::new(
            self.heuristic.as_ref(),
            &board,
            None,
            self.config.check_interval,
        );
        let outcome = searcher.root(&mut board, depth)?;
        // INVARIANT: only a deadline can abort a pass
        Ok(outcome.expect("BUG: search aborted without a deadline"))
    }

    /// Deepens from depth 0 until the clock, the depth limit or a proven
    /// result stops it, and returns the last completed pass.
    ///
    /// # Errors
    /// Returns `NoAvailableMoves` if the game is over.
    pub fn search(&self, board: &Board) -> Result<SearchOutcome> {
        let start = Instant::now();
        let deadline = self.config.time_budget.map(|budget| start + budget);
        let mut board = board.clone();

        // Depth 0 always completes, so there is always an answer.
        let mut best = self.search_depth(&board, 0)?;
        debug!(depth = 0, best = %best.best_move, score = best.score, "minimax depth done");

        // No point searching past the last empty cell.
        let horizon = NUM_CELLS - board.moves_played();
        let limit = self.config.max_depth.unwrap_or(horizon).min(horizon);

        for depth in 1..=limit {
            if best.is_proven() {
                trace!(depth, score = best.score, "result proven, stop deepening");
                break;
            }
            let mut searcher = Searcher::new(
                self.heuristic.as_ref(),
                &board,
                deadline,
                self.config.check_interval,
            );
            match searcher.root(&mut board, depth)? {
                Some(outcome) => {
                    debug!(
                        depth,
                        best = %outcome.best_move,
                        score = outcome.score,
                        nodes = outcome.nodes,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "minimax depth done"
                    );
                    best = outcome;
                }
                None => {
                    debug!(depth, nodes = searcher.nodes, "minimax depth abandoned at deadline");
                    break;
                }
            }
        }
        Ok(best)
    }
}

impl Agent<Board> for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn pick_move(&mut self, state: &Board) -> Result<Move> {
        Ok(self.search(state)?.best_move)
    }
}

/// State of one fixed-depth pass.
struct Searcher<'a> {
    heuristic: &'a dyn Heuristic,
    player: Player,
    deadline: Option<Instant>,
    check_interval: u64,
    nodes: u64,
    aborted: bool,
}

impl<'a> Searcher<'a> {
    fn new(
        heuristic: &'a dyn Heuristic,
        board: &Board,
        deadline: Option<Instant>,
        check_interval: u64,
    ) -> Self {
        Self {
            heuristic,
            player: board.to_move(),
            deadline,
            check_interval: check_interval.max(1),
            nodes: 0,
            aborted: false,
        }
    }

    /// Searches every root move. Returns `None` if the deadline passed.
    fn root(&mut self, board: &mut Board, depth: usize) -> Result<Option<SearchOutcome>> {
        let moves = board.available_moves();
        if moves.is_empty() {
            return Err(UtttError::NoAvailableMoves);
        }

        let mut best: Option<(Move, f32)> = None;
        let mut alpha = f32::NEG_INFINITY;
        for mv in moves {
            board.apply_move(mv)?;
            let score = self.alphabeta(board, depth, alpha, f32::INFINITY, false);
            board.undo_move();
            let score = score?;
            if self.aborted {
                return Ok(None);
            }

            // Strict improvement: the first of equal moves stays.
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
                alpha = alpha.max(score);
            }
        }

        Ok(best.map(|(best_move, score)| SearchOutcome {
            best_move,
            score,
            depth,
            nodes: self.nodes,
        }))
    }

    fn alphabeta(
        &mut self,
        board: &mut Board,
        depth: usize,
        mut alpha: f32,
        mut beta: f32,
        maximizing: bool,
    ) -> Result<f32> {
        self.nodes += 1;
        if self.out_of_time() {
            return Ok(0.0);
        }

        let outcome = board.outcome();
        if outcome.is_decided() {
            return Ok(terminal_score(outcome, self.player, depth));
        }
        if depth == 0 {
            return Ok(self.heuristic.evaluate(board, self.player));
        }

        let moves = board.available_moves();
        if maximizing {
            let mut value = f32::NEG_INFINITY;
            for mv in moves {
                board.apply_move(mv)?;
                let score = self.alphabeta(board, depth - 1, alpha, beta, false);
                board.undo_move();
                value = value.max(score?);
                if self.aborted || value >= beta {
                    break; // Beta cutoff
                }
                alpha = alpha.max(value);
            }
            Ok(value)
        } else {
            let mut value = f32::INFINITY;
            for mv in moves {
                board.apply_move(mv)?;
                let score = self.alphabeta(board, depth - 1, alpha, beta, true);
                board.undo_move();
                value = value.min(score?);
                if self.aborted || value <= alpha {
                    break; // Alpha cutoff
                }
                beta = beta.min(value);
            }
            Ok(value)
        }
    }

    /// Checks the clock every `check_interval` nodes; sticky once tripped.
    fn out_of_time(&mut self) -> bool {
        if !self.aborted && self.nodes % self.check_interval == 0 {
            if let Some(deadline) = self.deadline {
                self.aborted = Instant::now() >= deadline;
            }
        }
        self.aborted
    }
}
