//! Player types selectable from the command line.

use std::fmt;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use anyhow::Result;
use clap::ValueEnum;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use uttt_board::{Board, Move};
use uttt_core::{Agent, UtttError};
use uttt_mcts::{Mcts, RandomAgent, RolloutEvaluator};
use uttt_minimax::MinimaxAgent;

use crate::config::ArenaConfig;

/// A boxed player that can be moved to a worker thread.
pub type BoxedAgent = Box<dyn Agent<Board> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Moves typed on stdin
    Human,
    /// Uniformly random legal moves
    Random,
    /// Monte Carlo tree search
    Mcts,
    /// Iterative-deepening alpha-beta
    Minimax,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Human => "human",
            Self::Random => "random",
            Self::Mcts => "mcts",
            Self::Minimax => "minimax",
        };
        f.write_str(name)
    }
}

/// Builds a fresh player. `seed` drives every random choice it makes.
pub fn build_agent(kind: AgentKind, config: &ArenaConfig, seed: u64) -> Result<BoxedAgent> {
    let agent: BoxedAgent = match kind {
        AgentKind::Human => Box::new(HumanAgent::stdio()),
        AgentKind::Random => Box::new(RandomAgent::new(ChaCha8Rng::seed_from_u64(seed))),
        AgentKind::Mcts => Box::new(Mcts::new(
            config.mcts.to_config()?,
            RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed)),
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        )),
        AgentKind::Minimax => Box::new(MinimaxAgent::new(config.minimax.to_config()?)),
    };
    Ok(agent)
}

/// A person entering moves as `board_row board_col row col`.
///
/// Unparsable or illegal input is reported and asked for again.
pub struct HumanAgent<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl HumanAgent<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, board: &Board) -> io::Result<()> {
        match board.next_board() {
            Some((gr, gc)) => write!(
                self.output,
                "{} to move in board {} {} (board_row board_col row col): ",
                board.to_move(),
                gr,
                gc
            )?,
            None => write!(
                self.output,
                "{} to move anywhere (board_row board_col row col): ",
                board.to_move()
            )?,
        }
        self.output.flush()
    }
}

fn io_error(e: io::Error) -> UtttError {
    UtttError::InvalidMove(format!("could not read move: {}", e))
}

impl<R: BufRead, W: Write> Agent<Board> for HumanAgent<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn pick_move(&mut self, state: &Board) -> uttt_core::Result<Move> {
        if state.available_moves().is_empty() {
            return Err(UtttError::NoAvailableMoves);
        }
        loop {
            self.prompt(state).map_err(io_error)?;
            let mut line = String::new();
            if self.input.read_line(&mut line).map_err(io_error)? == 0 {
                return Err(UtttError::InvalidMove("input closed".to_string()));
            }

            let mv = match line.trim().parse::<Move>() {
                Ok(mv) => mv,
                Err(e) => {
                    writeln!(self.output, "{}", e).map_err(io_error)?;
                    continue;
                }
            };
            if state.is_legal(mv) {
                return Ok(mv);
            }
            // Let the board explain why.
            let reason = state
                .clone()
                .apply_move(mv)
                .err()
                .map_or_else(|| "illegal move".to_string(), |e| e.to_string());
            writeln!(self.output, "{}", reason).map_err(io_error)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn human(input: &str) -> HumanAgent<Cursor<Vec<u8>>, Vec<u8>> {
        HumanAgent::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_human_reprompts_until_legal() {
        let board = Board::from_moves(&[Move::new_unchecked(1, 1, 0, 0)]).unwrap();
        // Garbage, out of range, wrong sub-board, then legal.
        let mut agent = human("hello\n3 3 3 3\n1 1 1 1\n0 0 2 2\n");

        let mv = agent.pick_move(&board).unwrap();
        assert_eq!(mv, Move::new_unchecked(0, 0, 2, 2));

        let transcript = String::from_utf8(agent.into_output()).unwrap();
        assert_eq!(transcript.matches("to move in board 0 0").count(), 4);
    }

    #[test]
    fn test_human_eof_is_error() {
        let mut agent = human("");
        assert!(agent.pick_move(&Board::new()).is_err());
    }

    #[test]
    fn test_build_every_computer_agent() {
        let config = ArenaConfig::default();
        for kind in [AgentKind::Random, AgentKind::Mcts, AgentKind::Minimax] {
            let agent = build_agent(kind, &config, 7).unwrap();
            assert_eq!(agent.name(), kind.to_string());
        }
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = ArenaConfig::default();
        config.mcts.difficulty = Some(0);
        assert!(build_agent(AgentKind::Mcts, &config, 1).is_err());
    }
}
