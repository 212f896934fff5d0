//! Running single games and parallel matches.

use std::time::Instant;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};
use uttt_board::{Board, Move};
use uttt_core::{Agent, Game, Outcome, Player};

use crate::agents::{build_agent, AgentKind};
use crate::config::ArenaConfig;

/// How one game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub moves: usize,
}

/// Plays `x` against `o` from the empty board.
///
/// `on_move` sees the board after every move.
pub fn play_game(
    x: &mut dyn Agent<Board>,
    o: &mut dyn Agent<Board>,
    mut on_move: impl FnMut(&Board, Move),
) -> Result<GameRecord> {
    let mut board = Board::new();
    while !board.is_terminal() {
        let player = board.to_move();
        let agent: &mut dyn Agent<Board> = match player {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };
        let mv = agent
            .make_move(&mut board)
            .with_context(|| format!("{} ({}) failed to move", agent.name(), player))?;
        on_move(&board, mv);
    }
    Ok(GameRecord {
        outcome: board.outcome(),
        moves: board.moves_played(),
    })
}

/// Totals over a match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub x: AgentKind,
    pub o: AgentKind,
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub mean_moves: f64,
    pub seed: u64,
    pub elapsed_secs: f64,
}

impl MatchSummary {
    fn from_records(x: AgentKind, o: AgentKind, seed: u64, records: &[GameRecord]) -> Self {
        let count = |outcome: Outcome| records.iter().filter(|r| r.outcome == outcome).count();
        let total_moves: usize = records.iter().map(|r| r.moves).sum();
        Self {
            x,
            o,
            games: records.len(),
            x_wins: count(Outcome::Win(Player::X)),
            o_wins: count(Outcome::Win(Player::O)),
            draws: count(Outcome::Draw),
            mean_moves: if records.is_empty() {
                0.0
            } else {
                total_moves as f64 / records.len() as f64
            },
            seed,
            elapsed_secs: 0.0,
        }
    }
}

/// Seed for game `index` of a match.
fn game_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add(index as u64 * 1000)
}

/// Plays `games` independent games in parallel, `x` always moving first.
pub fn run_match(
    x: AgentKind,
    o: AgentKind,
    games: usize,
    seed: u64,
    config: &ArenaConfig,
) -> Result<MatchSummary> {
    if x == AgentKind::Human || o == AgentKind::Human {
        bail!("human players cannot take part in a match; use `play` instead");
    }

    let start = Instant::now();
    info!(%x, %o, games, seed, "starting match");

    let records = (0..games)
        .into_par_iter()
        .map(|i| {
            let seed = game_seed(seed, i);
            let mut x_agent = build_agent(x, config, seed)?;
            let mut o_agent = build_agent(o, config, seed.wrapping_add(500))?;
            let record = play_game(x_agent.as_mut(), o_agent.as_mut(), |_, _| {})
                .with_context(|| format!("game {} failed", i))?;
            debug!(game = i, outcome = %record.outcome, moves = record.moves, "game finished");
            Ok(record)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut summary = MatchSummary::from_records(x, o, seed, &records);
    summary.elapsed_secs = start.elapsed().as_secs_f64();
    Ok(summary)
}
