//! Ultimate Tic-Tac-Toe arena.
//!
//! Play against the engines from the terminal, or pit two engines against
//! each other over many games.

mod agents;
mod config;
mod games;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use uttt_board::Board;

use crate::agents::{build_agent, AgentKind};
use crate::config::{load_config, ArenaConfig};
use crate::games::{play_game, run_match};

/// Ultimate Tic-Tac-Toe with MCTS and minimax opponents.
#[derive(Parser)]
#[command(name = "uttt")]
#[command(about = "Play Ultimate Tic-Tac-Toe or run engine matches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to ./uttt.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(flatten)]
    engine: EngineArgs,
}

/// Overrides for the settings file.
#[derive(Args, Debug, Default)]
struct EngineArgs {
    /// MCTS difficulty level (1-5).
    #[arg(long, global = true)]
    difficulty: Option<u8>,

    /// MCTS iterations per move.
    #[arg(long, global = true, conflicts_with = "difficulty")]
    iterations: Option<usize>,

    /// MCTS time budget per move in milliseconds.
    #[arg(long, global = true)]
    mcts_time_ms: Option<u64>,

    /// UCB1 exploration constant.
    #[arg(long, global = true)]
    exploration: Option<f32>,

    /// Scale the MCTS budget with game progress.
    #[arg(long, global = true, overrides_with = "no_variable_difficulty")]
    variable_difficulty: bool,

    /// Keep the MCTS budget fixed, even if the settings file scales it.
    #[arg(long, global = true, overrides_with = "variable_difficulty")]
    no_variable_difficulty: bool,

    /// Minimax depth limit.
    #[arg(long, global = true)]
    depth: Option<usize>,

    /// Minimax time budget per move in milliseconds.
    #[arg(long, global = true)]
    minimax_time_ms: Option<u64>,

    /// Minimax heuristic: positional, draw-penalty or attack.
    #[arg(long, global = true)]
    heuristic: Option<String>,
}

impl EngineArgs {
    fn apply(&self, config: &mut ArenaConfig) {
        if let Some(level) = self.difficulty {
            config.mcts.difficulty = Some(level);
        }
        if let Some(iterations) = self.iterations {
            config.mcts.iterations = iterations;
            config.mcts.difficulty = None;
        }
        if let Some(ms) = self.mcts_time_ms {
            config.mcts.time_budget_ms = Some(ms);
        }
        if let Some(c) = self.exploration {
            config.mcts.exploration = c;
        }
        if self.variable_difficulty {
            config.mcts.variable_difficulty = true;
        }
        if self.no_variable_difficulty {
            config.mcts.variable_difficulty = false;
        }
        if let Some(depth) = self.depth {
            config.minimax.max_depth = Some(depth);
            // A depth on its own means a fixed-depth search.
            if self.minimax_time_ms.is_none() {
                config.minimax.time_budget_ms = None;
            }
        }
        if let Some(ms) = self.minimax_time_ms {
            config.minimax.time_budget_ms = Some(ms);
        }
        if let Some(name) = &self.heuristic {
            config.minimax.heuristic = name.clone();
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game, printing the board after every move.
    Play {
        /// Player for X (moves first).
        #[arg(long, value_enum, default_value = "human")]
        x: AgentKind,

        /// Player for O.
        #[arg(long, value_enum, default_value = "mcts")]
        o: AgentKind,

        /// Random seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play many games between two engines in parallel.
    Match {
        /// Player for X in every game.
        #[arg(long, value_enum, default_value = "mcts")]
        x: AgentKind,

        /// Player for O in every game.
        #[arg(long, value_enum, default_value = "random")]
        o: AgentKind,

        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Random seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn cmd_play(x: AgentKind, o: AgentKind, seed: u64, config: &ArenaConfig) -> Result<()> {
    let mut x_agent = build_agent(x, config, seed)?;
    let mut o_agent = build_agent(o, config, seed.wrapping_add(500))?;

    println!("{} (X) vs {} (O), seed {}", x, o, seed);
    println!("{}", Board::new());

    let record = play_game(x_agent.as_mut(), o_agent.as_mut(), |board, mv| {
        let player = board.to_move().opposite();
        println!("\n{} plays {}\n{}", player, mv, board);
    })?;

    println!("\nGame over after {} moves: {}", record.moves, record.outcome);
    Ok(())
}

fn cmd_match(
    x: AgentKind,
    o: AgentKind,
    games: usize,
    seed: u64,
    json: bool,
    config: &ArenaConfig,
) -> Result<()> {
    let summary = run_match(x, o, games, seed, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let pct = |n: usize| n as f64 / summary.games.max(1) as f64 * 100.0;
    println!("{} (X) vs {} (O): {} games, seed {}", x, o, summary.games, seed);
    println!("================================================");
    println!("X wins:  {} ({:.1}%)", summary.x_wins, pct(summary.x_wins));
    println!("O wins:  {} ({:.1}%)", summary.o_wins, pct(summary.o_wins));
    println!("Draws:   {} ({:.1}%)", summary.draws, pct(summary.draws));
    println!("------------------------------------------------");
    println!("Average game length: {:.1} moves", summary.mean_moves);
    println!("Completed in {:.2}s", summary.elapsed_secs);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut config = load_config(cli.config.as_deref());
    cli.engine.apply(&mut config);
    // Fail fast on bad settings, before any game starts.
    config.mcts.to_config()?;
    config.minimax.to_config()?;

    match cli.command {
        Commands::Play { x, o, seed } => {
            let seed = seed.unwrap_or_else(rand::random);
            info!(seed, "playing single game");
            cmd_play(x, o, seed, &config)
        }
        Commands::Match {
            x,
            o,
            games,
            seed,
            json,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            cmd_match(x, o, games, seed, json, &config)
        }
    }
}
