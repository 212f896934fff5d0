//! Engine settings from `uttt.toml`.
//!
//! Settings are resolved with the following priority (highest to lowest):
//! 1. Command-line flags
//! 2. The TOML file (`--config <path>`, else `uttt.toml` if present)
//! 3. Built-in defaults
//!
//! ```toml
//! [mcts]
//! difficulty = 4
//! exploration = 1.0
//! variable_difficulty = true
//!
//! [minimax]
//! time_budget_ms = 500
//! heuristic = "attack"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uttt_mcts::{Difficulty, MctsConfig};
use uttt_minimax::{HeuristicKind, MinimaxConfig};

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "uttt.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub mcts: MctsSection,
    pub minimax: MinimaxSection,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MctsSection {
    /// Level 1-5; takes precedence over `iterations`.
    pub difficulty: Option<u8>,
    pub iterations: usize,
    pub time_budget_ms: Option<u64>,
    pub exploration: f32,
    pub variable_difficulty: bool,
}

impl Default for MctsSection {
    fn default() -> Self {
        let defaults = MctsConfig::default();
        Self {
            difficulty: None,
            iterations: defaults.iterations,
            time_budget_ms: None,
            exploration: defaults.exploration,
            variable_difficulty: defaults.variable_difficulty,
        }
    }
}

impl MctsSection {
    pub fn to_config(&self) -> Result<MctsConfig> {
        let mut config = match self.difficulty {
            Some(level) => MctsConfig::for_difficulty(Difficulty::new(level)?),
            None => MctsConfig::with_iterations(self.iterations),
        };
        config.time_budget = self.time_budget_ms.map(Duration::from_millis);
        config.exploration = self.exploration;
        config.variable_difficulty = self.variable_difficulty;
        config.validate().context("invalid [mcts] settings")?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MinimaxSection {
    pub time_budget_ms: Option<u64>,
    pub max_depth: Option<usize>,
    pub heuristic: String,
}

impl Default for MinimaxSection {
    fn default() -> Self {
        let defaults = MinimaxConfig::default();
        Self {
            time_budget_ms: defaults.time_budget.map(|budget| budget.as_millis() as u64),
            max_depth: defaults.max_depth,
            heuristic: defaults.heuristic.to_string(),
        }
    }
}

impl MinimaxSection {
    pub fn to_config(&self) -> Result<MinimaxConfig> {
        let config = MinimaxConfig {
            time_budget: self.time_budget_ms.map(Duration::from_millis),
            max_depth: self.max_depth,
            heuristic: self.heuristic.parse::<HeuristicKind>()?,
            ..MinimaxConfig::default()
        };
        config.validate().context("invalid [minimax] settings")?;
        Ok(config)
    }
}

/// Load settings from `path`, or from [`CONFIG_FILE`] if it exists.
///
/// Never fails: unreadable or malformed files are logged and replaced by
/// the defaults.
pub fn load_config(path: Option<&Path>) -> ArenaConfig {
    match path {
        Some(path) => load_from_path(path),
        None => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                load_from_path(path)
            } else {
                debug!("No {} found, using built-in defaults", CONFIG_FILE);
                ArenaConfig::default()
            }
        }
    }
}

/// Load settings from a specific file.
pub fn load_from_path(path: &Path) -> ArenaConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                ArenaConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            ArenaConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_defaults() {
        let config = ArenaConfig::default();
        let mcts = config.mcts.to_config().unwrap();
        assert_eq!(mcts.iterations, MctsConfig::default().iterations);

        let minimax = config.minimax.to_config().unwrap();
        assert_eq!(minimax.time_budget, MinimaxConfig::default().time_budget);
        assert_eq!(minimax.heuristic, HeuristicKind::Positional);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ArenaConfig = toml::from_str(
            r#"
            [mcts]
            difficulty = 1
            variable_difficulty = true

            [minimax]
            heuristic = "attack"
            "#,
        )
        .unwrap();

        let mcts = config.mcts.to_config().unwrap();
        assert_eq!(mcts.iterations, 200);
        assert!(mcts.variable_difficulty);
        assert!((mcts.exploration - std::f32::consts::SQRT_2).abs() < 1e-6);

        let minimax = config.minimax.to_config().unwrap();
        assert_eq!(minimax.heuristic, HeuristicKind::Attack);
        assert_eq!(minimax.time_budget, Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: ArenaConfig = toml::from_str("").unwrap();
        assert_eq!(config, ArenaConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut section = MctsSection::default();
        section.difficulty = Some(9);
        assert!(section.to_config().is_err());

        let mut section = MinimaxSection::default();
        section.heuristic = "mystery".to_string();
        assert!(section.to_config().is_err());

        let mut section = MinimaxSection::default();
        section.time_budget_ms = None;
        section.max_depth = None;
        assert!(section.to_config().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_from_path(Path::new("/nonexistent/uttt.toml"));
        assert_eq!(config, ArenaConfig::default());
    }
}
