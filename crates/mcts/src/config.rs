//! MCTS configuration parameters.
//!
//! These parameters control how much work the search does per move and
//! how it balances exploration against exploitation.

use std::time::Duration;

use uttt_core::{Result, UtttError};

/// Discrete strength level, mapped to an iteration budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Iterations per move for levels 1 through 5.
    const ITERATIONS: [usize; 5] = [200, 800, 2_000, 5_000, 12_000];

    /// Create a difficulty level.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `level` is outside `1..=5`.
    pub fn new(level: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(UtttError::InvalidConfig(format!(
                "difficulty {} is outside {}..={}",
                level,
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// The level as a number in `1..=5`.
    pub fn level(self) -> u8 {
        self.0
    }

    /// Iterations per move at this level.
    pub fn iterations(self) -> usize {
        Self::ITERATIONS[(self.0 - Self::MIN) as usize]
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(3)
    }
}

/// MCTS configuration parameters.
#[derive(Clone, Debug)]
pub struct MctsConfig {
    /// Maximum number of select/expand/simulate/backpropagate iterations per move.
    pub iterations: usize,

    /// Optional wall-clock budget per move. Checked once per iteration, so
    /// a search can overrun it by one playout.
    pub time_budget: Option<Duration>,

    /// UCB1 exploration constant `C`.
    /// Higher values spread visits more evenly across children.
    pub exploration: f32,

    /// Scale the budget with game progress: less work in the wide-open
    /// opening, more in the tactical endgame.
    pub variable_difficulty: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: Difficulty::default().iterations(),
            time_budget: None,
            exploration: std::f32::consts::SQRT_2,
            variable_difficulty: false,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Create a config whose budget is a difficulty level.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::with_iterations(difficulty.iterations())
    }

    /// Create a config limited only by wall-clock time.
    pub fn with_time_budget(budget: Duration) -> Self {
        Self {
            iterations: usize::MAX,
            time_budget: Some(budget),
            ..Default::default()
        }
    }

    /// Budget multiplier for a position `moves_played` plies into the game.
    pub fn budget_scale(&self, moves_played: usize) -> f64 {
        if !self.variable_difficulty {
            return 1.0;
        }
        match moves_played {
            0..=9 => 0.5,
            10..=29 => 1.0,
            _ => 2.0,
        }
    }

    /// Iterations to run for a position `moves_played` plies into the game.
    pub fn effective_iterations(&self, moves_played: usize) -> usize {
        let scale = self.budget_scale(moves_played);
        if scale == 1.0 {
            self.iterations
        } else {
            (self.iterations as f64 * scale).round() as usize
        }
    }

    /// Time budget for a position `moves_played` plies into the game.
    pub fn effective_time_budget(&self, moves_played: usize) -> Option<Duration> {
        let scale = self.budget_scale(moves_played);
        self.time_budget.map(|budget| budget.mul_f64(scale))
    }

    /// Check that the parameters make sense.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for a negative or non-finite exploration
    /// constant, or a zero time budget.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(UtttError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration
            )));
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(UtttError::InvalidConfig(
                "time budget must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations, 2_000);
        assert!((config.exploration - 1.414_213_5).abs() < 1e-5);
        assert!(config.time_budget.is_none());
        assert!(!config.variable_difficulty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_iterations() {
        let config = MctsConfig::with_iterations(100);
        assert_eq!(config.iterations, 100);
        // Other values should be default
        assert!((config.exploration - std::f32::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_difficulty_levels() {
        assert!(Difficulty::new(0).is_err());
        assert!(Difficulty::new(6).is_err());

        let budgets: Vec<usize> = (1..=5)
            .map(|level| Difficulty::new(level).unwrap().iterations())
            .collect();
        assert!(budgets.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            MctsConfig::for_difficulty(Difficulty::new(1).unwrap()).iterations,
            200
        );
    }

    #[test]
    fn test_fixed_budget_ignores_progress() {
        let config = MctsConfig::with_iterations(1000);
        assert_eq!(config.effective_iterations(0), 1000);
        assert_eq!(config.effective_iterations(60), 1000);
    }

    #[test]
    fn test_variable_difficulty_scales_budget() {
        let mut config = MctsConfig::with_iterations(1000);
        config.variable_difficulty = true;
        config.time_budget = Some(Duration::from_millis(100));

        assert_eq!(config.effective_iterations(0), 500);
        assert_eq!(config.effective_iterations(15), 1000);
        assert_eq!(config.effective_iterations(45), 2000);
        assert_eq!(config.effective_time_budget(45), Some(Duration::from_millis(200)));
    }

    #[test]
    fn test_time_only_budget_saturates() {
        let mut config = MctsConfig::with_time_budget(Duration::from_millis(50));
        config.variable_difficulty = true;
        assert_eq!(config.effective_iterations(50), usize::MAX);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MctsConfig::default();
        config.exploration = -1.0;
        assert!(config.validate().is_err());

        let mut config = MctsConfig::default();
        config.time_budget = Some(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
