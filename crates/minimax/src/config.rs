//! Minimax search parameters.

use std::time::Duration;

use uttt_core::{Result, UtttError};

use crate::heuristics::HeuristicKind;

/// Minimax configuration parameters.
#[derive(Clone, Debug)]
pub struct MinimaxConfig {
    /// Wall-clock budget per move. Iterative deepening stops when it runs out.
    pub time_budget: Option<Duration>,

    /// Deepest iteration to run. Depth 0 scores each move with one
    /// heuristic call; each extra level adds one ply.
    pub max_depth: Option<usize>,

    pub heuristic: HeuristicKind,

    /// Nodes between deadline checks.
    pub check_interval: u64,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            time_budget: Some(Duration::from_secs(1)),
            max_depth: None,
            heuristic: HeuristicKind::default(),
            check_interval: 256,
        }
    }
}

impl MinimaxConfig {
    /// Deepen until `budget` runs out.
    pub fn with_time_budget(budget: Duration) -> Self {
        Self {
            time_budget: Some(budget),
            ..Default::default()
        }
    }

    /// Search to exactly `depth` with no clock.
    pub fn with_depth(depth: usize) -> Self {
        Self {
            time_budget: None,
            max_depth: Some(depth),
            ..Default::default()
        }
    }

    /// Check that the search is bounded.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if neither a time budget nor a depth limit
    /// is set, if the time budget is zero, or if `check_interval` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.time_budget.is_none() && self.max_depth.is_none() {
            return Err(UtttError::InvalidConfig(
                "minimax needs a time budget or a depth limit".to_string(),
            ));
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(UtttError::InvalidConfig(
                "time budget must be positive".to_string(),
            ));
        }
        if self.check_interval == 0 {
            return Err(UtttError::InvalidConfig(
                "check interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MinimaxConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.heuristic, HeuristicKind::Positional);
    }

    #[test]
    fn test_with_depth_has_no_clock() {
        let config = MinimaxConfig::with_depth(3);
        assert_eq!(config.max_depth, Some(3));
        assert!(config.time_budget.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unbounded_search_rejected() {
        let mut config = MinimaxConfig::with_depth(3);
        config.max_depth = None;
        assert!(config.validate().is_err());

        let config = MinimaxConfig::with_time_budget(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
