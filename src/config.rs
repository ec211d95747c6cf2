//! Search configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// When the search may stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Stop when the goal is extracted from the frontier. Always optimal
    /// with an admissible heuristic.
    #[default]
    OnExtraction,
    /// Stop as soon as the goal is first queued. Expands fewer nodes but
    /// may return a costlier path.
    OnDiscovery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Numerator of the step cost `base_unit / speed`
    pub base_unit: u32,
    /// Step cost for zero-speed terrain; `None` makes it impassable
    pub zero_speed_penalty: Option<u32>,
    /// Initial frontier capacity
    pub initial_capacity: usize,
    pub termination: Termination,
    /// Maximum number of nodes to expand before giving up
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_unit: 360,
            zero_speed_penalty: Some(1000),
            initial_capacity: 50,
            termination: Termination::OnExtraction,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_unit == 0 {
            return Err(ConfigError::Invalid("base_unit must be positive".to_string()));
        }
        if self.initial_capacity == 0 {
            return Err(ConfigError::Invalid(
                "initial_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_zero_speed_penalty(mut self, penalty: Option<u32>) -> Self {
        self.zero_speed_penalty = penalty;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Cost of entering a cell at `speed`, or `None` if it cannot be entered.
    pub fn step_cost(&self, speed: u32) -> Option<u32> {
        if speed > 0 {
            Some(self.base_unit / speed)
        } else {
            self.zero_speed_penalty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.base_unit, 360);
        assert_eq!(config.zero_speed_penalty, Some(1000));
        assert_eq!(config.termination, Termination::OnExtraction);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_step_cost() {
        let config = SearchConfig::default();
        assert_eq!(config.step_cost(360), Some(1));
        assert_eq!(config.step_cost(90), Some(4));
        assert_eq!(config.step_cost(0), Some(1000));

        let strict = config.with_zero_speed_penalty(None);
        assert_eq!(strict.step_cost(0), None);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            SearchConfig::from_json(r#"{ "base_unit": 720, "termination": "on_discovery" }"#)
                .unwrap();
        assert_eq!(config.base_unit, 720);
        assert_eq!(config.termination, Termination::OnDiscovery);
        assert_eq!(config.initial_capacity, 50);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            SearchConfig::from_json(r#"{ "base_unit": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SearchConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
