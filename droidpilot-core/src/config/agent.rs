use super::error::ConfigError;
use crate::constants::DEFAULT_MAX_ITERATIONS;
use serde::Deserialize;

/// Loop limits and parsing behaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Upper bound on planner consultations per session
    pub max_iterations: u32,
    /// Also accept `TASK_COMPLETED` replies and treat result text mentioning
    /// "error"/"failed" as tool failures.
    pub legacy_heuristics: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            legacy_heuristics: false,
        }
    }
}

impl AgentConfig {
    pub fn override_max_iterations(&mut self, max_iterations: u32) -> Result<(), ConfigError> {
        if max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        self.max_iterations = max_iterations;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct RawAgent {
    max_iterations: Option<u32>,
    legacy_heuristics: Option<bool>,
}

impl TryFrom<RawAgent> for AgentConfig {
    type Error = ConfigError;

    fn try_from(raw: RawAgent) -> Result<Self, Self::Error> {
        let max_iterations = raw.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
        if max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(Self {
            max_iterations,
            legacy_heuristics: raw.legacy_heuristics.unwrap_or(false),
        })
    }
}
