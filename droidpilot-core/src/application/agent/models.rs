use serde_json::Value;
use uuid::Uuid;

use super::errors::SessionError;
use super::session::{ConversationTurn, Phase};
use crate::config::{AppConfig, DeviceConfig};
use crate::constants::DEFAULT_MAX_ITERATIONS;

#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub max_iterations: u32,
    pub device: DeviceConfig,
}

impl AgentOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_iterations: config.agent.max_iterations,
            device: config.device.clone(),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub(crate) fn bootstrap_arguments(&self) -> Value {
        serde_json::json!({
            "device": self.device.device,
            "deviceType": self.device.device_type,
        })
    }
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            device: DeviceConfig::default(),
        }
    }
}

/// Final state of a session, returned once its task has finished.
#[derive(Debug)]
pub struct SessionOutcome {
    pub session_id: Uuid,
    pub goal: String,
    pub phase: Phase,
    /// Planner consultations made
    pub iterations: u32,
    pub history: Vec<ConversationTurn>,
    /// Completion message, or the error that ended the session
    pub result: Result<String, SessionError>,
}

impl SessionOutcome {
    pub fn is_completed(&self) -> bool {
        self.result.is_ok()
    }

    /// Number of tool invocations recorded in the history.
    pub fn invocations(&self) -> usize {
        self.history
            .iter()
            .filter(|turn| matches!(turn, ConversationTurn::ToolInvocation { .. }))
            .count()
    }
}
