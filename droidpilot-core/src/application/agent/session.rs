use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::catalog::ToolCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    SelectingDevice,
    FetchingCatalog,
    Planning { iteration: u32 },
    Invoking { iteration: u32 },
    Completed,
    Failed { reason: String },
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed { .. })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::SelectingDevice => f.write_str("selecting device"),
            Self::FetchingCatalog => f.write_str("fetching catalog"),
            Self::Planning { iteration } => write!(f, "planning ({iteration})"),
            Self::Invoking { iteration } => write!(f, "invoking ({iteration})"),
            Self::Completed => f.write_str("completed"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// One entry of the planner-visible history, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversationTurn {
    ToolInvocation {
        tool: String,
        arguments: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Completion {
        message: String,
    },
}

/// Everything one session knows. Owned by the session task alone.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub goal: String,
    pub catalog: ToolCatalog,
    pub history: Vec<ConversationTurn>,
    /// Planner consultations so far
    pub iteration: u32,
    pub phase: Phase,
}

impl SessionState {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            catalog: ToolCatalog::default(),
            history: Vec::new(),
            iteration: 0,
            phase: Phase::Idle,
        }
    }

    pub fn record(&mut self, turn: ConversationTurn) {
        self.history.push(turn);
    }

    /// Account for one planner consultation and return its index.
    pub fn begin_consultation(&mut self) -> u32 {
        let index = self.iteration;
        self.iteration += 1;
        index
    }
}
