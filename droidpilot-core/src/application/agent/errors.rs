use thiserror::Error;

use crate::model::ModelError;
use crate::tooling::ToolInvokeError;

/// Why a goal was refused before any session started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("goal must not be blank")]
    InvalidGoal,
    #[error("a session is already running")]
    SessionActive,
}

impl StartError {
    pub fn user_message(&self) -> String {
        match self {
            StartError::InvalidGoal => "Please describe what the agent should do.".to_string(),
            StartError::SessionActive => {
                "The agent is still working on the previous goal.".to_string()
            }
        }
    }
}

/// Terminal failure of a session. Every variant keeps the offending text.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("transport error calling '{tool}': {message}")]
    Transport { tool: String, message: String },
    #[error("tool '{tool}' failed: {message}")]
    Tool { tool: String, message: String },
    #[error("response for '{tool}' is not correlated with its request: {message}")]
    Correlation { tool: String, message: String },
    #[error("planner produced no actionable JSON ({reason}): {raw_text}")]
    PlannerParse { reason: String, raw_text: String },
    #[error("iteration limit reached ({limit} planner consultations)")]
    IterationLimitExceeded { limit: u32 },
    #[error("tool server returned an empty catalog: {raw}")]
    EmptyCatalog { raw: String },
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("session cancelled")]
    Cancelled,
    #[error("session task stopped unexpectedly: {0}")]
    Aborted(String),
}

impl SessionError {
    pub(crate) fn from_invocation(tool: &str, error: ToolInvokeError) -> Self {
        let tool = tool.to_string();
        match error {
            ToolInvokeError::Transport { message } => Self::Transport { tool, message },
            err @ ToolInvokeError::IdMismatch { .. } => Self::Correlation {
                tool,
                message: err.to_string(),
            },
            other => Self::Tool {
                tool,
                message: other.to_string(),
            },
        }
    }

    /// Short reason stored in [`super::Phase::Failed`].
    pub fn reason(&self) -> String {
        match self {
            Self::Transport { .. } => "tool server unreachable".to_string(),
            Self::Tool { tool, .. } => format!("tool '{tool}' failed"),
            Self::Correlation { .. } => "response id mismatch".to_string(),
            Self::PlannerParse { .. } => "planner produced no actionable JSON".to_string(),
            Self::IterationLimitExceeded { .. } => "iteration limit reached".to_string(),
            Self::EmptyCatalog { .. } => "empty tool catalog".to_string(),
            Self::Model(_) => "planner model unavailable".to_string(),
            Self::Cancelled => "cancelled".to_string(),
            Self::Aborted(_) => "aborted".to_string(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Model(err) => err.user_message(),
            Self::Cancelled => "The session was cancelled.".to_string(),
            other => other.to_string(),
        }
    }
}
