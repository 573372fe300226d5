use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolInvokeError {
    #[error("tool server transport error: {message}")]
    Transport { message: String },
    #[error("tool server returned JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("tool reported failure: {message}")]
    ToolFailure { message: String },
    #[error("response id {actual} does not match request id {expected}")]
    IdMismatch { expected: u64, actual: String },
    #[error("response to request {id} carries neither result nor error")]
    MissingResult { id: u64 },
}

impl ToolInvokeError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { message } => format!("Could not reach the tool server: {message}"),
            Self::Rpc { code, message } => format!("Tool server error {code}: {message}"),
            Self::ToolFailure { message } => format!("Tool failed: {message}"),
            Self::IdMismatch { expected, actual } => format!(
                "Tool server answered request {actual} while waiting for request {expected}."
            ),
            Self::MissingResult { id } => {
                format!("Tool server response to request {id} was empty.")
            }
        }
    }
}
