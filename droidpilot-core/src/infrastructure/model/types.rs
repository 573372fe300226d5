//! Planner backend request and error types

use reqwest::StatusCode;
use thiserror::Error;

/// One prompt in, one text reply out. The planner keeps no chat state on the
/// backend; the whole session history travels in `prompt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("planner backend '{provider}' has no API key configured")]
    MissingApiKey { provider: String },
    #[error("planner backend '{provider}' request failed: {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("planner backend '{provider}' sent an unusable reply: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            Self::MissingApiKey { provider }
            | Self::Network { provider, .. }
            | Self::InvalidResponse { provider, .. } => provider,
        }
    }

    pub fn user_message(&self) -> String {
        let provider = self.provider();
        match self {
            Self::MissingApiKey { .. } => format!(
                "The planner '{provider}' needs an API key. Set the variable named by model.api_key."
            ),
            Self::Network { source, .. } if source.is_connect() => {
                format!("The planner '{provider}' could not be reached.")
            }
            Self::Network { source, .. } if source.is_timeout() => {
                format!("The planner '{provider}' did not answer in time.")
            }
            Self::Network { source, .. } => match source.status() {
                Some(status) => status_message(provider, status),
                None => format!("The planner '{provider}' request failed: {source}"),
            },
            Self::InvalidResponse { reason, .. } => {
                format!("The planner '{provider}' replied with nothing usable ({reason}).")
            }
        }
    }
}

fn status_message(provider: &str, status: StatusCode) -> String {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            format!("The planner '{provider}' rejected the API key.")
        }
        StatusCode::TOO_MANY_REQUESTS => {
            format!("The planner '{provider}' is rate limiting; try again shortly.")
        }
        status if status.is_server_error() => {
            format!("The planner '{provider}' is unavailable (HTTP {}).", status.as_u16())
        }
        status => format!("The planner '{provider}' refused the request (HTTP {}).", status.as_u16()),
    }
}
