use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use super::error::ToolInvokeError;
use super::interface::ToolInvoker;
use crate::config::ToolServerConfig;
use crate::rpc::{JsonRpcRequest, JsonRpcResponse};

const BODY_PREVIEW_LIMIT: usize = 200;

/// Posts each request to the tool server's single JSON-RPC endpoint.
#[derive(Clone)]
pub struct HttpToolInvoker {
    endpoint: String,
    http: Client,
}

impl HttpToolInvoker {
    pub fn from_config(config: &ToolServerConfig) -> Result<Self, ToolInvokeError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|source| ToolInvokeError::transport(source.to_string()))?;
        Ok(Self::with_client(config.endpoint.clone(), http))
    }

    pub fn with_client(endpoint: impl Into<String>, http: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn round_trip(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, ToolInvokeError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|source| ToolInvokeError::transport(source.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ToolInvokeError::transport(source.to_string()))?;

        classify_body(status, &body)
    }
}

/// A JSON-RPC reply is accepted whatever the HTTP status; anything else is a
/// transport failure, reported with the status when it is not a success.
fn classify_body(status: StatusCode, body: &str) -> Result<JsonRpcResponse, ToolInvokeError> {
    match serde_json::from_str::<JsonRpcResponse>(body) {
        Ok(parsed) if parsed.is_envelope() => Ok(parsed),
        _ if !status.is_success() => Err(ToolInvokeError::transport(format!(
            "HTTP {}: {}",
            status.as_u16(),
            preview(body)
        ))),
        Ok(_) => Err(ToolInvokeError::transport(format!(
            "body carries no JSON-RPC result, error or id: {}",
            preview(body)
        ))),
        Err(source) => Err(ToolInvokeError::transport(format!(
            "invalid JSON-RPC body ({source}): {}",
            preview(body)
        ))),
    }
}

#[async_trait]
impl ToolInvoker for HttpToolInvoker {
    async fn invoke(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id;
        debug!(
            id,
            method = request.method.as_str(),
            tool = request.tool_name(),
            endpoint = self.endpoint.as_str(),
            "Sending JSON-RPC request to tool server"
        );
        match self.round_trip(&request).await {
            Ok(response) => {
                debug!(id, has_error = response.error.is_some(), "Tool server responded");
                response
            }
            Err(err) => {
                warn!(id, %err, "Tool server round trip failed");
                let message = match err {
                    ToolInvokeError::Transport { message } => message,
                    other => other.to_string(),
                };
                JsonRpcResponse::transport_failure(id, message)
            }
        }
    }
}

fn preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    if trimmed.chars().count() <= BODY_PREVIEW_LIMIT {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    format!("{cut}...")
}
