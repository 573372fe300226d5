//! Ollama client implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::base::{Auth, HttpModelBase};
use crate::config::ModelConfig;
use crate::constants::DEFAULT_OLLAMA_API_PATH;
use crate::infrastructure::model::traits::LanguageModel;
use crate::infrastructure::model::types::{CompletionRequest, ModelError};

/// Local Ollama `/api/chat` backend
#[derive(Clone)]
pub struct OllamaModel {
    base: HttpModelBase,
    api_path: String,
}

impl OllamaModel {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            base: HttpModelBase::new(config.id.clone(), config.endpoint.clone(), None),
            api_path: config
                .api_path
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_API_PATH.to_string()),
        }
    }
}

#[async_trait]
impl LanguageModel for OllamaModel {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        let url = self.base.build_url(&self.api_path);
        let payload = json!({
            "model": request.model,
            "messages": [{"role": "user", "content": request.prompt}],
            "format": "json",
            "stream": false,
        });

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            "Sending request to Ollama"
        );

        let response: OllamaResponse = self.base.post_json(&url, Auth::None, &payload).await?;
        debug!("Received response from Ollama");

        response
            .message
            .map(|m| m.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing message"))
    }
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: String,
}
