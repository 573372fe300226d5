//! OpenAI-compatible client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::{Auth, HttpModelBase};
use crate::config::ModelConfig;
use crate::constants::DEFAULT_OPENAI_API_PATH;
use crate::infrastructure::model::factory::resolve_api_key;
use crate::infrastructure::model::traits::LanguageModel;
use crate::infrastructure::model::types::{CompletionRequest, ModelError};

/// OpenAI-compatible chat completions (OpenAI, Groq, Mistral, vLLM, ...)
#[derive(Clone)]
pub struct OpenAiModel {
    base: HttpModelBase,
    api_path: String,
}

impl OpenAiModel {
    pub fn from_config(config: &ModelConfig) -> Self {
        let api_key = resolve_api_key(&config.id, config.api_key.as_deref());
        Self {
            base: HttpModelBase::new(config.id.clone(), config.endpoint.clone(), api_key),
            api_path: config
                .api_path
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_API_PATH.to_string()),
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        let url = self.base.build_url(&self.api_path);
        let payload = ChatPayload {
            model: &request.model,
            messages: vec![ChatTurn {
                role: "user",
                content: &request.prompt,
            }],
            stream: false,
        };

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: ChatResponse = self.base.post_json(&url, Auth::Bearer, &payload).await?;
        debug!("Received response from OpenAI-compatible provider");

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing content"))
    }
}

#[derive(Serialize)]
struct ChatPayload<'a> {
    model: &'a str,
    messages: Vec<ChatTurn<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatTurn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
