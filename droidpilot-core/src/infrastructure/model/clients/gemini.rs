//! Google Gemini backend

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::base::{Auth, HttpModelBase};
use crate::config::ModelConfig;
use crate::constants::DEFAULT_GEMINI_API_PATH;
use crate::infrastructure::model::factory::resolve_api_key;
use crate::infrastructure::model::traits::LanguageModel;
use crate::infrastructure::model::types::{CompletionRequest, ModelError};

/// `POST {endpoint}/{api_path}/{model}:generateContent?key=...`
#[derive(Clone)]
pub struct GeminiModel {
    base: HttpModelBase,
    api_path: String,
}

impl GeminiModel {
    pub fn from_config(config: &ModelConfig) -> Self {
        let api_key = resolve_api_key(&config.id, config.api_key.as_deref());
        let api_path = config
            .api_path
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_API_PATH)
            .trim_matches('/')
            .to_string();
        Self {
            base: HttpModelBase::new(config.id.clone(), config.endpoint.clone(), api_key),
            api_path,
        }
    }

    fn model_url(&self, model: &str) -> String {
        self.base
            .build_url(&format!("{}/{model}:generateContent", self.api_path))
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        let url = self.model_url(&request.model);
        // Planner replies must be JSON; asking for it up front saves a parse failure.
        let payload = json!({
            "contents": [{"role": "user", "parts": [{"text": request.prompt}]}],
            "generationConfig": {"responseMimeType": "application/json"}
        });

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            "Consulting Gemini"
        );
        let reply: GenerateContentReply = self.base.post_json(&url, Auth::QueryKey, &payload).await?;

        let text = reply.into_text();
        debug!(chars = text.as_ref().map_or(0, String::len), "Gemini replied");
        text.ok_or_else(|| ModelError::invalid_response(&self.base.id, "no text part in any candidate"))
    }
}

#[derive(Deserialize)]
struct GenerateContentReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentReply {
    /// First non-blank text part across candidates, in order.
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .filter_map(|part| part.text)
            .find(|text| !text.trim().is_empty())
    }
}
