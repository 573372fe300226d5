//! Builds the configured backend

use super::clients::{GeminiModel, OllamaModel, OpenAiModel};
use super::traits::LanguageModel;
use crate::config::{ModelConfig, ModelKind};
use std::env;
use std::sync::Arc;
use tracing::warn;

/// Resolve an API key from the environment variable named in configuration.
pub fn resolve_api_key(provider: &str, env_var: Option<&str>) -> Option<String> {
    let raw = env_var.map(str::trim).filter(|name| !name.is_empty())?;
    match env::var(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                provider,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

pub fn build_model(config: &ModelConfig) -> Arc<dyn LanguageModel> {
    match config.kind {
        ModelKind::Gemini => Arc::new(GeminiModel::from_config(config)),
        ModelKind::OpenAi => Arc::new(OpenAiModel::from_config(config)),
        ModelKind::Ollama => Arc::new(OllamaModel::from_config(config)),
    }
}
