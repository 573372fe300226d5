//! # Model Configuration
//!
//! | Type | Description | API Key Required |
//! |------|-------------|-----------------|
//! | `gemini` | Google Gemini API | Yes |
//! | `openai` | OpenAI-compatible APIs | Yes |
//! | `ollama` | Local Ollama server | No |

use super::error::ConfigError;
use super::tool_server::{expand, is_http_url};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Gemini,
    OpenAi,
    Ollama,
}

impl FromStr for ModelKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" | "google-ai" => Ok(Self::Gemini),
            "openai" | "openai-compatible" => Ok(Self::OpenAi),
            "ollama" | "localai" => Ok(Self::Ollama),
            _ => Err(ConfigError::UnknownModelType {
                kind: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        };
        f.write_str(name)
    }
}

/// The language model used as planner.
///
/// ```toml
/// [model]
/// type = "gemini"
/// endpoint = "https://generativelanguage.googleapis.com"
/// model = "gemini-1.5-flash"
/// api_key = "GEMINI_API_KEY"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Name used in logs; defaults to the type
    pub id: String,
    pub kind: ModelKind,
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the key
    pub api_key: Option<String>,
    /// Custom API path override (e.g. "v1beta/models" for Gemini)
    pub api_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawModel {
    id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    endpoint: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
    #[serde(default)]
    api_path: Option<String>,
}

impl TryFrom<RawModel> for ModelConfig {
    type Error = ConfigError;

    fn try_from(raw: RawModel) -> Result<Self, Self::Error> {
        let kind: ModelKind = raw
            .kind
            .ok_or(ConfigError::MissingField {
                section: "model",
                field: "type",
            })?
            .parse()?;
        let endpoint = raw
            .endpoint
            .map(|value| expand(&value))
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingField {
                section: "model",
                field: "endpoint",
            })?;
        if !is_http_url(&endpoint) {
            return Err(ConfigError::InvalidEndpoint {
                section: "model",
                endpoint,
            });
        }
        let model = raw
            .model
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingField {
                section: "model",
                field: "model",
            })?;

        Ok(Self {
            id: raw.id.unwrap_or_else(|| kind.to_string()),
            kind,
            endpoint,
            model,
            api_key: raw.api_key,
            api_path: raw.api_path,
        })
    }
}
