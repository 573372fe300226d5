//! Shared HTTP plumbing for model clients

use crate::infrastructure::model::types::ModelError;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// How a backend expects its API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// `Authorization: Bearer <key>` (OpenAI-compatible APIs)
    Bearer,
    /// `?key=<key>` query parameter (Gemini)
    QueryKey,
    /// Local services such as Ollama
    None,
}

#[derive(Clone)]
pub struct HttpModelBase {
    pub id: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub http: Client,
}

impl HttpModelBase {
    pub fn new(id: String, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            id,
            endpoint,
            api_key,
            http: Client::new(),
        }
    }

    /// Join the endpoint and a path with exactly one slash.
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    pub async fn post_json<Req, Res>(&self, url: &str, auth: Auth, body: &Req) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let builder = match auth {
            Auth::Bearer => {
                let key = self.require_api_key()?;
                self.http.post(url).bearer_auth(key)
            }
            Auth::QueryKey => {
                let key = self.require_api_key()?;
                self.http.post(url).query(&[("key", key)])
            }
            Auth::None => self.http.post(url),
        };

        builder
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?
            .error_for_status()
            .map_err(|e| ModelError::network(&self.id, e))?
            .json()
            .await
            .map_err(|e| ModelError::network(&self.id, e))
    }

    fn require_api_key(&self) -> Result<&str, ModelError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ModelError::missing_api_key(&self.id))
    }
}
