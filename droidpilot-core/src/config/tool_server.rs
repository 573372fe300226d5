use super::error::ConfigError;
use crate::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use serde::Deserialize;

/// Where the JSON-RPC tool server listens and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolServerConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawToolServer {
    endpoint: Option<String>,
    #[serde(default)]
    connect_timeout_secs: Option<u64>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

impl TryFrom<RawToolServer> for ToolServerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawToolServer) -> Result<Self, Self::Error> {
        let endpoint = raw
            .endpoint
            .map(|value| expand(&value))
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingField {
                section: "tool_server",
                field: "endpoint",
            })?;
        if !is_http_url(&endpoint) {
            return Err(ConfigError::InvalidEndpoint {
                section: "tool_server",
                endpoint,
            });
        }

        let connect_timeout_secs = raw
            .connect_timeout_secs
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
        let request_timeout_secs = raw
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if connect_timeout_secs == 0 || request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            endpoint,
            connect_timeout_secs,
            request_timeout_secs,
        })
    }
}

impl ToolServerConfig {
    /// Replace the endpoint, applying the same expansion and scheme check as
    /// the configuration file.
    pub fn override_endpoint(&mut self, endpoint: &str) -> Result<(), ConfigError> {
        let expanded = expand(endpoint);
        if expanded.trim().is_empty() {
            return Err(ConfigError::MissingField {
                section: "tool_server",
                field: "endpoint",
            });
        }
        if !is_http_url(&expanded) {
            return Err(ConfigError::InvalidEndpoint {
                section: "tool_server",
                endpoint: expanded,
            });
        }
        self.endpoint = expanded;
        Ok(())
    }
}

/// Expand `$VAR`, `${VAR}` and `~` the way a shell would; leave the text
/// untouched when a variable is missing.
pub(crate) fn expand(value: &str) -> String {
    shellexpand::full(value)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

pub(crate) fn is_http_url(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
