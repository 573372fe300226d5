use super::agent::AgentConfig;
use super::device::DeviceConfig;
use super::error::ConfigError;
use super::model::ModelConfig;
use super::tool_server::ToolServerConfig;
use std::path::Path;

/// Application configuration loaded from droidpilot.toml
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub tool_server: ToolServerConfig,
    pub device: DeviceConfig,
    pub agent: AgentConfig,
    pub model: ModelConfig,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse configuration from TOML text; `origin` is only used in errors.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        super::loader::parse_config(content, origin)
    }
}
