use super::agent::{AgentConfig, RawAgent};
use super::device::{DeviceConfig, RawDevice};
use super::error::ConfigError;
use super::model::{ModelConfig, RawModel};
use super::tool_server::{RawToolServer, ToolServerConfig};
use crate::constants::{CONFIG_PATH, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    tool_server: Option<RawToolServer>,
    #[serde(default)]
    device: RawDevice,
    #[serde(default)]
    agent: RawAgent,
    model: Option<RawModel>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<super::AppConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    debug!(path = %config_path.display(), "Reading droidpilot configuration file");

    let content = fs::read_to_string(config_path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: config_path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, config_path)
}

pub(super) fn parse_config(content: &str, origin: &Path) -> Result<super::AppConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<super::AppConfig, ConfigError> {
    let tool_server = parsed.tool_server.ok_or(ConfigError::MissingSection {
        section: "tool_server",
    })?;
    let model = parsed
        .model
        .ok_or(ConfigError::MissingSection { section: "model" })?;

    Ok(super::AppConfig {
        tool_server: ToolServerConfig::try_from(tool_server)?,
        device: DeviceConfig::try_from(parsed.device)?,
        agent: AgentConfig::try_from(parsed.agent)?,
        model: ModelConfig::try_from(model)?,
    })
}
