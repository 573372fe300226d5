use super::error::ConfigError;
use crate::constants::{DEFAULT_BOOTSTRAP_TOOL, DEFAULT_DEVICE_ID, DEFAULT_DEVICE_TYPE};
use serde::Deserialize;

/// Device the tool server should drive, selected before planning starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Tool that binds the server to `device`
    pub bootstrap_tool: String,
    pub device: String,
    pub device_type: String,
    /// Optional tool called first to enumerate devices (e.g. `list_available_devices`)
    pub discovery_tool: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            bootstrap_tool: DEFAULT_BOOTSTRAP_TOOL.to_string(),
            device: DEFAULT_DEVICE_ID.to_string(),
            device_type: DEFAULT_DEVICE_TYPE.to_string(),
            discovery_tool: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct RawDevice {
    bootstrap_tool: Option<String>,
    device: Option<String>,
    device_type: Option<String>,
    discovery_tool: Option<String>,
}

impl TryFrom<RawDevice> for DeviceConfig {
    type Error = ConfigError;

    fn try_from(raw: RawDevice) -> Result<Self, Self::Error> {
        let defaults = DeviceConfig::default();
        let bootstrap_tool = raw.bootstrap_tool.unwrap_or(defaults.bootstrap_tool);
        if bootstrap_tool.trim().is_empty() {
            return Err(ConfigError::MissingField {
                section: "device",
                field: "bootstrap_tool",
            });
        }

        Ok(Self {
            bootstrap_tool,
            device: raw.device.unwrap_or(defaults.device),
            device_type: raw.device_type.unwrap_or(defaults.device_type),
            discovery_tool: raw.discovery_tool.filter(|tool| !tool.trim().is_empty()),
        })
    }
}
