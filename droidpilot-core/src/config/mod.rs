pub mod agent;
pub mod app;
pub mod device;
pub mod error;
pub mod loader;
pub mod model;
pub mod tool_server;

pub use crate::constants::CONFIG_PATH;
pub use agent::AgentConfig;
pub use app::AppConfig;
pub use device::DeviceConfig;
pub use error::ConfigError;
pub use model::{ModelConfig, ModelKind};
pub use tool_server::ToolServerConfig;
