//! Application constants
//!
//! Single source of truth for paths and protocol defaults.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/droidpilot.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Default tool server endpoint (host loopback as seen from the Android emulator)
pub const DEFAULT_TOOL_SERVER_ENDPOINT: &str = "http://10.0.2.2:8000/mcp/";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Tool that binds the tool server to a device before planning starts
pub const DEFAULT_BOOTSTRAP_TOOL: &str = "mobile_use_device";
pub const DEFAULT_DEVICE_ID: &str = "emulator-5554";
pub const DEFAULT_DEVICE_TYPE: &str = "android";

pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";
pub const DEFAULT_OPENAI_API_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_OLLAMA_API_PATH: &str = "/api/chat";
