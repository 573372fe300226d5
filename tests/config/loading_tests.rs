// Config loading tests - AppConfig::load and validation errors
//
// Every test writes its own droidpilot.toml into a temp directory.

use droidpilot_core::config::{AppConfig, ConfigError, ModelKind};
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("droidpilot.toml");
    fs::write(&path, content).expect("Failed to write droidpilot.toml");
    path
}

fn minimal() -> &'static str {
    r#"
[tool_server]
endpoint = "http://127.0.0.1:8000/mcp/"

[model]
type = "ollama"
endpoint = "http://127.0.0.1:11434"
model = "llama3.1"
"#
}

fn load(content: &str) -> Result<AppConfig, ConfigError> {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), content);
    AppConfig::load(Some(&path))
}

#[test]
fn returns_error_when_file_not_found() {
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/droidpilot.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn minimal_config_fills_defaults() {
    let config = load(minimal()).expect("load config");

    assert_eq!(config.tool_server.endpoint, "http://127.0.0.1:8000/mcp/");
    assert_eq!(config.tool_server.connect_timeout_secs, 10);
    assert_eq!(config.tool_server.request_timeout_secs, 30);
    assert_eq!(config.device.bootstrap_tool, "mobile_use_device");
    assert_eq!(config.device.device, "emulator-5554");
    assert_eq!(config.device.device_type, "android");
    assert_eq!(config.device.discovery_tool, None);
    assert_eq!(config.agent.max_iterations, 10);
    assert!(!config.agent.legacy_heuristics);
    assert_eq!(config.model.kind, ModelKind::Ollama);
    assert_eq!(config.model.id, "ollama");
}

#[test]
fn full_config_is_read_verbatim() {
    let content = r#"
[tool_server]
endpoint = "https://tools.internal:9443/mcp"
connect_timeout_secs = 3
request_timeout_secs = 120

[device]
bootstrap_tool = "select_device"
device = "R58M123ABC"
device_type = "android"
discovery_tool = "list_available_devices"

[agent]
max_iterations = 25
legacy_heuristics = true

[model]
id = "flash"
type = "gemini"
endpoint = "https://generativelanguage.googleapis.com"
model = "gemini-1.5-flash"
api_key = "GEMINI_API_KEY"
api_path = "v1/models"
"#;
    let config = load(content).expect("load config");

    assert_eq!(config.tool_server.request_timeout_secs, 120);
    assert_eq!(config.device.bootstrap_tool, "select_device");
    assert_eq!(config.device.device, "R58M123ABC");
    assert_eq!(
        config.device.discovery_tool.as_deref(),
        Some("list_available_devices")
    );
    assert_eq!(config.agent.max_iterations, 25);
    assert!(config.agent.legacy_heuristics);
    assert_eq!(config.model.id, "flash");
    assert_eq!(config.model.kind, ModelKind::Gemini);
    assert_eq!(config.model.api_key.as_deref(), Some("GEMINI_API_KEY"));
    assert_eq!(config.model.api_path.as_deref(), Some("v1/models"));
}

#[test]
fn returns_error_when_tool_server_section_missing() {
    let content = r#"
[model]
type = "ollama"
endpoint = "http://127.0.0.1:11434"
model = "llama3.1"
"#;
    assert!(matches!(
        load(content),
        Err(ConfigError::MissingSection {
            section: "tool_server"
        })
    ));
}

#[test]
fn returns_error_when_model_section_missing() {
    let content = r#"
[tool_server]
endpoint = "http://127.0.0.1:8000/mcp/"
"#;
    assert!(matches!(
        load(content),
        Err(ConfigError::MissingSection { section: "model" })
    ));
}

#[test]
fn returns_error_for_non_http_endpoint() {
    let content = minimal().replace("http://127.0.0.1:8000/mcp/", "ws://127.0.0.1:8000/mcp/");
    match load(&content) {
        Err(ConfigError::InvalidEndpoint { section, endpoint }) => {
            assert_eq!(section, "tool_server");
            assert_eq!(endpoint, "ws://127.0.0.1:8000/mcp/");
        }
        other => panic!("expected invalid endpoint, got {other:?}"),
    }
}

#[test]
fn returns_error_for_zero_iterations() {
    let content = format!("{}\n[agent]\nmax_iterations = 0\n", minimal());
    assert!(matches!(load(&content), Err(ConfigError::ZeroIterations)));
}

#[test]
fn returns_error_for_zero_timeout() {
    let content = minimal().replace(
        "endpoint = \"http://127.0.0.1:8000/mcp/\"",
        "endpoint = \"http://127.0.0.1:8000/mcp/\"\nrequest_timeout_secs = 0",
    );
    assert!(matches!(load(&content), Err(ConfigError::ZeroTimeout)));
}

#[test]
fn returns_error_for_unknown_model_type() {
    let content = minimal().replace("type = \"ollama\"", "type = \"bard\"");
    match load(&content) {
        Err(ConfigError::UnknownModelType { kind }) => assert_eq!(kind, "bard"),
        other => panic!("expected unknown model type, got {other:?}"),
    }
}

#[test]
fn returns_error_for_blank_model_name() {
    let content = minimal().replace("model = \"llama3.1\"", "model = \"  \"");
    assert!(matches!(
        load(&content),
        Err(ConfigError::MissingField {
            section: "model",
            field: "model"
        })
    ));
}

#[test]
fn returns_parse_error_with_path() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[tool_server\nendpoint = ");
    match AppConfig::load(Some(&path)) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
#[serial]
fn endpoint_expands_environment_variables() {
    // SAFETY: serialised with the other environment-mutating tests.
    unsafe { std::env::set_var("DROIDPILOT_TEST_TOOL_HOST", "10.0.2.2") };
    let content = minimal().replace("127.0.0.1:8000", "${DROIDPILOT_TEST_TOOL_HOST}:8000");
    let config = load(&content).expect("load config");
    unsafe { std::env::remove_var("DROIDPILOT_TEST_TOOL_HOST") };

    assert_eq!(config.tool_server.endpoint, "http://10.0.2.2:8000/mcp/");
}

#[test]
fn from_toml_str_matches_file_loading() {
    let from_text = AppConfig::from_toml_str(minimal(), Path::new("inline.toml")).expect("parse");
    let from_file = load(minimal()).expect("load config");
    assert_eq!(from_text, from_file);
}
