//! # droidpilot-core
//!
//! Drives a JSON-RPC device-control tool server towards a natural-language
//! goal, using a language model as the planner that picks the next tool call.
//!
//! - [`application::agent`] - the bounded plan → invoke → record loop
//! - [`infrastructure::rpc`] - JSON-RPC records and request ids
//! - [`infrastructure::tooling`] - the tool server transport
//! - [`infrastructure::model`] - language-model backends
//! - [`config`] - TOML configuration

pub mod application;
pub mod config;
pub mod constants;
pub mod infrastructure;

pub use application::agent;
pub use config::{AppConfig, ConfigError};
pub use infrastructure::{model, rpc, tooling};

use agent::{AgentLoopController, AgentOptions, Planner};
use std::sync::Arc;
use tooling::{HttpToolInvoker, ToolInvokeError};
use tracing::debug;

/// Wire a controller from a loaded configuration: HTTP tool server transport,
/// the configured model backend and the loop options.
pub fn build_controller(config: &AppConfig) -> Result<AgentLoopController, ToolInvokeError> {
    let invoker = HttpToolInvoker::from_config(&config.tool_server)?;
    let model = model::build_model(&config.model);
    debug!(
        endpoint = config.tool_server.endpoint.as_str(),
        model = config.model.model.as_str(),
        "Assembling agent loop controller"
    );
    let planner = Planner::new(
        model,
        config.model.model.clone(),
        config.agent.legacy_heuristics,
    );
    Ok(AgentLoopController::new(
        planner,
        Arc::new(invoker),
        AgentOptions::from_config(config),
    ))
}
