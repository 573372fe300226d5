use clap::Parser;
use droidpilot_core::agent::{ConversationTurn, SessionOutcome};
use droidpilot_core::{AppConfig, ConfigError, build_controller};
use serde_json::json;
use std::error::Error;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::console::ConsoleObserver;

#[derive(Parser, Debug)]
#[command(
    name = "droidpilot",
    version,
    about = "Drive an Android device toward a goal with a language model and an MCP tool server"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override agent.max_iterations
    #[arg(long)]
    max_iterations: Option<u32>,
    /// Override device.device (e.g. emulator-5554)
    #[arg(long)]
    device: Option<String>,
    /// Override tool_server.endpoint
    #[arg(long)]
    endpoint: Option<String>,
    /// Print the outcome as JSON instead of plain text
    #[arg(long)]
    json: bool,
    /// Goal in natural language; read from stdin when omitted
    goal: Vec<String>,
}

pub async fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    init_tracing(cli.json);
    debug!(config = ?cli.config, max_iterations = ?cli.max_iterations, "CLI arguments parsed");

    let mut config = AppConfig::load(cli.config.as_deref())?;
    apply_overrides(&cli, &mut config)?;
    info!(
        endpoint = %config.tool_server.endpoint,
        model = %config.model.model,
        provider = %config.model.kind,
        "Configuration loaded"
    );

    let goal = load_goal(&cli)?;
    let controller = build_controller(&config)?;
    let handle = controller.start(goal).map_err(|err| err.user_message())?;

    let token = handle.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling session");
            token.cancel();
        }
    });

    let mut observer = ConsoleObserver::new(!cli.json);
    let outcome = handle.drive(&mut observer).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome_json(&outcome))?);
    }
    info!(session = %outcome.session_id, phase = %outcome.phase, "Session finished");

    Ok(if outcome.is_completed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn apply_overrides(cli: &Cli, config: &mut AppConfig) -> Result<(), ConfigError> {
    if let Some(max_iterations) = cli.max_iterations {
        config.agent.override_max_iterations(max_iterations)?;
    }
    if let Some(device) = &cli.device {
        config.device.device = device.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.tool_server.override_endpoint(endpoint)?;
    }
    Ok(())
}

fn load_goal(cli: &Cli) -> Result<String, Box<dyn Error>> {
    if !cli.goal.is_empty() {
        return Ok(cli.goal.join(" ").trim().to_string());
    }

    if !io::stdin().is_terminal() {
        info!("Reading goal from standard input");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer.trim().to_string());
    }

    Err("goal required via arguments or stdin".into())
}

fn outcome_json(outcome: &SessionOutcome) -> serde_json::Value {
    let (message, error) = match &outcome.result {
        Ok(message) => (Some(message.clone()), None),
        Err(err) => (None, Some(err.to_string())),
    };
    let steps: Vec<_> = outcome
        .history
        .iter()
        .filter_map(|turn| match turn {
            ConversationTurn::ToolInvocation { tool, error, .. } => Some(json!({
                "tool": tool,
                "ok": error.is_none(),
            })),
            ConversationTurn::Completion { .. } => None,
        })
        .collect();

    json!({
        "session_id": outcome.session_id.to_string(),
        "goal": outcome.goal,
        "phase": outcome.phase,
        "iterations": outcome.iterations,
        "message": message,
        "error": error,
        "tool_steps": steps,
    })
}

fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
