use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing required section [{section}] in configuration")]
    MissingSection { section: &'static str },

    #[error("[{section}] is missing required field '{field}'")]
    MissingField {
        section: &'static str,
        field: &'static str,
    },

    #[error("[{section}] endpoint '{endpoint}' must start with http:// or https://")]
    InvalidEndpoint {
        section: &'static str,
        endpoint: String,
    },

    #[error("unknown model type '{kind}' (expected gemini, openai or ollama)")]
    UnknownModelType { kind: String },

    #[error("agent.max_iterations must be at least 1")]
    ZeroIterations,

    #[error("timeouts in [tool_server] must be greater than zero")]
    ZeroTimeout,
}
