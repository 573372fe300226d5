//! Model infrastructure module
//!
//! Language-model backends used by the planner.
//!
//! # Structure
//! - `types` - Request and Error types
//! - `traits` - the [`LanguageModel`] seam
//! - `factory` - builds a backend from configuration
//! - `clients` - Gemini, OpenAI-compatible and Ollama implementations

pub mod clients;
pub mod factory;
pub mod traits;
pub mod types;

pub use factory::{build_model, resolve_api_key};
pub use traits::LanguageModel;
pub use types::{CompletionRequest, ModelError};
