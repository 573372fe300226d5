//! Language-model client implementations

mod base;
mod gemini;
mod ollama;
mod openai;

pub use base::{Auth, HttpModelBase};
pub use gemini::GeminiModel;
pub use ollama::OllamaModel;
pub use openai::OpenAiModel;
