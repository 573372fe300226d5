//! Model traits

use super::types::{CompletionRequest, ModelError};
use async_trait::async_trait;

/// A backend that turns one prompt into one text completion.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Identifier used in logs and error messages
    fn id(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError>;
}
