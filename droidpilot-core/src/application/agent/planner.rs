use std::sync::Arc;
use tracing::{debug, info};

use super::action::AgentAction;
use super::catalog::ToolCatalog;
use super::instructions::compose_prompt;
use super::session::ConversationTurn;
use crate::model::{CompletionRequest, LanguageModel, ModelError};

/// Asks the language model for the next step.
#[derive(Clone)]
pub struct Planner {
    model: Arc<dyn LanguageModel>,
    model_name: String,
    legacy_heuristics: bool,
}

impl Planner {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        model_name: impl Into<String>,
        legacy_heuristics: bool,
    ) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            legacy_heuristics,
        }
    }

    pub(crate) fn legacy_heuristics(&self) -> bool {
        self.legacy_heuristics
    }

    /// Only a failing model call is an error; a reply that cannot be used
    /// comes back as [`AgentAction::Unparseable`].
    pub async fn plan(
        &self,
        goal: &str,
        catalog: &ToolCatalog,
        history: &[ConversationTurn],
        request_id: u64,
    ) -> Result<AgentAction, ModelError> {
        let prompt = compose_prompt(goal, catalog, history, request_id);
        debug!(
            provider = self.model.id(),
            request_id,
            history = history.len(),
            prompt_chars = prompt.len(),
            "Consulting planner"
        );

        let reply = self
            .model
            .complete(CompletionRequest {
                model: self.model_name.clone(),
                prompt,
            })
            .await?;

        let action = AgentAction::from_reply(&reply, request_id, self.legacy_heuristics);
        match &action {
            AgentAction::ToolCall { request } => {
                info!(request_id, tool = request.tool_name(), "Planner chose a tool call")
            }
            AgentAction::Completion { .. } => info!(request_id, "Planner declared the goal complete"),
            AgentAction::Unparseable { reason, .. } => {
                info!(request_id, %reason, "Planner reply was not actionable")
            }
        }
        Ok(action)
    }
}
