use serde_json::json;

use super::catalog::ToolCatalog;
use super::session::ConversationTurn;

/// Build the single prompt sent to the model for one planning step.
pub(crate) fn compose_prompt(
    goal: &str,
    catalog: &ToolCatalog,
    history: &[ConversationTurn],
    request_id: u64,
) -> String {
    let tool_call_example = json!({
        "jsonrpc": "2.0",
        "id": request_id,
        "method": "tools/call",
        "params": {"name": "tool_name", "arguments": {}}
    });
    let completion_example = json!({"status": "completed", "message": "short summary for the user"});
    let catalog_json = serde_json::to_string(catalog).unwrap_or_else(|_| "[]".to_string());
    let history_json = serde_json::to_string(history).unwrap_or_else(|_| "[]".to_string());

    let lines = [
        "You are the planner of an agent that operates a mobile device through remote tools.".to_string(),
        format!("User goal: {goal}"),
        format!("Available tools: {catalog_json}"),
        format!("Steps taken so far, oldest first: {history_json}"),
        "Decide the single next step towards the goal.".to_string(),
        "Respond with exactly one JSON object and nothing else: no commentary, no code fences.".to_string(),
        format!("To call a tool respond with: {tool_call_example}"),
        format!("Use id {request_id}, one of the tool names listed above, and arguments matching its input schema."),
        format!("When the goal is achieved respond with: {completion_example}"),
    ];
    lines.join("\n")
}
