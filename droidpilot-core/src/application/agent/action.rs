use serde_json::{Map as JsonMap, Value};
use tracing::debug;

use super::extractor::extract;
use super::legacy;
use crate::rpc::{JSONRPC_VERSION, JsonRpcRequest, METHOD_TOOLS_CALL};

const COMPLETED_STATUS: &str = "completed";

/// What the planner decided to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentAction {
    /// Invoke a tool; the request already carries the session's request id.
    ToolCall { request: JsonRpcRequest },
    /// The goal is achieved.
    Completion { message: String },
    /// The reply could not be turned into either of the above.
    Unparseable { raw_text: String, reason: String },
}

impl AgentAction {
    /// Classify a raw model reply.
    ///
    /// Whatever id the model wrote is replaced with `request_id`, which is
    /// the id the tool server response must echo.
    pub fn from_reply(text: &str, request_id: u64, legacy_heuristics: bool) -> Self {
        let parsed = match extract(text) {
            Some(value) => classify(value, request_id),
            None => Err("no JSON object found in planner reply".to_string()),
        };

        match parsed {
            Ok(action) => action,
            Err(reason) if legacy_heuristics && legacy::completion_signal(text) => {
                debug!(%reason, "Falling back to legacy completion marker");
                Self::Completion {
                    message: text.trim().to_string(),
                }
            }
            Err(reason) => Self::Unparseable {
                raw_text: text.to_string(),
                reason,
            },
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completion { .. })
    }
}

fn classify(value: Value, request_id: u64) -> Result<AgentAction, String> {
    let Value::Object(map) = value else {
        return Err("planner reply is not a JSON object".to_string());
    };

    if let Some(status) = map.get("status") {
        return completion(status, &map);
    }
    if map.contains_key("method") {
        return tool_call(&map, request_id);
    }
    Err("reply matches neither the tool-call nor the completion form".to_string())
}

fn completion(status: &Value, map: &JsonMap<String, Value>) -> Result<AgentAction, String> {
    let status = status
        .as_str()
        .ok_or_else(|| "completion status must be a string".to_string())?;
    if !status.eq_ignore_ascii_case(COMPLETED_STATUS) {
        return Err(format!("unknown status value: {status}"));
    }
    let message = map
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| "completion marker missing message field".to_string())?;
    Ok(AgentAction::Completion {
        message: message.to_string(),
    })
}

fn tool_call(map: &JsonMap<String, Value>, request_id: u64) -> Result<AgentAction, String> {
    if let Some(version) = map.get("jsonrpc") {
        if version.as_str() != Some(JSONRPC_VERSION) {
            return Err(format!("unsupported jsonrpc version: {version}"));
        }
    }

    let method = map.get("method").and_then(Value::as_str).unwrap_or_default();
    if method != METHOD_TOOLS_CALL {
        return Err(format!("planner may only issue {METHOD_TOOLS_CALL}, got '{method}'"));
    }

    let params = map
        .get("params")
        .and_then(Value::as_object)
        .ok_or_else(|| "tools/call request missing params object".to_string())?;
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| "tools/call request missing tool name".to_string())?;
    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => Value::Null,
        Some(args @ Value::Object(_)) => args.clone(),
        Some(other) => return Err(format!("tool arguments must be an object, got {other}")),
    };

    if let Some(model_id) = map.get("id") {
        if model_id.as_u64() != Some(request_id) {
            debug!(%model_id, request_id, "Replacing planner-supplied request id");
        }
    }

    Ok(AgentAction::ToolCall {
        request: JsonRpcRequest::call_tool(request_id, name, arguments),
    })
}
