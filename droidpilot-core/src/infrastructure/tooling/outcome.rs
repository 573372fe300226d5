use serde_json::Value;

use super::error::ToolInvokeError;
use crate::rpc::JsonRpcResponse;

/// Turn a response into the tool output, or the reason the call failed.
///
/// Checks, in order: transport failure, JSON-RPC `error`, id correlation with
/// `expected_id`, presence of `result`, and MCP's `isError` flag.
pub fn resolve_response(
    expected_id: u64,
    response: JsonRpcResponse,
) -> Result<Value, ToolInvokeError> {
    if let Some(error) = response.error {
        if error.is_transport() {
            return Err(ToolInvokeError::Transport {
                message: error.message,
            });
        }
        return Err(ToolInvokeError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    match response.numeric_id() {
        Some(id) if id == expected_id => {}
        _ => {
            let actual = response
                .id
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_else(|| "null".to_string());
            return Err(ToolInvokeError::IdMismatch {
                expected: expected_id,
                actual,
            });
        }
    }

    let result = response
        .result
        .ok_or(ToolInvokeError::MissingResult { id: expected_id })?;

    let flagged = result
        .get("isError")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if flagged {
        return Err(ToolInvokeError::ToolFailure {
            message: render_tool_output(&result),
        });
    }

    Ok(result)
}

/// Display text for a tool result: the first non-empty MCP text block, a
/// structured error message, a plain string result, or the JSON itself.
pub fn render_tool_output(result: &Value) -> String {
    if let Some(text) = result.as_str() {
        return text.trim().to_string();
    }

    if let Some(blocks) = result.get("content").and_then(Value::as_array) {
        let text = blocks
            .iter()
            .filter(|block| {
                block
                    .get("type")
                    .and_then(Value::as_str)
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("text"))
            })
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .map(str::trim)
            .find(|text| !text.is_empty());
        if let Some(text) = text {
            return text.to_string();
        }
    }

    if let Some(message) = result
        .get("structuredContent")
        .and_then(|content| content.get("error"))
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
    {
        let trimmed = message.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    result.to_string()
}
