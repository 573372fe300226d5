use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map as JsonMap, Value};

pub const JSONRPC_VERSION: &str = "2.0";
pub const METHOD_TOOLS_LIST: &str = "tools/list";
pub const METHOD_TOOLS_CALL: &str = "tools/call";

/// Code used when the tool server reports an error without a JSON-RPC code,
/// e.g. `{"error": "device not found"}`.
pub const TOOL_ERROR_CODE: i64 = -32000;

/// Code reserved for failures synthesized on the client side of the transport.
pub const TRANSPORT_ERROR_CODE: i64 = -32099;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    #[serde(default = "empty_object")]
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }

    pub fn list_tools(id: u64) -> Self {
        Self::new(id, METHOD_TOOLS_LIST, empty_object())
    }

    pub fn call_tool(id: u64, name: &str, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Null => empty_object(),
            other => other,
        };
        let mut params = JsonMap::new();
        params.insert("name".to_string(), Value::String(name.to_string()));
        params.insert("arguments".to_string(), arguments);
        Self::new(id, METHOD_TOOLS_CALL, Value::Object(params))
    }

    /// Tool name of a `tools/call` request.
    pub fn tool_name(&self) -> Option<&str> {
        if self.method != METHOD_TOOLS_CALL {
            return None;
        }
        self.params.get("name").and_then(Value::as_str)
    }

    pub fn arguments(&self) -> Value {
        self.params
            .get("arguments")
            .cloned()
            .unwrap_or_else(empty_object)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: TRANSPORT_ERROR_CODE,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.code == TRANSPORT_ERROR_CODE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_error"
    )]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            jsonrpc: default_version(),
            id: Some(Value::from(id)),
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: u64, error: RpcError) -> Self {
        Self {
            jsonrpc: default_version(),
            id: Some(Value::from(id)),
            result: None,
            error: Some(error),
        }
    }

    /// Response standing in for a request that never reached the tool server.
    pub fn transport_failure(id: u64, message: impl Into<String>) -> Self {
        Self::failure(id, RpcError::transport(message))
    }

    /// Numeric id, accepting servers that echo ids back as strings.
    pub fn numeric_id(&self) -> Option<u64> {
        match self.id.as_ref()? {
            Value::Number(number) => number.as_u64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Carries at least one JSON-RPC member. Arbitrary JSON objects (an HTTP
    /// error page such as `{"detail":"Not Found"}`) parse as responses with
    /// every field defaulted, so this separates them from real replies.
    pub fn is_envelope(&self) -> bool {
        self.result.is_some()
            || self.error.is_some()
            || self.id.as_ref().is_some_and(|id| !id.is_null())
    }

    pub fn is_transport_failure(&self) -> bool {
        self.error.as_ref().is_some_and(RpcError::is_transport)
    }
}

/// Tool servers are not consistent about the error shape: accept the JSON-RPC
/// object, a bare string, or anything else (kept verbatim in `data`).
#[derive(Deserialize)]
#[serde(untagged)]
enum WireError {
    Structured(RpcError),
    Message(String),
    Other(Value),
}

fn deserialize_error<'de, D>(deserializer: D) -> Result<Option<RpcError>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<WireError>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(WireError::Structured(error)) => Some(error),
        Some(WireError::Message(message)) => Some(RpcError {
            code: TOOL_ERROR_CODE,
            message,
            data: None,
        }),
        Some(WireError::Other(value)) => Some(RpcError {
            code: TOOL_ERROR_CODE,
            message: value.to_string(),
            data: Some(value),
        }),
    })
}

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

fn empty_object() -> Value {
    Value::Object(JsonMap::new())
}
