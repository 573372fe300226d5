use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// One tool offered by the tool server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema", skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: None,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let name = value.get("name").and_then(Value::as_str)?.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            description: value
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            input_schema: value
                .get("inputSchema")
                .or_else(|| value.get("input_schema"))
                .cloned(),
        })
    }
}

/// Tools available for one session. Names are unique; fetched once and
/// never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(tools.len());
        for tool in tools {
            if seen.insert(tool.name.clone()) {
                unique.push(tool);
            } else {
                warn!(tool = tool.name.as_str(), "Ignoring duplicate tool in catalog");
            }
        }
        Self { tools: unique }
    }

    /// Build from a `tools/list` result: `{"tools": [...]}` or a bare array.
    /// Entries without a name are skipped.
    pub fn from_list_result(result: &Value) -> Self {
        let entries = result
            .get("tools")
            .and_then(Value::as_array)
            .or_else(|| result.as_array());
        let tools = entries
            .map(|entries| entries.iter().filter_map(ToolDescriptor::from_value).collect())
            .unwrap_or_default();
        Self::new(tools)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }
}
