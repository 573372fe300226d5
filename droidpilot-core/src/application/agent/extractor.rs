//! Recovers the JSON object a model wrapped in prose or code fences.

use serde_json::Value;

/// Parse the text between the first `{` and the last `}` as a JSON object.
///
/// This only screens out clearly malformed replies; callers still validate
/// the shape of what comes back.
pub fn extract(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(value) if value.is_object() => Some(value),
        _ => None,
    }
}
