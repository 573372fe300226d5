//! Substring checks for planners and tool servers that predate the structured
//! formats. Only consulted when `agent.legacy_heuristics` is enabled.

const COMPLETION_MARKER: &str = "TASK_COMPLETED";
const FAILURE_WORDS: [&str; 2] = ["error", "failed"];

/// The reply announces completion the old way.
pub(crate) fn completion_signal(text: &str) -> bool {
    text.contains(COMPLETION_MARKER)
}

/// The tool result text reads like a failure.
pub(crate) fn failure_signal(text: &str) -> bool {
    let lower = text.to_lowercase();
    FAILURE_WORDS.iter().any(|word| lower.contains(word))
}
