//! User-facing notices. Callers match on these, so the wording is fixed.

pub const SAFETY_BLOCKED: &str = "I'm having trouble processing your question about course materials. This appears to be an educational query, so please try rephrasing it or contact support if this continues.";

pub const RECITATION_BLOCKED: &str =
    "I cannot provide that specific response due to content policy. Please try asking in a different way.";

pub const OTHER_FAILURE: &str =
    "I encountered a technical issue generating a response. Please try again with your question.";

pub const EMPTY_RESPONSE: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

/// The model asked for a tool but nobody could run it.
pub const TOOL_CALL_PENDING: &str = "Processing your request...";

pub fn provider_call_failed(detail: &str) -> String {
    format!("Error generating response: {detail}")
}

pub fn tool_execution_failed(detail: &str) -> String {
    format!("Error executing function: {detail}")
}

/// Answer used when the follow-up call produced nothing usable.
pub fn tool_result_fallback(tool_result: &str) -> String {
    format!("Based on the search results: {tool_result}")
}
