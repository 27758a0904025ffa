use std::sync::Arc;

/// Builds the single-turn prompt text. Pure; holds only the system prompt.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system_prompt: Arc<str>,
}

impl PromptAssembler {
    pub fn new(system_prompt: impl Into<Arc<str>>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// System prompt, then the previous-conversation summary when there is
    /// one, then the question verbatim.
    pub fn assemble(&self, query: &str, conversation_summary: Option<&str>) -> String {
        let mut prompt = String::with_capacity(
            self.system_prompt.len()
                + conversation_summary.map_or(0, str::len)
                + query.len()
                + 48,
        );
        prompt.push_str(&self.system_prompt);

        if let Some(summary) = conversation_summary.filter(|s| !s.is_empty()) {
            prompt.push_str("\n\nPrevious conversation:\n");
            prompt.push_str(summary);
        }

        prompt.push_str("\n\nUser question: ");
        prompt.push_str(query);
        prompt
    }

    /// Second-round prompt: the original prompt, untouched, plus the tool result.
    pub fn follow_up(original_prompt: &str, tool_result: &str) -> String {
        format!(
            "{original_prompt}\n\nFunction call result: {tool_result}\n\nBased on this information, provide a comprehensive answer:"
        )
    }
}
