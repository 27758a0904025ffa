use std::fmt;
use std::sync::Arc;

use rag_core::{ToolDescriptor, ToolExecutor};
use rag_llm::{GenerateRequest, GenerativeProvider, ToolSchemaAdapter};

use crate::error::GenerationError;
use crate::extractor::{GenerationOutcome, ResponseExtractor};
use crate::messages;
use crate::prompt::PromptAssembler;
use crate::settings::GenerationSettings;
use crate::tool_handler::ToolInvocationHandler;

/// Lifecycle of one request.
///
/// `BuildingPrompt → AwaitingFirstResponse → Done`, or through
/// `AwaitingToolResult → AwaitingSecondResponse` when a tool runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    BuildingPrompt,
    AwaitingFirstResponse,
    AwaitingToolResult,
    AwaitingSecondResponse,
    Done,
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationState::BuildingPrompt => "building_prompt",
            GenerationState::AwaitingFirstResponse => "awaiting_first_response",
            GenerationState::AwaitingToolResult => "awaiting_tool_result",
            GenerationState::AwaitingSecondResponse => "awaiting_second_response",
            GenerationState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Public entry point: one question in, one answer string out.
///
/// Holds only read-only state, so a single instance can serve concurrent
/// requests behind an `Arc`.
pub struct GenerationOrchestrator {
    provider: Arc<dyn GenerativeProvider>,
    settings: Arc<GenerationSettings>,
    assembler: PromptAssembler,
    tool_handler: ToolInvocationHandler,
}

impl GenerationOrchestrator {
    pub fn new(provider: Arc<dyn GenerativeProvider>, settings: GenerationSettings) -> Self {
        let settings = Arc::new(settings);
        Self {
            assembler: PromptAssembler::new(Arc::clone(&settings.system_prompt)),
            tool_handler: ToolInvocationHandler::new(Arc::clone(&provider), Arc::clone(&settings)),
            provider,
            settings,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Answer `query`. Never fails: blocked or empty responses, tool failures
    /// and provider errors all come back as a descriptive answer.
    ///
    /// A tool round happens only when `tools` is non-empty, the model asked
    /// for a tool, and an `executor` was supplied. Without an executor a tool
    /// request is ignored and the same response is read for text.
    pub async fn generate(
        &self,
        query: &str,
        conversation_summary: Option<&str>,
        tools: &[ToolDescriptor],
        executor: Option<&dyn ToolExecutor>,
    ) -> String {
        let answer = match self
            .run(query, conversation_summary, tools, executor)
            .await
        {
            Ok(answer) => answer,
            Err(err) => {
                log::warn!("generation failed: {}", err);
                err.user_message()
            }
        };
        log::debug!("[{}] answer {} chars", GenerationState::Done, answer.len());
        answer
    }

    async fn run(
        &self,
        query: &str,
        conversation_summary: Option<&str>,
        tools: &[ToolDescriptor],
        executor: Option<&dyn ToolExecutor>,
    ) -> Result<String, GenerationError> {
        log::debug!(
            "[{}] query {} chars, summary: {}, {} tool(s)",
            GenerationState::BuildingPrompt,
            query.len(),
            conversation_summary.is_some(),
            tools.len()
        );
        let prompt = self.assembler.assemble(query, conversation_summary);
        let request = GenerateRequest::new(prompt.as_str())
            .with_generation_config(self.settings.generation_config)
            .with_safety_settings(self.settings.safety_settings.clone())
            .with_tools(ToolSchemaAdapter::adapt(tools));

        log::debug!("[{}]", GenerationState::AwaitingFirstResponse);
        let response = self.provider.generate(&request).await?;

        if !tools.is_empty() {
            match (executor, ResponseExtractor::first_tool_call(&response)) {
                (Some(executor), Some(call)) => {
                    log::info!("model requested tool '{}'", call.tool_name);
                    return Ok(self.tool_handler.handle(call, executor, &prompt).await);
                }
                (None, Some(call)) => {
                    log::debug!(
                        "ignoring request for tool '{}': no executor supplied",
                        call.tool_name
                    );
                }
                _ => {}
            }
        }

        match ResponseExtractor::extract(&response) {
            GenerationOutcome::Text(text) => Ok(text),
            GenerationOutcome::ToolCall(_) => Ok(messages::TOOL_CALL_PENDING.to_string()),
            GenerationOutcome::Blocked(reason) => Err(GenerationError::ProviderBlocked(reason)),
            GenerationOutcome::Empty => Err(GenerationError::ProviderEmpty),
        }
    }
}
