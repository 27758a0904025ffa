use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rag_core::{marshal_arguments, ToolError, ToolExecutor, ToolInvocationRequest};
use rag_llm::{GenerateRequest, GenerativeProvider};

use crate::error::GenerationError;
use crate::extractor::{GenerationOutcome, ResponseExtractor};
use crate::messages;
use crate::orchestrator::GenerationState;
use crate::prompt::PromptAssembler;
use crate::settings::GenerationSettings;

/// Runs one requested tool call and asks the model again with its result.
///
/// Recursion depth is fixed at one: the follow-up call offers no tools.
pub struct ToolInvocationHandler {
    provider: Arc<dyn GenerativeProvider>,
    settings: Arc<GenerationSettings>,
}

impl ToolInvocationHandler {
    pub fn new(provider: Arc<dyn GenerativeProvider>, settings: Arc<GenerationSettings>) -> Self {
        Self { provider, settings }
    }

    pub async fn handle(
        &self,
        request: &ToolInvocationRequest,
        executor: &dyn ToolExecutor,
        original_prompt: &str,
    ) -> String {
        let tool_result = match self.run_tool(request, executor).await {
            Ok(result) => result,
            Err(err) => {
                log::warn!("tool '{}' failed: {}", request.tool_name, err);
                return err.user_message();
            }
        };

        self.answer_with(original_prompt, &tool_result).await
    }

    async fn run_tool(
        &self,
        request: &ToolInvocationRequest,
        executor: &dyn ToolExecutor,
    ) -> Result<String, GenerationError> {
        let args = marshal_arguments(&request.raw_arguments);
        log::debug!(
            "[{}] executing '{}' with {} argument(s)",
            GenerationState::AwaitingToolResult,
            request.tool_name,
            args.len()
        );

        let call = executor.execute(&request.tool_name, &args);
        let output = match AssertUnwindSafe(call).catch_unwind().await {
            Ok(result) => result.map_err(GenerationError::ToolExecutionFailed)?,
            Err(payload) => {
                return Err(GenerationError::ToolExecutionFailed(ToolError::Execution(
                    panic_message(payload),
                )))
            }
        };

        Ok(output.render())
    }

    async fn answer_with(&self, original_prompt: &str, tool_result: &str) -> String {
        let request = GenerateRequest::new(PromptAssembler::follow_up(original_prompt, tool_result))
            .with_generation_config(self.settings.generation_config)
            .with_safety_settings(self.settings.safety_settings.clone());

        log::debug!(
            "[{}] follow-up prompt {} chars",
            GenerationState::AwaitingSecondResponse,
            request.prompt.len()
        );

        let response = match self.provider.generate(&request).await {
            Ok(response) => response,
            Err(err) => {
                log::warn!("follow-up call failed, answering from tool result: {}", err);
                return messages::tool_result_fallback(tool_result);
            }
        };

        match ResponseExtractor::extract(&response) {
            GenerationOutcome::Text(text) => text,
            outcome => {
                log::warn!(
                    "follow-up produced {}, answering from tool result",
                    outcome_kind(&outcome)
                );
                messages::tool_result_fallback(tool_result)
            }
        }
    }
}

fn outcome_kind(outcome: &GenerationOutcome) -> &'static str {
    match outcome {
        GenerationOutcome::Text(_) => "text",
        GenerationOutcome::ToolCall(_) => "tool call",
        GenerationOutcome::Blocked(reason) => reason.as_str(),
        GenerationOutcome::Empty => "empty",
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "tool panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rag_core::{ArgValue, ToolArguments, ToolOutput};
    use rag_llm::{Candidate, CompletionStatus, LLMError, Part, ProviderResponse};

    use super::*;

    struct OneShotProvider {
        response: Mutex<Option<rag_llm::Result<ProviderResponse>>>,
        prompts: Mutex<Vec<GenerateRequest>>,
    }

    impl OneShotProvider {
        fn new(response: rag_llm::Result<ProviderResponse>) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(response)),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GenerativeProvider for OneShotProvider {
        async fn generate(&self, request: &GenerateRequest) -> rag_llm::Result<ProviderResponse> {
            self.prompts.lock().unwrap().push(request.clone());
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("provider called more than once")
        }
    }

    struct RecordingExecutor {
        output: Result<ToolOutput, ToolError>,
        seen: Mutex<Vec<(String, ToolArguments)>>,
    }

    #[async_trait]
    impl ToolExecutor for RecordingExecutor {
        async fn execute(&self, tool_name: &str, args: &ToolArguments) -> Result<ToolOutput, ToolError> {
            self.seen
                .lock()
                .unwrap()
                .push((tool_name.to_string(), args.clone()));
            self.output.clone()
        }
    }

    struct PanickingExecutor;

    #[async_trait]
    impl ToolExecutor for PanickingExecutor {
        async fn execute(&self, _tool_name: &str, _args: &ToolArguments) -> Result<ToolOutput, ToolError> {
            panic!("index corrupted");
        }
    }

    fn text_response(text: &str) -> ProviderResponse {
        ProviderResponse::from_candidates(vec![Candidate::new(
            CompletionStatus::Complete,
            vec![Part::Text(text.to_string())],
        )])
    }

    fn search_request() -> ToolInvocationRequest {
        let mut args = BTreeMap::new();
        args.insert("query".to_string(), ArgValue::String("MCP".to_string()));
        args.insert("lesson_number".to_string(), ArgValue::Number(2.0));
        ToolInvocationRequest::new("search_course_content", args)
    }

    fn handler(provider: Arc<OneShotProvider>) -> ToolInvocationHandler {
        ToolInvocationHandler::new(provider, Arc::new(GenerationSettings::default()))
    }

    #[tokio::test]
    async fn marshals_arguments_and_answers_from_follow_up() {
        let provider = OneShotProvider::new(Ok(text_response("MCP lets tools plug in.")));
        let executor = RecordingExecutor {
            output: Ok(ToolOutput::from("lesson 2 transcript")),
            seen: Mutex::new(Vec::new()),
        };

        let answer = handler(provider.clone())
            .handle(&search_request(), &executor, "ORIGINAL")
            .await;
        assert_eq!(answer, "MCP lets tools plug in.");

        let seen = executor.seen.lock().unwrap();
        assert_eq!(seen[0].0, "search_course_content");
        assert_eq!(seen[0].1["lesson_number"], rag_core::PlainValue::Int(2));

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].prompt.starts_with("ORIGINAL"));
        assert!(prompts[0].prompt.contains("Function call result: lesson 2 transcript"));
        assert!(prompts[0].tools.is_empty());
    }

    #[tokio::test]
    async fn blocked_follow_up_falls_back_to_tool_result() {
        let provider = OneShotProvider::new(Ok(ProviderResponse::from_candidates(vec![
            Candidate::new(CompletionStatus::SafetyBlocked, vec![]),
        ])));
        let executor = RecordingExecutor {
            output: Ok(ToolOutput::from("raw lesson text")),
            seen: Mutex::new(Vec::new()),
        };

        let answer = handler(provider)
            .handle(&search_request(), &executor, "ORIGINAL")
            .await;
        assert_eq!(answer, "Based on the search results: raw lesson text");
    }

    #[tokio::test]
    async fn failed_follow_up_call_falls_back_to_tool_result() {
        let provider = OneShotProvider::new(Err(LLMError::Api("HTTP 500".into())));
        let executor = RecordingExecutor {
            output: Ok(ToolOutput::from("raw lesson text")),
            seen: Mutex::new(Vec::new()),
        };

        let answer = handler(provider)
            .handle(&search_request(), &executor, "ORIGINAL")
            .await;
        assert!(answer.contains("raw lesson text"));
    }

    #[tokio::test]
    async fn executor_error_skips_follow_up() {
        let provider = OneShotProvider::new(Ok(text_response("unused")));
        let executor = RecordingExecutor {
            output: Err(ToolError::Execution("disk full".into())),
            seen: Mutex::new(Vec::new()),
        };

        let answer = handler(provider.clone())
            .handle(&search_request(), &executor, "ORIGINAL")
            .await;
        assert_eq!(answer, "Error executing function: disk full");
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn executor_panic_is_contained() {
        let provider = OneShotProvider::new(Ok(text_response("unused")));
        let answer = tokio_test::block_on(handler(provider).handle(
            &search_request(),
            &PanickingExecutor,
            "ORIGINAL",
        ));
        assert_eq!(answer, "Error executing function: index corrupted");
    }
}
