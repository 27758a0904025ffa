use rag_core::ToolError;
use rag_llm::LLMError;
use thiserror::Error;

use crate::extractor::BlockReason;
use crate::messages;

/// Every way a generation round can fail to produce model text.
///
/// None of these cross the orchestrator boundary; [`GenerationError::user_message`]
/// turns each into the answer the caller sees. Malformed byte sequences are
/// not represented here: they are repaired where they enter (see
/// `rag_core::encoding`).
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("provider blocked the response ({0})")]
    ProviderBlocked(BlockReason),

    #[error("provider returned no usable content")]
    ProviderEmpty,

    #[error("tool execution failed: {0}")]
    ToolExecutionFailed(ToolError),

    #[error("provider call failed: {0}")]
    ProviderCallFailed(#[from] LLMError),
}

impl GenerationError {
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::ProviderBlocked(reason) => reason.user_message().to_string(),
            GenerationError::ProviderEmpty => messages::EMPTY_RESPONSE.to_string(),
            GenerationError::ToolExecutionFailed(ToolError::Execution(detail)) => {
                messages::tool_execution_failed(detail)
            }
            GenerationError::ToolExecutionFailed(err) => {
                messages::tool_execution_failed(&err.to_string())
            }
            GenerationError::ProviderCallFailed(err) => {
                messages::provider_call_failed(&err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_reasons_use_fixed_notices() {
        assert_eq!(
            GenerationError::ProviderBlocked(BlockReason::Safety).user_message(),
            messages::SAFETY_BLOCKED
        );
        assert_eq!(
            GenerationError::ProviderBlocked(BlockReason::Recitation).user_message(),
            messages::RECITATION_BLOCKED
        );
        assert_eq!(
            GenerationError::ProviderBlocked(BlockReason::Other).user_message(),
            messages::OTHER_FAILURE
        );
    }

    #[test]
    fn tool_failure_keeps_the_detail() {
        let err = GenerationError::ToolExecutionFailed(ToolError::Execution("disk full".into()));
        assert_eq!(err.user_message(), "Error executing function: disk full");

        let err = GenerationError::ToolExecutionFailed(ToolError::NotFound("search".into()));
        assert_eq!(
            err.user_message(),
            "Error executing function: Tool not found: search"
        );
    }

    #[test]
    fn provider_failure_is_prefixed() {
        let err = GenerationError::from(LLMError::Api("HTTP 500: boom".into()));
        assert_eq!(
            err.user_message(),
            "Error generating response: API error: HTTP 500: boom"
        );
    }
}
