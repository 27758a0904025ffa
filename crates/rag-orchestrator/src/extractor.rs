use std::fmt;

use rag_core::ToolInvocationRequest;
use rag_llm::{CompletionStatus, Part, ProviderResponse};

use crate::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    Safety,
    Recitation,
    Other,
}

impl BlockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockReason::Safety => "safety",
            BlockReason::Recitation => "recitation",
            BlockReason::Other => "other",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            BlockReason::Safety => messages::SAFETY_BLOCKED,
            BlockReason::Recitation => messages::RECITATION_BLOCKED,
            BlockReason::Other => messages::OTHER_FAILURE,
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single provider response amounts to.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Text(String),
    ToolCall(ToolInvocationRequest),
    Blocked(BlockReason),
    Empty,
}

/// Classifies provider responses. Only the first candidate is ever read.
pub struct ResponseExtractor;

impl ResponseExtractor {
    pub fn extract(response: &ProviderResponse) -> GenerationOutcome {
        let Some(candidate) = response.candidates.first() else {
            return GenerationOutcome::Empty;
        };

        match candidate.status {
            CompletionStatus::SafetyBlocked => return GenerationOutcome::Blocked(BlockReason::Safety),
            CompletionStatus::RecitationBlocked => {
                return GenerationOutcome::Blocked(BlockReason::Recitation)
            }
            CompletionStatus::OtherFailure => return GenerationOutcome::Blocked(BlockReason::Other),
            CompletionStatus::Complete | CompletionStatus::Unknown(_) => {}
        }

        // First non-empty text part wins; later parts are never joined in.
        let first_text = candidate.parts.iter().find_map(|part| match part {
            Part::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        });
        if let Some(text) = first_text {
            return GenerationOutcome::Text(text.clone());
        }

        if let Some(request) = Self::first_tool_call(response) {
            return GenerationOutcome::ToolCall(request.clone());
        }

        // Mirrors the SDK's `.text` fallback; non-empty text was already taken above.
        match response.text() {
            Ok(text) if !text.is_empty() => GenerationOutcome::Text(text),
            Ok(_) => GenerationOutcome::Empty,
            Err(err) => {
                log::debug!("quick text accessor unavailable: {}", err);
                GenerationOutcome::Empty
            }
        }
    }

    /// First tool-call part of the first candidate, regardless of its status.
    pub fn first_tool_call(response: &ProviderResponse) -> Option<&ToolInvocationRequest> {
        response
            .candidates
            .first()?
            .parts
            .iter()
            .find_map(|part| match part {
                Part::ToolCall(request) => Some(request),
                _ => None,
            })
    }
}
