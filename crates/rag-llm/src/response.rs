//! Typed provider response.
//!
//! Decoded once from the wire (see [`crate::protocol::gemini`]); everything
//! downstream matches on these enums instead of probing optional fields.

use rag_core::ToolInvocationRequest;
use thiserror::Error;

/// Why a candidate stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionStatus {
    Complete,
    SafetyBlocked,
    RecitationBlocked,
    OtherFailure,
    /// Any other code, or none at all. Readers treat it as `Complete`.
    Unknown(Option<String>),
}

impl CompletionStatus {
    pub fn from_wire(reason: Option<&str>) -> Self {
        match reason {
            Some("STOP") => CompletionStatus::Complete,
            Some("SAFETY") => CompletionStatus::SafetyBlocked,
            Some("RECITATION") => CompletionStatus::RecitationBlocked,
            Some("OTHER") => CompletionStatus::OtherFailure,
            other => CompletionStatus::Unknown(other.map(str::to_string)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    ToolCall(ToolInvocationRequest),
    /// Inline data, function responses, code execution and anything else this
    /// workspace does not consume.
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub status: CompletionStatus,
    pub parts: Vec<Part>,
}

impl Candidate {
    pub fn new(status: CompletionStatus, parts: Vec<Part>) -> Self {
        Self { status, parts }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageMetadata {
    pub prompt_tokens: u32,
    pub candidates_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderResponse {
    pub candidates: Vec<Candidate>,
    pub usage: Option<UsageMetadata>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuickTextError {
    #[error("response has no candidates")]
    NoCandidates,

    #[error("quick text access needs exactly one candidate, got {0}")]
    MultipleCandidates(usize),

    #[error("candidate carries no text parts")]
    NoText,
}

impl ProviderResponse {
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            usage: None,
        }
    }

    /// Convenience accessor: all text parts of the single candidate, joined.
    ///
    /// Fails unless the response holds exactly one candidate with at least one
    /// text part.
    pub fn text(&self) -> Result<String, QuickTextError> {
        let candidate = match self.candidates.as_slice() {
            [] => return Err(QuickTextError::NoCandidates),
            [only] => only,
            many => return Err(QuickTextError::MultipleCandidates(many.len())),
        };

        let mut texts = candidate
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .peekable();

        if texts.peek().is_none() {
            return Err(QuickTextError::NoText);
        }
        Ok(texts.collect())
    }
}
