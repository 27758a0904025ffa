//! Google Gemini `generateContent` wire format.
//!
//! - Messages are called "contents", each an array of "parts"
//! - A part holds text, a `functionCall`, or a `functionResponse`
//! - Tools are grouped as `functionDeclarations` inside a tool entry
//! - Keys are camelCase on the wire
//!
//! # Example Gemini Response
//! ```json
//! {
//!   "candidates": [{
//!     "content": {
//!       "role": "model",
//!       "parts": [{"functionCall": {"name": "search_course_content", "args": {"query": "MCP"}}}]
//!     },
//!     "finishReason": "STOP"
//!   }],
//!   "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 8, "totalTokenCount": 128}
//! }
//! ```

use rag_core::ToolInvocationRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::{FromProvider, ProtocolError, ProtocolResult, ToProvider};
use crate::request::{GenerateRequest, GenerationConfig, SafetySetting};
use crate::response::{Candidate, CompletionStatus, Part, ProviderResponse, UsageMetadata};

// ============================================================================
// Gemini API Types
// ============================================================================

/// Gemini request format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<GeminiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    /// "user" or "model"; absent on some blocked candidates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<GeminiFunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<GeminiFunctionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiFunctionResponse {
    pub name: String,
    pub response: Value,
}

/// Gemini tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiTool {
    pub function_declarations: Vec<GeminiFunctionDeclaration>,
}

/// Gemini function declaration (tool schema)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiFunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Missing when the candidate was blocked before producing anything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<GeminiContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

// ============================================================================
// Gemini → Internal (FromProvider)
// ============================================================================

impl FromProvider<GeminiPart> for Part {
    fn from_provider(part: GeminiPart) -> ProtocolResult<Self> {
        // An empty text field must not hide a function call sharing the part.
        if let Some(text) = part.text.filter(|text| !text.is_empty()) {
            return Ok(Part::Text(text));
        }

        if let Some(call) = part.function_call {
            if call.name.trim().is_empty() {
                return Err(ProtocolError::InvalidToolCall(
                    "function call without a name".to_string(),
                ));
            }
            return Ok(Part::ToolCall(ToolInvocationRequest::from_json(
                call.name, &call.args,
            )));
        }

        Ok(Part::Unsupported)
    }
}

impl FromProvider<GeminiCandidate> for Candidate {
    fn from_provider(candidate: GeminiCandidate) -> ProtocolResult<Self> {
        let status = CompletionStatus::from_wire(candidate.finish_reason.as_deref());

        let parts = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .map(|part| {
                Part::from_provider(part).unwrap_or_else(|err| {
                    log::warn!("Ignoring undecodable Gemini part: {}", err);
                    Part::Unsupported
                })
            })
            .collect();

        Ok(Candidate { status, parts })
    }
}

impl FromProvider<GeminiResponse> for ProviderResponse {
    fn from_provider(response: GeminiResponse) -> ProtocolResult<Self> {
        let candidates = response
            .candidates
            .into_iter()
            .map(Candidate::from_provider)
            .collect::<ProtocolResult<Vec<_>>>()?;

        let usage = response.usage_metadata.map(|u| UsageMetadata {
            prompt_tokens: u.prompt_token_count,
            candidates_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(ProviderResponse { candidates, usage })
    }
}

// ============================================================================
// Internal → Gemini (ToProvider)
// ============================================================================

impl ToProvider<GeminiRequest> for GenerateRequest {
    fn to_provider(&self) -> ProtocolResult<GeminiRequest> {
        if self.prompt.is_empty() {
            return Err(ProtocolError::MissingField("prompt".to_string()));
        }

        Ok(GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(self.prompt.clone()),
                    ..Default::default()
                }],
            }],
            tools: if self.tools.is_empty() {
                None
            } else {
                Some(self.tools.clone())
            },
            generation_config: Some(self.generation_config),
            safety_settings: self.safety_settings.clone(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
