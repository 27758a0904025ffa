use async_trait::async_trait;
use thiserror::Error;

use crate::request::GenerateRequest;
use crate::response::ProviderResponse;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Protocol conversion error: {0}")]
    Protocol(#[from] crate::protocol::ProtocolError),
}

pub type Result<T> = std::result::Result<T, LLMError>;

/// The generative-model call boundary.
///
/// One call, one response: implementations neither retry nor impose their own
/// deadline beyond what the transport is configured with.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<ProviderResponse>;
}
