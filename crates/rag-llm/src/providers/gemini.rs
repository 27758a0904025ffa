//! Google Gemini provider implementation.

use async_trait::async_trait;
use rag_core::config::{DEFAULT_API_BASE, DEFAULT_MODEL};
use rag_core::{repair_bytes, Config};
use reqwest::Client;

use crate::protocol::gemini::{GeminiRequest, GeminiResponse};
use crate::protocol::{FromProvider, ToProvider};
use crate::provider::{GenerativeProvider, LLMError, Result};
use crate::request::GenerateRequest;
use crate::response::ProviderResponse;

/// Google Gemini API provider (non-streaming `generateContent`).
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> std::result::Result<Self, rag_core::ConfigError> {
        let api_key = config.require_api_key()?;
        Ok(Self::new(api_key)
            .with_base_url(config.api_base.clone())
            .with_model(config.model.clone()))
    }

    /// Set a custom base URL (e.g., for proxies or alternative endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model name (e.g., "gemini-2.5-flash", "gemini-1.5-pro").
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<ProviderResponse> {
        let body: GeminiRequest = request.to_provider()?;

        log::debug!(
            "Gemini request to model '{}': {} tool group(s), prompt {} chars",
            self.model,
            body.tools.as_ref().map_or(0, Vec::len),
            request.prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(LLMError::Http)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(LLMError::Http)?;
        // Invalid UTF-8 from the provider degrades to U+FFFD instead of failing the call.
        let text = repair_bytes(&bytes);

        if !status.is_success() {
            if status == 401 || status == 403 {
                return Err(LLMError::Auth(format!(
                    "Gemini authentication failed: {}. Please check your API key.",
                    text
                )));
            }

            return Err(LLMError::Api(format!(
                "Gemini API error: HTTP {}: {}",
                status, text
            )));
        }

        let wire: GeminiResponse = serde_json::from_str(&text)?;
        let decoded = ProviderResponse::from_provider(wire)?;

        if let Some(usage) = decoded.usage {
            log::debug!(
                "Gemini usage: prompt={} candidates={} total={}",
                usage.prompt_tokens,
                usage.candidates_tokens,
                usage.total_tokens
            );
        }

        Ok(decoded)
    }
}
