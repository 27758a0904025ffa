pub mod protocol;
pub mod provider;
pub mod providers;
pub mod request;
pub mod response;
pub mod schema;

pub use protocol::{FromProvider, ProtocolError, ProtocolResult, ToProvider};
pub use provider::{GenerativeProvider, LLMError, Result};
pub use providers::GeminiProvider;
pub use request::{
    permissive_safety_settings, GenerateRequest, GenerationConfig, HarmBlockThreshold,
    HarmCategory, SafetySetting,
};
pub use response::{Candidate, CompletionStatus, Part, ProviderResponse, QuickTextError, UsageMetadata};
pub use schema::ToolSchemaAdapter;
