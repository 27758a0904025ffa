//! Tool-augmented answer generation.
//!
//! [`GenerationOrchestrator`] runs one question through the model: assemble
//! the prompt, offer the tools, execute at most one requested tool call,
//! ask again with the tool result, and reduce whatever comes back to a
//! single answer string. Expected failures never escape as errors; they
//! become the stable notices in [`messages`].

pub mod error;
pub mod extractor;
pub mod messages;
pub mod orchestrator;
pub mod prompt;
pub mod settings;
pub mod tool_handler;

pub use error::GenerationError;
pub use extractor::{BlockReason, GenerationOutcome, ResponseExtractor};
pub use orchestrator::{GenerationOrchestrator, GenerationState};
pub use prompt::PromptAssembler;
pub use settings::{GenerationSettings, COURSE_SYSTEM_PROMPT};
pub use tool_handler::ToolInvocationHandler;
