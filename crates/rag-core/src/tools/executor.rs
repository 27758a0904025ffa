use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::encoding::repair_bytes;

use super::args::ToolArguments;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Execution failed: {0}")]
    Execution(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Execution failure whose diagnostic arrived as raw bytes (a subprocess
    /// stderr, a foreign error buffer).
    pub fn execution_bytes(message: &[u8]) -> Self {
        ToolError::Execution(repair_bytes(message).into_owned())
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;

/// Value produced by a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Text(String),
    Json(Value),
    Bytes(Vec<u8>),
}

impl ToolOutput {
    /// Text form embedded in prompts and fallback answers.
    pub fn render(&self) -> String {
        match self {
            ToolOutput::Text(text) => text.clone(),
            ToolOutput::Json(Value::String(text)) => text.clone(),
            ToolOutput::Json(value) => value.to_string(),
            ToolOutput::Bytes(bytes) => repair_bytes(bytes).into_owned(),
        }
    }
}

impl From<String> for ToolOutput {
    fn from(text: String) -> Self {
        ToolOutput::Text(text)
    }
}

impl From<&str> for ToolOutput {
    fn from(text: &str) -> Self {
        ToolOutput::Text(text.to_string())
    }
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        ToolOutput::Json(value)
    }
}

/// Runs a named tool.
///
/// One executor is shared by every in-flight request, so implementations must
/// tolerate concurrent calls; callers add no locking of their own.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, tool_name: &str, args: &ToolArguments) -> Result<ToolOutput>;
}
