use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid tool call: {0}")]
    InvalidToolCall(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
