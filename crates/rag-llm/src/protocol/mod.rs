//! Protocol conversion traits.
//!
//! Provider wire types convert to and from the typed request/response model
//! at the boundary, once. Nothing past this module looks at wire structs.

mod errors;
pub mod gemini;

pub use errors::{ProtocolError, ProtocolResult};

/// Provider-specific type → internal type.
pub trait FromProvider<T>: Sized {
    fn from_provider(value: T) -> ProtocolResult<Self>;
}

/// Internal type → provider-specific type.
pub trait ToProvider<T>: Sized {
    fn to_provider(&self) -> ProtocolResult<T>;
}
