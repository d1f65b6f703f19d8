//! Error types for building values.
//!
//! Comparison itself never fails; these only surface while constructing
//! operands (serde conversion, heap writes).

use std::fmt::Display;

use thiserror::Error;

use crate::value::Kind;

/// Result type for value conversion.
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors raised while converting a `Serialize` type into a [`Value`](crate::Value).
#[derive(Debug, Clone, Error)]
pub enum ValueError {
    /// Map keys must be non-float primitives.
    #[error("Unsupported map key: {0} values cannot be used as keys")]
    UnsupportedKey(Kind),

    /// `serialize_value` was called without a preceding key.
    #[error("Map value serialized without a key")]
    MissingMapKey,

    /// Error reported by a `Serialize` implementation.
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for ValueError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

/// Errors raised by [`Heap`](crate::Heap) writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("No heap node with index {0}")]
    UnknownNode(usize),
}
