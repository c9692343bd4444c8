//! Error types for mapping adaptation

use thiserror::Error;

use crate::value::Value;

/// Main error type for vivimap operations.
///
/// Attribute access on a proxy never fails; errors arise only at the
/// conversion boundary, where a document that is not a mapping cannot
/// back a proxy.
#[derive(Error, Debug)]
pub enum VivimapError {
    /// Type mismatch error
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type received
        got: String,
    },

    /// Value error
    #[error("Value error: {0}")]
    ValueError(String),
}

/// Result type alias for vivimap operations
pub type Result<T> = std::result::Result<T, VivimapError>;

/// Human-readable name of a value's type, for diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Int(_) => "integer",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Seq(_) => "sequence",
        Value::Map(_) => "mapping",
    }
}
