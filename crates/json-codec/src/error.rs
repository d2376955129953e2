//! Error taxonomy for encoding and decoding.

use serde_json::Value;
use thiserror::Error;

/// Nesting went deeper than [`CodecOptions::max_depth`](crate::CodecOptions).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("nesting deeper than {limit} levels at '{pointer}'")]
pub struct DepthExceeded {
    pub limit: usize,
    pub pointer: String,
}

/// A value could not be represented as JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("non-finite number at '{pointer}' is not representable in JSON")]
    NonFiniteNumber { pointer: String },
    #[error(transparent)]
    Depth(#[from] DepthExceeded),
    #[error("failed to write JSON text: {0}")]
    Serialize(String),
}

/// JSON text could not be decoded into the requested target.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("expected {expected} at '{pointer}', found {found}")]
    ShapeMismatch {
        expected: String,
        found: &'static str,
        pointer: String,
    },
    #[error("cannot coerce {found} to {expected} at '{pointer}'")]
    TypeMismatch {
        expected: String,
        found: &'static str,
        pointer: String,
    },
    #[error("{value} is out of range for {expected} at '{pointer}'")]
    OutOfRange {
        expected: &'static str,
        value: String,
        pointer: String,
    },
    #[error(transparent)]
    Depth(#[from] DepthExceeded),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Syntax {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

impl DecodeError {
    /// Returns the JSON Pointer of the offending value, if the error has one.
    pub fn pointer(&self) -> Option<&str> {
        match self {
            Self::Syntax { .. } => None,
            Self::ShapeMismatch { pointer, .. }
            | Self::TypeMismatch { pointer, .. }
            | Self::OutOfRange { pointer, .. } => Some(pointer),
            Self::Depth(err) => Some(&err.pointer),
        }
    }
}

/// Name of the JSON construct a value is, as used in error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
