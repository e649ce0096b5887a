//! Error types for ABI validation, call encoding and payload decoding

use std::fmt;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Debug, Error)]
pub enum Error {
    /// The raw ABI description is structurally malformed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Wrong number of call arguments
    #[error("Expected {expected} arguments to contract {method}, found {found}")]
    Arity {
        method: String,
        expected: usize,
        found: usize,
    },

    /// A call argument could not be coerced into its declared type
    #[error("{method}: argument `{arg}` is not a valid {ty}: {reason}")]
    Type {
        method: String,
        arg: String,
        ty: String,
        reason: String,
    },

    /// No message with that name or selector
    #[error("No message {name} found in contract ABI")]
    NotFound { name: String },

    /// Payload bytes do not match the method they were decoded against
    #[error("{method}: failed to decode payload: {reason}")]
    Decode { method: String, reason: String },

    /// ABI text is not valid JSON
    #[error("Invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A structural ABI failure, naming the entry and the field at fault
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid contract ABI: {entry}: `{field}` {reason}")]
pub struct ValidationError {
    /// Entry path, e.g. `deploy`, `messages[2]`, `messages.inc.args[0]`
    pub entry: String,
    /// Offending field name
    pub field: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(entry: impl Into<String>, field: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            entry: entry.into(),
            field: field.into(),
            reason,
        }
    }
}

/// Why a validation check failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// Required field is absent
    Missing,
    /// Field is present with the wrong JSON shape
    Expected(&'static str),
    /// Field not allowed on this entry
    UnknownKey,
    /// Type tag could not be recognized
    UnknownType(String),
    /// Selector is not a four-byte value
    InvalidSelector(String),
    /// Two messages map to the same camelCase key
    DuplicateName { key: String, first: String },
    /// Two messages share a selector
    DuplicateSelector { selector: String, first: String },
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "is missing"),
            Self::Expected(what) => write!(f, "should be {}", what),
            Self::UnknownKey => write!(f, "is not a known key"),
            Self::UnknownType(reason) => write!(f, "is not a known type: {}", reason),
            Self::InvalidSelector(reason) => write!(f, "is not a valid selector: {}", reason),
            Self::DuplicateName { key, first } => {
                write!(f, "collides with {} (both map to `{}`)", first, key)
            }
            Self::DuplicateSelector { selector, first } => {
                write!(f, "{} is already used by {}", selector, first)
            }
        }
    }
}

/// Failure reported by a [`TypeCodec`](crate::domain::abi::TypeCodec)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CodecError(pub String);

impl CodecError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
