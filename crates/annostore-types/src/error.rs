use thiserror::Error;

/// Errors produced while decoding identities and annotations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid percent escape at byte {offset}")]
    InvalidEscape { offset: usize },

    #[error("decoded identity is not valid UTF-8")]
    InvalidUtf8,

    #[error("unknown identity kind: {0}")]
    UnknownIdentityKind(String),

    #[error("unknown metadata kind: {0}")]
    UnknownMetadataKind(String),

    #[error("invalid {kind} metadata: {reason}")]
    InvalidMetadata { kind: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type TypeResult<T> = Result<T, TypeError>;
