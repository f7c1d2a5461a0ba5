use annostore_types::TypeError;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Why a route handler answered `400 Bad Request` with an empty body.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("identity path parameter missing")]
    MissingIdentity,

    #[error("invalid identity segment: {0}")]
    Identity(TypeError),

    #[error("request body unreadable: {0}")]
    Body(#[from] BytesRejection),

    #[error("annotation rejected: {0}")]
    Annotation(TypeError),

    #[error("no ledger for identity {0}")]
    IdentityNotFound(String),

    #[error("response serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match &self {
            Self::IdentityNotFound(_) => tracing::debug!("{self}"),
            _ => tracing::warn!("{self}"),
        }
        StatusCode::BAD_REQUEST.into_response()
    }
}
