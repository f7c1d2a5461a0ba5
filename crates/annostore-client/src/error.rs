use annostore_types::TypeError;
use thiserror::Error;

/// Failure to complete one request/response exchange.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    #[error("request failed: {0}")]
    Failed(String),
}

pub type RequestResult<T> = Result<T, RequestError>;

/// Why a client call collapsed to [`Status::Unknown`](annostore_types::Status::Unknown).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot encode annotation: {0}")]
    Encode(TypeError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("malformed response: {0}")]
    Response(#[from] serde_json::Error),

    #[error("cannot rebuild annotation: {0}")]
    Decode(TypeError),
}

pub type ClientResult<T> = Result<T, ClientError>;
