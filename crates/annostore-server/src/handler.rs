//! Route handlers mapping HTTP requests onto [`AnnotationStore`] calls.
//!
//! Create and append always answer `200` with the serialized [`Status`] once
//! the request itself is well formed, even when the store says `Exists` or
//! `NotFound`; callers must read the body. Find instead answers `400` with
//! an empty body when the ledger is missing. Clients depend on both
//! behaviors.

use std::sync::Arc;

use annostore_ledger::AnnotationStore;
use annostore_types::route::{self, Route};
use annostore_types::{codec, Annotation, Factories, Identity, Status, UrlIdentity};
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Rejection;

pub const CODE_SUCCESS: StatusCode = StatusCode::OK;
pub const CODE_REJECTED: StatusCode = StatusCode::BAD_REQUEST;

/// Dependencies shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AnnotationStore>,
    pub factories: Factories,
}

impl AppState {
    pub fn new(store: Arc<dyn AnnotationStore>, factories: Factories) -> Self {
        Self { store, factories }
    }
}

/// `PUT /create/{identity}`
pub async fn create_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, Rejection> {
    let id = decode_identity(&route::CREATE, &uri)?;
    let entry = parse_entry(&state.factories, &body?)?;
    let status = state.store.create(&id, entry);
    debug!(identity = %id, %status, "create handled");
    status_response(status)
}

/// `PUT /append/{identity}`
pub async fn append_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, Rejection> {
    let id = decode_identity(&route::APPEND, &uri)?;
    let entry = parse_entry(&state.factories, &body?)?;
    let status = state.store.append(&id, entry);
    debug!(identity = %id, %status, "append handled");
    status_response(status)
}

/// `GET /findByIdentity/{identity}`
pub async fn find_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, Rejection> {
    let id = decode_identity(&route::FIND, &uri)?;
    let (entries, status) = state.store.find_by_identity(&id);
    if status != Status::Success {
        return Err(Rejection::IdentityNotFound(id.printable()));
    }
    debug!(identity = %id, count = entries.len(), "find handled");
    json_response(serde_json::to_vec(&entries)?)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Decode the identity from the still-escaped request path.
///
/// The router has already matched `route`'s template, so whatever follows
/// the prefix is exactly one path segment.
fn decode_identity(route: &Route, uri: &Uri) -> Result<UrlIdentity, Rejection> {
    let segment = uri
        .path()
        .strip_prefix(route.prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|segment| !segment.is_empty())
        .ok_or(Rejection::MissingIdentity)?;
    codec::decode(segment).map_err(Rejection::Identity)
}

fn parse_entry(factories: &Factories, body: &[u8]) -> Result<Annotation, Rejection> {
    Annotation::from_json(body, factories).map_err(Rejection::Annotation)
}

fn status_response(status: Status) -> Result<Response, Rejection> {
    json_response(serde_json::to_vec(&status)?)
}

fn json_response(body: Vec<u8>) -> Result<Response, Rejection> {
    Ok((
        CODE_SUCCESS,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
