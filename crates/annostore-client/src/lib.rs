//! Remote client for the annotation ledger gateway.
//!
//! [`LedgerClient`] implements [`AnnotationStore`](annostore_ledger::AnnotationStore)
//! by delegating each call to a [`Requestor`]. Use [`HttpRequestor`] against a
//! running gateway, or [`StubRequestor`] in tests.

pub mod client;
pub mod error;
pub mod requestor;
pub mod stub;

pub use client::LedgerClient;
pub use error::{ClientError, ClientResult, RequestError, RequestResult};
pub use requestor::{HttpRequestor, Requestor, REQUEST_TIMEOUT};
pub use stub::{RecordedRequest, StubRequestor};
