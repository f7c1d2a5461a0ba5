use std::sync::{Mutex, PoisonError};

use http::Method;

use crate::error::{RequestError, RequestResult};
use crate::requestor::Requestor;

/// A request as seen by [`StubRequestor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Vec<u8>>,
}

/// Requestor returning a canned outcome and remembering the last call.
#[derive(Debug)]
pub struct StubRequestor {
    outcome: Result<Vec<u8>, String>,
    last: Mutex<Option<RecordedRequest>>,
}

impl StubRequestor {
    pub fn responding(body: impl Into<Vec<u8>>) -> Self {
        Self {
            outcome: Ok(body.into()),
            last: Mutex::new(None),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
            last: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Requestor for StubRequestor {
    fn request(&self, method: &Method, path: &str, body: Option<Vec<u8>>) -> RequestResult<Vec<u8>> {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(RecordedRequest {
            method: method.clone(),
            path: path.to_string(),
            body,
        });
        self.outcome.clone().map_err(RequestError::Failed)
    }
}
