use annostore_ledger::AnnotationStore;
use annostore_types::route::{self, Route};
use annostore_types::{Annotation, Factories, Identity, Status};
use serde_json::Value;
use tracing::warn;

use crate::error::{ClientError, ClientResult};
use crate::requestor::Requestor;

/// [`AnnotationStore`] backed by a remote gateway.
///
/// Every failure to complete the round trip (encoding, transport, or
/// decoding) collapses to [`Status::Unknown`]. Calls are single-shot.
pub struct LedgerClient<R> {
    requestor: R,
    factories: Factories,
}

impl<R: Requestor> LedgerClient<R> {
    pub fn new(requestor: R, factories: Factories) -> Self {
        Self {
            requestor,
            factories,
        }
    }

    pub fn requestor(&self) -> &R {
        &self.requestor
    }

    fn write(&self, route: &Route, id: &dyn Identity, entry: &Annotation) -> ClientResult<Status> {
        let body = entry.to_json().map_err(ClientError::Encode)?;
        let response = self
            .requestor
            .request(&route.method, &route.escaped(id), Some(body))?;
        Ok(serde_json::from_slice(&response)?)
    }

    fn read(&self, id: &dyn Identity) -> ClientResult<Vec<Annotation>> {
        let response = self
            .requestor
            .request(&route::FIND.method, &route::FIND.escaped(id), None)?;
        let raw: Vec<Value> = serde_json::from_slice(&response)?;
        raw.into_iter()
            .map(|value| Annotation::from_value(value, &self.factories).map_err(ClientError::Decode))
            .collect()
    }
}

impl<R: Requestor> AnnotationStore for LedgerClient<R> {
    fn create(&self, id: &dyn Identity, entry: Annotation) -> Status {
        self.write(&route::CREATE, id, &entry).unwrap_or_else(|e| {
            warn!(identity = %id.printable(), "create failed: {e}");
            Status::Unknown
        })
    }

    fn append(&self, id: &dyn Identity, entry: Annotation) -> Status {
        self.write(&route::APPEND, id, &entry).unwrap_or_else(|e| {
            warn!(identity = %id.printable(), "append failed: {e}");
            Status::Unknown
        })
    }

    fn find_by_identity(&self, id: &dyn Identity) -> (Vec<Annotation>, Status) {
        match self.read(id) {
            Ok(entries) => (entries, Status::Success),
            Err(e) => {
                warn!(identity = %id.printable(), "find failed: {e}");
                (Vec::new(), Status::Unknown)
            }
        }
    }
}
