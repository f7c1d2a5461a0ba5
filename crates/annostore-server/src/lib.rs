//! HTTP gateway for the annotation ledger.
//!
//! Exposes an [`AnnotationStore`](annostore_ledger::AnnotationStore) over
//! three routes (create, append, find) and shuts down gracefully when the
//! process is interrupted.

pub mod config;
pub mod error;
pub mod handler;
pub mod interrupt;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{Rejection, ServerError, ServerResult};
pub use handler::{AppState, HealthResponse};
pub use server::LedgerServer;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use annostore_ledger::{AnnotationStore, InMemoryStore};
    use annostore_types::route::{APPEND, CREATE, FIND};
    use annostore_types::{Annotation, Factories, HashIdentity, Identity, Metadata, Route, Status, UrlIdentity};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use tower::util::ServiceExt;

    struct Sut {
        store: Arc<InMemoryStore>,
        app: Router,
    }

    fn sut() -> Sut {
        let store = Arc::new(InMemoryStore::new());
        let app = router::build_router(AppState::new(store.clone(), Factories::default()));
        Sut { store, app }
    }

    fn annotation(id: &HashIdentity) -> Annotation {
        Annotation::new(Arc::new(id.clone()), Metadata::assess("tpm", true))
    }

    fn json<T: serde::Serialize>(value: &T) -> Vec<u8> {
        serde_json::to_vec(value).unwrap()
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Vec<u8>) -> (StatusCode, Vec<u8>) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn call(app: &Router, route: &Route, id: &dyn Identity, body: Vec<u8>) -> (StatusCode, Vec<u8>) {
        send(app, route.method.clone(), &route.escaped(id), body).await
    }

    #[tokio::test]
    async fn create_new_identity_succeeds() {
        let sut = sut();
        let id = HashIdentity::ephemeral();

        let (code, body) = call(&sut.app, &CREATE, &id, json(&annotation(&id))).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json(&Status::Success));
        assert_eq!(sut.store.entry_count(&id), 1);
    }

    #[tokio::test]
    async fn create_existing_identity_reports_exists() {
        let sut = sut();
        let id = HashIdentity::ephemeral();
        let first = annotation(&id);
        assert_eq!(sut.store.create(&id, first.clone()), Status::Success);

        let (code, body) = call(&sut.app, &CREATE, &id, json(&annotation(&id))).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json(&Status::Exists));
        assert_eq!(sut.store.find_by_identity(&id).0, vec![first]);
    }

    #[tokio::test]
    async fn append_to_missing_identity_reports_not_found_with_200() {
        let sut = sut();
        let id = HashIdentity::ephemeral();

        let (code, body) = call(&sut.app, &APPEND, &id, json(&annotation(&id))).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json(&Status::NotFound));
        assert_eq!(sut.store.find_by_identity(&id).1, Status::NotFound);
    }

    #[tokio::test]
    async fn append_to_existing_identity_succeeds() {
        let sut = sut();
        let id = HashIdentity::ephemeral();
        sut.store.create(&id, annotation(&id));

        let (code, body) = call(&sut.app, &APPEND, &id, json(&annotation(&id))).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json(&Status::Success));
        assert_eq!(sut.store.entry_count(&id), 2);
    }

    #[tokio::test]
    async fn find_missing_identity_is_400_with_empty_body() {
        let sut = sut();
        let id = HashIdentity::ephemeral();

        let (code, body) = call(&sut.app, &FIND, &id, vec![]).await;

        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn find_returns_entries_in_order() {
        let sut = sut();
        let id = HashIdentity::ephemeral();
        let e1 = annotation(&id);
        let e2 = annotation(&id);

        assert_eq!(call(&sut.app, &CREATE, &id, json(&e1)).await.1, json(&Status::Success));
        assert_eq!(call(&sut.app, &APPEND, &id, json(&e2)).await.1, json(&Status::Success));
        let (code, body) = call(&sut.app, &FIND, &id, vec![]).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json(&vec![e1, e2]));
    }

    #[tokio::test]
    async fn malformed_create_body_is_400_and_does_not_mutate() {
        let sut = sut();
        let id = HashIdentity::ephemeral();

        let (code, body) = call(&sut.app, &CREATE, &id, b"{\"unique\":".to_vec()).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());

        let (code, _) = call(&sut.app, &FIND, &id, vec![]).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert!(sut.store.identities().is_empty());
    }

    #[tokio::test]
    async fn malformed_append_body_is_400_and_does_not_mutate() {
        let sut = sut();
        let id = HashIdentity::ephemeral();
        let e1 = annotation(&id);
        sut.store.create(&id, e1.clone());

        let (code, body) = call(&sut.app, &APPEND, &id, b"not json".to_vec()).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());

        let (code, body) = call(&sut.app, &FIND, &id, vec![]).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json(&vec![e1]));
    }

    #[tokio::test]
    async fn empty_body_is_400() {
        let sut = sut();
        let id = HashIdentity::ephemeral();
        let (code, body) = call(&sut.app, &CREATE, &id, vec![]).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn unknown_metadata_kind_is_400() {
        let sut = sut();
        let id = HashIdentity::ephemeral();
        let mut value = serde_json::to_value(annotation(&id)).unwrap();
        value["metadata"]["kind"] = serde_json::json!("telemetry");

        let (code, body) = call(&sut.app, &CREATE, &id, json(&value)).await;

        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());
        assert!(sut.store.identities().is_empty());
    }

    #[tokio::test]
    async fn escaped_identity_is_decoded_before_reaching_the_store() {
        let sut = sut();
        let id = UrlIdentity::new("plant 7/line?3");
        let entry = Annotation::new(Arc::new(id.clone()), Metadata::publish("gw", "iota"));

        let (code, body) = call(&sut.app, &CREATE, &id, json(&entry)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json(&Status::Success));

        assert_eq!(sut.store.identities(), vec!["plant 7/line?3".to_string()]);
        let (code, body) = call(&sut.app, &FIND, &id, vec![]).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json(&vec![entry]));
    }

    #[tokio::test]
    async fn malformed_escape_is_400() {
        let sut = sut();
        let id = HashIdentity::ephemeral();
        let (code, body) = send(&sut.app, Method::PUT, "/create/abc%zz", json(&annotation(&id))).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());

        let (code, _) = send(&sut.app, Method::GET, "/findByIdentity/%FF", vec![]).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_method_is_rejected_by_router() {
        let sut = sut();
        let (code, _) = send(&sut.app, Method::POST, "/create/abc", vec![]).await;
        assert_eq!(code, StatusCode::METHOD_NOT_ALLOWED);
        let (code, _) = send(&sut.app, Method::PUT, "/findByIdentity/abc", vec![]).await;
        assert_eq!(code, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn health_endpoint() {
        let sut = sut();
        let (code, body) = send(&sut.app, Method::GET, "/health", vec![]).await;
        assert_eq!(code, StatusCode::OK);
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
    }
}
