use annostore_types::route;
use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all ledger endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(&route::CREATE.template(), put(handler::create_handler))
        .route(&route::APPEND.template(), put(handler::append_handler))
        .route(&route::FIND.template(), get(handler::find_handler))
        .route(route::HEALTH, get(handler::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
