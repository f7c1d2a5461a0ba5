use std::sync::Arc;

use annostore_ledger::AnnotationStore;
use annostore_types::Factories;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::interrupt;
use crate::router::build_router;

/// Annotation ledger HTTP gateway.
pub struct LedgerServer {
    config: ServerConfig,
    state: AppState,
}

impl LedgerServer {
    pub fn new(config: ServerConfig, store: Arc<dyn AnnotationStore>, factories: Factories) -> Self {
        Self {
            config,
            state: AppState::new(store, factories),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Bind the configured address and serve until `shutdown` is cancelled.
    pub async fn serve(self, shutdown: CancellationToken) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` is cancelled.
    ///
    /// Cancellation stops the accept loop; requests already in flight run to
    /// completion before this returns.
    pub async fn serve_on(self, listener: TcpListener, shutdown: CancellationToken) -> ServerResult<()> {
        info!("annostore gateway listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await?;
        info!("annostore gateway stopped");
        Ok(())
    }

    /// Serve until SIGINT or SIGTERM, then drain and return.
    pub async fn run(self) -> ServerResult<()> {
        let shutdown = CancellationToken::new();
        let watcher = interrupt::cancel_on_signal(shutdown.clone());
        let served = self.serve(shutdown.clone()).await;
        shutdown.cancel();
        watcher
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        served
    }
}
