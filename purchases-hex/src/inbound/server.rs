//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use purchases_types::{PurchaseRepository, RateExchangeProvider};

use super::handlers::{self, AppState};
use crate::PurchaseService;

/// HTTP Server for the Purchases API.
pub struct HttpServer<R: PurchaseRepository, X: RateExchangeProvider> {
    state: Arc<AppState<R, X>>,
}

impl<R: PurchaseRepository, X: RateExchangeProvider> HttpServer<R, X> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PurchaseService<R, X>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/purchase", post(handlers::create_purchase::<R, X>))
            .route("/purchase", get(handlers::list_purchases::<R, X>))
            .route(
                "/purchase/country_currency",
                get(handlers::convert_currency::<R, X>),
            )
            .route("/purchase/{id}", get(handlers::get_purchase::<R, X>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
