//! Main webserver implementation
//!
//! The WebServer struct owns the shared state and an injected
//! [`EventCalculator`], and builds the axum router around them.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use shared::{AggregationResult, ProcessId, SourceKind, logging, process_info};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::traits::EventCalculator;
use crate::types::{CalculateQuery, HealthResponse};

/// Main webserver struct with dependency injection
pub struct WebServer<C>
where
    C: EventCalculator,
{
    state: Arc<WebServerState>,
    calculator: Arc<C>,
}

impl<C: EventCalculator> Clone for WebServer<C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            calculator: self.calculator.clone(),
        }
    }
}

impl<C> WebServer<C>
where
    C: EventCalculator + 'static,
{
    /// Create a new webserver with dependency injection
    pub fn new(bind_address: SocketAddr, calculator: C) -> Self {
        Self {
            state: Arc::new(WebServerState::new(bind_address)),
            calculator: Arc::new(calculator),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/calculate", get(legacy_calculate_handler::<C>))
            .route("/calculate/:source/*locator", get(calculate_handler::<C>))
            .route("/health", get(health_check::<C>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();
        let bind_address = self.state.bind_address;

        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {bind_address}: {e}")))?;

        process_info!(
            ProcessId::current(),
            "🌐 Web server listening on http://{}",
            bind_address
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        process_info!(
            ProcessId::current(),
            "Served {} calculation requests",
            self.state.requests_served()
        );
        Ok(())
    }

    /// Get server state for external access
    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    async fn calculate(&self, kind: SourceKind, locator: &str) -> WebServerResult<AggregationResult> {
        self.state.record_request();
        Ok(self.calculator.calculate(kind, locator).await?)
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
        Err(err) => logging::log_error(ProcessId::current(), "Signal handling", &err),
    }
}

// HTTP Handlers

/// `GET /calculate/{source}/{locator}`
async fn calculate_handler<C>(
    Path((source, locator)): Path<(String, String)>,
    State(webserver): State<WebServer<C>>,
) -> WebServerResult<Json<AggregationResult>>
where
    C: EventCalculator + 'static,
{
    let kind: SourceKind = source.parse()?;
    let locator = locator.trim_matches('/');

    webserver.calculate(kind, locator).await.map(Json)
}

/// `GET /calculate?slug=` for Oengus marathons
async fn legacy_calculate_handler<C>(
    Query(query): Query<CalculateQuery>,
    State(webserver): State<WebServer<C>>,
) -> WebServerResult<Json<AggregationResult>>
where
    C: EventCalculator + 'static,
{
    let slug = query.slug().ok_or(WebServerError::MissingSlug)?;

    webserver.calculate(SourceKind::Oengus, slug).await.map(Json)
}

async fn health_check<C>(State(webserver): State<WebServer<C>>) -> Json<HealthResponse>
where
    C: EventCalculator + 'static,
{
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: webserver.state.get_uptime_seconds(),
        requests_served: webserver.state.requests_served(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
