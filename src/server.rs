//! HTTP surface: `GET /mark-lost`, `GET /mark-found`, `GET /health`.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::error::Result;
use crate::outcome::{MISSING_HANDLE_BODY, Outcome};
use crate::types::Handle;
use crate::workflow::StatusWorkflow;

/// State shared across handlers; immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<StatusWorkflow>,
}

impl AppState {
    pub fn new(workflow: StatusWorkflow) -> Self {
        Self {
            workflow: Arc::new(workflow),
        }
    }
}

/// Query string accepted by both mark endpoints
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub handle: Option<String>,
    pub location: Option<String>,
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        (self.status_code(), self.body()).into_response()
    }
}

/// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/mark-lost", get(mark_lost))
        .route("/mark-found", get(mark_found))
        .route("/health", get(health))
        .with_state(state)
}

/// Serve on an already-bound listener until ctrl-c.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("lostfound listening on http://{addr}");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("lostfound stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

fn missing_handle() -> Response {
    warn!("Rejected request without handle");
    (StatusCode::BAD_REQUEST, MISSING_HANDLE_BODY).into_response()
}

/// GET /mark-lost?handle=<handle>[&location=<text>]
pub async fn mark_lost(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let Ok(handle) = Handle::parse(query.handle.as_deref()) else {
        return missing_handle();
    };
    state
        .workflow
        .mark_lost(&handle, query.location)
        .await
        .into_response()
}

/// GET /mark-found?handle=<handle>
///
/// Any `location` parameter is ignored.
pub async fn mark_found(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let Ok(handle) = Handle::parse(query.handle.as_deref()) else {
        return missing_handle();
    };
    state.workflow.mark_found(&handle).await.into_response()
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}
