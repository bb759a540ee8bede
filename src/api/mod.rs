//! REST API over a finished dispatch run.
//!
//! Provides two GET endpoints:
//! - `/summary` returns the configuration, cost summary and final battery charge
//! - `/hours` returns per-hour results with optional range filtering

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::sim::types::{DispatchConfig, Simulation};

pub use types::{ErrorResponse, HourRecord, HoursQuery, SummaryResponse};

/// Immutable application state shared across all request handlers.
///
/// Built once after the run completes. All data is read-only so it is
/// shared through an `Arc` without locking.
pub struct AppState {
    /// Configuration used for this run.
    pub config: DispatchConfig,
    /// Result of the run.
    pub simulation: Simulation,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/hours", get(handlers::get_hours))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the
/// server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
