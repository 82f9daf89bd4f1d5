//! REST API for a planning snapshot.
//!
//! Provides three GET endpoints:
//! - `/analysis`: building type, per-kind results, rollups and chart series
//! - `/placements`: placed cells and marker positions per kind
//! - `/overlay/{kind}`: per-cell placement state for one kind

mod handlers;
mod types;

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::building::{BuildingType, KindPlacements};
use crate::economics::AnalysisReport;
use crate::energy::SourceKind;
use crate::placement::{Grid, OverlayCell};
use crate::session::Session;

pub use types::{AnalysisResponse, ErrorResponse, OverlayResponse};

/// Immutable application state shared across all request handlers.
///
/// Captured once from a [`Session`] and wrapped in `Arc`; no locks needed
/// since all data is read-only.
pub struct AppState {
    pub building: BuildingType,
    pub report: AnalysisReport,
    pub placements: Vec<KindPlacements>,
    /// Grid and overlay of every offered kind.
    pub overlays: BTreeMap<SourceKind, (Grid, Vec<OverlayCell>)>,
}

impl AppState {
    /// Snapshots `session` for serving.
    pub fn from_session(session: &Session) -> Self {
        let building = session.building();
        let overlays = building
            .controllers()
            .map(|ctrl| (ctrl.kind(), (*ctrl.grid(), ctrl.overlay())))
            .collect();
        Self {
            building: building.building_type(),
            report: session.report().clone(),
            placements: building.placements(),
            overlays,
        }
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analysis", get(handlers::get_analysis))
        .route("/placements", get(handlers::get_placements))
        .route("/overlay/{kind}", get(handlers::get_overlay))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
