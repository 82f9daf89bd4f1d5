//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::building::KindPlacements;
use crate::energy::SourceKind;

use super::AppState;
use super::types::{AnalysisResponse, ErrorResponse, OverlayResponse};

/// `GET /analysis` → 200 + `AnalysisResponse` JSON
pub async fn get_analysis(State(state): State<Arc<AppState>>) -> Json<AnalysisResponse> {
    Json(AnalysisResponse {
        building: state.building,
        report: state.report.clone(),
    })
}

/// `GET /placements` → 200 + `Vec<KindPlacements>` JSON
pub async fn get_placements(State(state): State<Arc<AppState>>) -> Json<Vec<KindPlacements>> {
    Json(state.placements.clone())
}

/// Returns the cell overlay for one kind.
///
/// `GET /overlay/heat_pump` → 200 + `OverlayResponse`
/// `GET /overlay/fusion` → 404 (unknown kind)
/// `GET /overlay/vertical_farming` on apartments → 404 (not offered)
pub async fn get_overlay(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<OverlayResponse>, (StatusCode, Json<ErrorResponse>)> {
    let not_found = |error: String| (StatusCode::NOT_FOUND, Json(ErrorResponse { error }));

    let kind = key.parse::<SourceKind>().map_err(not_found)?;
    let (grid, cells) = state.overlays.get(&kind).ok_or_else(|| {
        not_found(format!(
            "\"{}\" is not offered on {}",
            kind.key(),
            state.building
        ))
    })?;

    Ok(Json(OverlayResponse {
        kind,
        grid: *grid,
        cells: cells.clone(),
    }))
}
