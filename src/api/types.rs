//! API response types.

use serde::Serialize;

use crate::building::BuildingType;
use crate::economics::AnalysisReport;
use crate::energy::SourceKind;
use crate::placement::{Grid, OverlayCell};

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub building: BuildingType,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

/// Overlay of one kind: the grid it lives on and every cell's state.
#[derive(Debug, Serialize)]
pub struct OverlayResponse {
    pub kind: SourceKind,
    pub grid: Grid,
    pub cells: Vec<OverlayCell>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
