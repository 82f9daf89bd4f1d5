//! Zone rectangles and the eligibility rules built on them.
//!
//! Everything here is pure: the same rules, center and row always give the
//! same answer, and nothing holds building-instance state.

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};

/// Axis-aligned rectangle on the platform plane, given by center and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneRectangle {
    /// Center `[x, z]`.
    pub center: [f32; 2],
    /// Extent `[size_x, size_z]`.
    pub size: [f32; 2],
}

impl ZoneRectangle {
    pub const fn new(center_x: f32, center_z: f32, size_x: f32, size_z: f32) -> Self {
        Self {
            center: [center_x, center_z],
            size: [size_x, size_z],
        }
    }

    /// Inclusive containment test on all four edges.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let [cx, cz] = self.center;
        let [sx, sz] = self.size;
        x >= cx - sx / 2.0 && x <= cx + sx / 2.0 && z >= cz - sz / 2.0 && z <= cz + sz / 2.0
    }
}

/// How a kind's zone list is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Zones forbid placement.
    Exclusion,
    /// Placement must fall inside at least one zone.
    InclusionOnly,
    /// Zones forbid placement, and so does every row below `min_row`.
    RowFilteredExclusion { min_row: usize },
}

/// Returns `true` when a cell centered at `center` on `row` may host an
/// installation under `mode` and `zones`.
///
/// Overlapping zones behave as their union.
pub fn is_eligible(
    mode: PlacementMode,
    center: (f32, f32),
    row: usize,
    zones: &[ZoneRectangle],
) -> bool {
    let (x, z) = center;
    let inside_any = zones.iter().any(|zone| zone.contains(x, z));
    match mode {
        PlacementMode::Exclusion => !inside_any,
        PlacementMode::InclusionOnly => inside_any,
        PlacementMode::RowFilteredExclusion { min_row } => row >= min_row && !inside_any,
    }
}

/// Eligibility of one cell, for grid overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellClass {
    pub cell: Cell,
    pub eligible: bool,
}

/// A placement mode paired with the zones it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRules {
    pub mode: PlacementMode,
    pub zones: Vec<ZoneRectangle>,
}

impl ZoneRules {
    pub fn new(mode: PlacementMode, zones: Vec<ZoneRectangle>) -> Self {
        Self { mode, zones }
    }

    /// Rules that accept every cell.
    pub fn unrestricted() -> Self {
        Self::new(PlacementMode::Exclusion, Vec::new())
    }

    /// Eligibility of `cell` on `grid`.
    pub fn allows(&self, grid: &Grid, cell: Cell) -> bool {
        grid.contains(cell) && is_eligible(self.mode, grid.cell_center(cell), cell.row, &self.zones)
    }

    /// Classifies every cell of `grid` in row-major order.
    pub fn classify(&self, grid: &Grid) -> Vec<CellClass> {
        grid.cells()
            .map(|cell| CellClass {
                cell,
                eligible: self.allows(grid, cell),
            })
            .collect()
    }

    /// Every eligible cell of `grid` in row-major order.
    pub fn eligible_cells(&self, grid: &Grid) -> Vec<Cell> {
        grid.cells().filter(|&cell| self.allows(grid, cell)).collect()
    }
}
