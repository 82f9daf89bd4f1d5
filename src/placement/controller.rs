//! Per-kind placement registry with toggle semantics.

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::energy::SourceKind;

use super::grid::{Cell, Grid};
use super::zone::ZoneRules;

/// Why a toggle left the placement set untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementRejection {
    #[error("placement mode is not active")]
    Inactive,
    #[error("cell is outside the grid")]
    OutOfGrid,
    #[error("cell is not eligible for this installation")]
    Ineligible,
    #[error("installation is not offered on this building")]
    Unsupported,
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Placed(Cell),
    Removed(Cell),
    Rejected(PlacementRejection),
}

impl ToggleOutcome {
    /// Returns `true` when the placement set changed.
    pub fn changed(&self) -> bool {
        !matches!(self, ToggleOutcome::Rejected(_))
    }
}

/// Rendering state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Placed,
    Eligible,
    Ineligible,
}

/// Overlay entry pairing a cell with its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayCell {
    pub cell: Cell,
    pub state: CellState,
}

/// Placement registry for one kind within one building instance.
///
/// Configured by a grid and zone rules, so a single implementation serves
/// every kind. The count is always derived from the placement set.
#[derive(Debug, Clone)]
pub struct PlacementController {
    kind: SourceKind,
    grid: Grid,
    rules: ZoneRules,
    active: bool,
    cells: BTreeSet<Cell>,
}

impl PlacementController {
    /// Creates an empty, active controller.
    pub fn new(kind: SourceKind, grid: Grid, rules: ZoneRules) -> Self {
        Self {
            kind,
            grid,
            rules,
            active: true,
            cells: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Whether toggles are currently accepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Opens or closes placement mode for this kind.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Returns `true` when the resolver allows `cell` for this kind.
    pub fn is_eligible(&self, cell: Cell) -> bool {
        self.rules.allows(&self.grid, cell)
    }

    /// Adds `cell` if absent, removes it if present.
    ///
    /// Requests against an inactive controller, an out-of-grid cell or an
    /// ineligible cell are rejected without touching the placement set.
    pub fn toggle(&mut self, cell: Cell) -> ToggleOutcome {
        if let Err(reason) = self.check(cell) {
            debug!(kind = self.kind.key(), %cell, %reason, "toggle rejected");
            return ToggleOutcome::Rejected(reason);
        }

        if self.cells.remove(&cell) {
            ToggleOutcome::Removed(cell)
        } else {
            self.cells.insert(cell);
            ToggleOutcome::Placed(cell)
        }
    }

    /// Toggles the cell containing world position `(x, z)`.
    pub fn toggle_at(&mut self, x: f32, z: f32) -> ToggleOutcome {
        match self.grid.cell_at(x, z) {
            Some(cell) => self.toggle(cell),
            None if !self.active => ToggleOutcome::Rejected(PlacementRejection::Inactive),
            None => ToggleOutcome::Rejected(PlacementRejection::OutOfGrid),
        }
    }

    fn check(&self, cell: Cell) -> Result<(), PlacementRejection> {
        if !self.active {
            return Err(PlacementRejection::Inactive);
        }
        if !self.grid.contains(cell) {
            return Err(PlacementRejection::OutOfGrid);
        }
        if !self.is_eligible(cell) {
            return Err(PlacementRejection::Ineligible);
        }
        Ok(())
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of placed units.
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    /// Placed cells in row-major order.
    pub fn all(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// World positions of placed cells, for drawing markers.
    pub fn positions(&self) -> Vec<(f32, f32)> {
        self.cells.iter().map(|&cell| self.grid.cell_center(cell)).collect()
    }

    /// Drops every placement.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// State of every grid cell in row-major order.
    pub fn overlay(&self) -> Vec<OverlayCell> {
        self.rules
            .classify(&self.grid)
            .into_iter()
            .map(|class| {
                let state = if self.cells.contains(&class.cell) {
                    CellState::Placed
                } else if class.eligible {
                    CellState::Eligible
                } else {
                    CellState::Ineligible
                };
                OverlayCell {
                    cell: class.cell,
                    state,
                }
            })
            .collect()
    }
}
