//! Cell eligibility and per-kind placement tracking.

pub mod controller;
/// Cell grids and world-position mapping.
pub mod grid;
/// Zone rectangles and the eligibility resolver.
pub mod zone;

pub use controller::{CellState, OverlayCell, PlacementController, PlacementRejection, ToggleOutcome};
pub use grid::{Cell, Grid};
pub use zone::{PlacementMode, ZoneRectangle, ZoneRules, is_eligible};
