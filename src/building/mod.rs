//! Building instances and the placement controllers they own.

/// Built-in geometry per building type.
pub mod layout;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::economics::Configuration;
use crate::energy::SourceKind;
use crate::placement::{
    Cell, OverlayCell, PlacementController, PlacementRejection, ToggleOutcome,
};

pub use layout::{BuildingLayout, BuildingType, KindLayout};

/// Placed cells of one kind, for rendering and the placements endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindPlacements {
    pub kind: SourceKind,
    pub active: bool,
    pub cells: Vec<Cell>,
    /// World-space `(x, z)` marker positions, parallel to `cells`.
    pub positions: Vec<(f32, f32)>,
}

/// One building with a placement controller per offered kind.
///
/// Controllers are owned exclusively; two buildings never share placement
/// state even when built from the same layout.
#[derive(Debug, Clone)]
pub struct Building {
    building: BuildingType,
    controllers: BTreeMap<SourceKind, PlacementController>,
}

impl Building {
    /// A building with the built-in layout for `building`.
    pub fn new(building: BuildingType) -> Self {
        Self::from_layout(&BuildingLayout::for_building(building))
    }

    pub fn from_layout(layout: &BuildingLayout) -> Self {
        let controllers = layout
            .kinds()
            .map(|(kind, kl)| {
                (
                    kind,
                    PlacementController::new(kind, kl.grid, kl.rules.clone()),
                )
            })
            .collect();
        Self {
            building: layout.building(),
            controllers,
        }
    }

    pub fn building_type(&self) -> BuildingType {
        self.building
    }

    /// Toggles `cell` for `kind`. Kinds this building does not offer are
    /// rejected as [`PlacementRejection::Unsupported`].
    pub fn toggle(&mut self, kind: SourceKind, cell: Cell) -> ToggleOutcome {
        match self.controllers.get_mut(&kind) {
            Some(ctrl) => ctrl.toggle(cell),
            None => ToggleOutcome::Rejected(PlacementRejection::Unsupported),
        }
    }

    /// Toggles the cell under world position `(x, z)` for `kind`.
    pub fn toggle_at(&mut self, kind: SourceKind, x: f32, z: f32) -> ToggleOutcome {
        match self.controllers.get_mut(&kind) {
            Some(ctrl) => ctrl.toggle_at(x, z),
            None => ToggleOutcome::Rejected(PlacementRejection::Unsupported),
        }
    }

    /// Opens or closes placement mode for `kind`.
    ///
    /// Returns `false` when the building does not offer `kind`.
    pub fn set_active(&mut self, kind: SourceKind, active: bool) -> bool {
        match self.controllers.get_mut(&kind) {
            Some(ctrl) => {
                ctrl.set_active(active);
                true
            }
            None => false,
        }
    }

    /// Sets every controller's placement mode at once.
    pub fn set_all_active(&mut self, active: bool) {
        for ctrl in self.controllers.values_mut() {
            ctrl.set_active(active);
        }
    }

    pub fn controller(&self, kind: SourceKind) -> Option<&PlacementController> {
        self.controllers.get(&kind)
    }

    pub fn controllers(&self) -> impl Iterator<Item = &PlacementController> {
        self.controllers.values()
    }

    pub fn supports(&self, kind: SourceKind) -> bool {
        self.controllers.contains_key(&kind)
    }

    /// Current unit counts. Kinds the building does not offer count as zero.
    pub fn configuration(&self) -> Configuration {
        Configuration::from_counts(
            SourceKind::ALL
                .into_iter()
                .map(|kind| (kind, self.controllers.get(&kind).map_or(0, |c| c.count()))),
        )
    }

    pub fn placements(&self) -> Vec<KindPlacements> {
        self.controllers
            .values()
            .map(|ctrl| KindPlacements {
                kind: ctrl.kind(),
                active: ctrl.is_active(),
                cells: ctrl.all().iter().copied().collect(),
                positions: ctrl.positions(),
            })
            .collect()
    }

    pub fn overlay(&self, kind: SourceKind) -> Option<Vec<OverlayCell>> {
        self.controllers.get(&kind).map(PlacementController::overlay)
    }

    /// Drops every placement of every kind. Active flags are kept.
    pub fn reset(&mut self) {
        for ctrl in self.controllers.values_mut() {
            ctrl.clear();
        }
    }
}
