//! A building paired with a price table and its always-current report.

use crate::building::Building;
use crate::economics::AnalysisReport;
use crate::energy::{PriceTable, SourceKind};
use crate::placement::{Cell, ToggleOutcome};

/// Interactive planning state.
///
/// Every toggle that changes the placement set recomputes the whole report;
/// rejected toggles leave it untouched.
#[derive(Debug, Clone)]
pub struct Session {
    building: Building,
    prices: PriceTable,
    report: AnalysisReport,
}

impl Session {
    pub fn new(building: Building, prices: PriceTable) -> Self {
        let report = AnalysisReport::compute(&prices, &building.configuration());
        Self {
            building,
            prices,
            report,
        }
    }

    pub fn toggle(&mut self, kind: SourceKind, cell: Cell) -> ToggleOutcome {
        let outcome = self.building.toggle(kind, cell);
        if outcome.changed() {
            self.recompute();
        }
        outcome
    }

    pub fn toggle_at(&mut self, kind: SourceKind, x: f32, z: f32) -> ToggleOutcome {
        let outcome = self.building.toggle_at(kind, x, z);
        if outcome.changed() {
            self.recompute();
        }
        outcome
    }

    /// Forwards to [`Building::set_active`]; the report does not depend on it.
    pub fn set_active(&mut self, kind: SourceKind, active: bool) -> bool {
        self.building.set_active(kind, active)
    }

    /// Clears every placement and recomputes.
    pub fn reset(&mut self) {
        self.building.reset();
        self.recompute();
    }

    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    fn recompute(&mut self) {
        self.report = AnalysisReport::compute(&self.prices, &self.building.configuration());
    }
}
