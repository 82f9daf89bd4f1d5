//! Per-kind unit prices, emissions and yield, held in an immutable table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::kind::{Category, SourceKind};

/// Reference economics for one installed unit of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySourceSpec {
    /// Energy class the kind belongs to.
    pub category: Category,
    /// Purchase price per unit.
    pub product_cost: f64,
    /// Installation price per unit.
    pub installation: f64,
    /// Maintenance price per unit.
    pub maintenance: f64,
    /// Embodied emissions per unit (kg CO₂).
    pub carbon_emissions: f64,
    /// Annual production per unit (kWh).
    pub energy_production: f64,
    /// Local electricity price per kWh.
    pub electricity_cost: f64,
}

impl EnergySourceSpec {
    /// Sum of the three per-unit cost components.
    pub fn unit_cost(&self) -> f64 {
        self.product_cost + self.installation + self.maintenance
    }

    /// Annual savings contributed by one unit.
    pub fn unit_annual_savings(&self) -> f64 {
        self.energy_production * self.electricity_cost
    }
}

/// Immutable lookup from kind to its [`EnergySourceSpec`].
///
/// Passed explicitly into the aggregator; tests substitute their own tables,
/// and a table may be partial (missing kinds are skipped during aggregation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    specs: BTreeMap<SourceKind, EnergySourceSpec>,
}

impl PriceTable {
    /// Builds a table from explicit entries. Later duplicates win.
    pub fn new(entries: impl IntoIterator<Item = (SourceKind, EnergySourceSpec)>) -> Self {
        Self {
            specs: entries.into_iter().collect(),
        }
    }

    /// The reference price list.
    pub fn standard() -> Self {
        use Category::*;
        use SourceKind::*;

        let spec = |category, product_cost, installation, maintenance, carbon, production, price| {
            EnergySourceSpec {
                category,
                product_cost,
                installation,
                maintenance,
                carbon_emissions: carbon,
                energy_production: production,
                electricity_cost: price,
            }
        };

        Self::new([
            (SolarPanels, spec(Solar, 30_000.0, 40_000.0, 15_000.0, 40.0, 500.0, 0.15)),
            (SolarWaterHeating, spec(Solar, 380_000.0, 20_000.0, 5_000.0, 0.0, 400.0, 0.15)),
            (SmallWindTurbines, spec(Wind, 111_000.0, 50_000.0, 10_000.0, 10.0, 600.0, 0.12)),
            (
                VerticalAxisWindTurbines,
                spec(Wind, 110_000.0, 60_000.0, 12_000.0, 10.0, 700.0, 0.12),
            ),
            (
                MicroHydroPowerSystem,
                spec(Hydro, 200_000.0, 100_000.0, 15_000.0, 10.0, 3_000.0, 0.10),
            ),
            (PicoHydroPower, spec(Hydro, 300_000.0, 40_000.0, 5_000.0, 0.0, 1_500.0, 0.10)),
            (SolarRoofTiles, spec(Solar, 20_000.0, 100_000.0, 15_000.0, 40.0, 550.0, 0.15)),
            (HeatPump, spec(Geothermal, 150_000.0, 200_000.0, 10_000.0, 10.0, 2_500.0, 0.13)),
            (
                VerticalFarming,
                spec(UrbanFarming, 500_000.0, 200_000.0, 20_000.0, 1.0, 0.0, 0.0),
            ),
        ])
    }

    /// Returns the spec for `kind`, if the table has one.
    pub fn get(&self, kind: SourceKind) -> Option<&EnergySourceSpec> {
        self.specs.get(&kind)
    }

    /// Returns a copy of this table with `kind` replaced or added.
    pub fn with(mut self, kind: SourceKind, spec: EnergySourceSpec) -> Self {
        self.specs.insert(kind, spec);
        self
    }

    /// Returns a copy of this table without `kind`.
    pub fn without(mut self, kind: SourceKind) -> Self {
        self.specs.remove(&kind);
        self
    }

    /// Iterates entries in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceKind, &EnergySourceSpec)> {
        self.specs.iter().map(|(kind, spec)| (*kind, spec))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::standard()
    }
}
