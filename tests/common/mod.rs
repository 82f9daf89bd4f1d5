//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use renewables_planner::building::{Building, BuildingLayout, BuildingType};
use renewables_planner::energy::{PriceTable, SourceKind};
use renewables_planner::placement::Cell;
use renewables_planner::session::Session;

/// Master seed for randomized toggle sequences.
pub const SEED: u64 = 42;

/// Deterministic RNG, offset so each test draws its own stream.
pub fn seeded_rng(offset: u64) -> StdRng {
    StdRng::seed_from_u64(SEED.wrapping_add(offset))
}

/// Office building with every kind offered and nothing placed.
pub fn office() -> Building {
    Building::new(BuildingType::Office)
}

/// Apartment block (no vertical farming) with nothing placed.
pub fn apartments() -> Building {
    Building::new(BuildingType::Apartments)
}

/// Office session priced with the standard table.
pub fn office_session() -> Session {
    Session::new(office(), PriceTable::standard())
}

/// Every cell of `kind`'s grid split into `(eligible, ineligible)`.
pub fn partition_cells(building: BuildingType, kind: SourceKind) -> (Vec<Cell>, Vec<Cell>) {
    let layout = BuildingLayout::for_building(building);
    let kl = layout
        .get(kind)
        .unwrap_or_else(|| panic!("{kind} not offered on {building}"));
    kl.grid
        .cells()
        .partition(|&cell| kl.rules.allows(&kl.grid, cell))
}

/// Kinds placed on the 10 × 10 ground platform.
pub const GROUND_KINDS: [SourceKind; 7] = [
    SourceKind::SolarWaterHeating,
    SourceKind::HeatPump,
    SourceKind::SmallWindTurbines,
    SourceKind::VerticalAxisWindTurbines,
    SourceKind::MicroHydroPowerSystem,
    SourceKind::PicoHydroPower,
    SourceKind::VerticalFarming,
];
