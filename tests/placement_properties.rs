//! Property tests for placement toggles over seeded random sequences.

mod common;

use std::collections::BTreeSet;

use rand::Rng;

use renewables_planner::building::BuildingType;
use renewables_planner::energy::SourceKind;
use renewables_planner::placement::{Cell, PlacementRejection, ToggleOutcome};

/// Random cell inside (or just past) a 10 × 10 ground grid.
fn random_cell(rng: &mut impl Rng) -> Cell {
    Cell::new(rng.random_range(0..12), rng.random_range(0..12))
}

#[test]
fn count_matches_placement_set_after_random_toggles() {
    let mut rng = common::seeded_rng(1);
    let mut building = common::office();

    for _ in 0..2_000 {
        let kind = common::GROUND_KINDS[rng.random_range(0..common::GROUND_KINDS.len())];
        building.toggle(kind, random_cell(&mut rng));

        for ctrl in building.controllers() {
            assert_eq!(ctrl.count(), ctrl.all().len());
        }
        let config = building.configuration();
        for kind in SourceKind::ALL {
            let expected = building.controller(kind).map_or(0, |c| c.all().len());
            assert_eq!(config.count(kind), expected);
        }
    }
}

#[test]
fn toggling_an_eligible_cell_twice_is_identity() {
    let mut rng = common::seeded_rng(2);
    let mut building = common::office();

    // Random background state first.
    for _ in 0..200 {
        building.toggle(SourceKind::HeatPump, random_cell(&mut rng));
    }

    let (eligible, _) = common::partition_cells(BuildingType::Office, SourceKind::HeatPump);
    for cell in eligible {
        let before: BTreeSet<Cell> = building
            .controller(SourceKind::HeatPump)
            .unwrap()
            .all()
            .clone();
        assert!(building.toggle(SourceKind::HeatPump, cell).changed());
        assert!(building.toggle(SourceKind::HeatPump, cell).changed());
        let after = building.controller(SourceKind::HeatPump).unwrap().all();
        assert_eq!(&before, after, "double toggle of {cell} changed state");
    }
}

#[test]
fn every_excluded_cell_is_rejected() {
    for kind in common::GROUND_KINDS {
        let mut building = common::office();
        let (_, ineligible) = common::partition_cells(BuildingType::Office, kind);
        assert!(!ineligible.is_empty(), "{kind} should exclude some cells");
        for cell in ineligible {
            assert_eq!(
                building.toggle(kind, cell),
                ToggleOutcome::Rejected(PlacementRejection::Ineligible),
                "{kind} accepted excluded cell {cell}"
            );
        }
        assert_eq!(building.configuration().total_units(), 0);
    }
}

#[test]
fn eligible_counts_per_kind() {
    let count = |kind| common::partition_cells(BuildingType::Office, kind).0.len();
    assert_eq!(count(SourceKind::SolarPanels), 24);
    assert_eq!(count(SourceKind::SolarRoofTiles), 24);
    assert_eq!(count(SourceKind::SolarWaterHeating), 76);
    assert_eq!(count(SourceKind::PicoHydroPower), 76);
    assert_eq!(count(SourceKind::HeatPump), 24);
    assert_eq!(count(SourceKind::SmallWindTurbines), 22);
}

#[test]
fn eligibility_is_deterministic() {
    let first = common::partition_cells(BuildingType::Apartments, SourceKind::SmallWindTurbines);
    let second = common::partition_cells(BuildingType::Apartments, SourceKind::SmallWindTurbines);
    assert_eq!(first, second);
}

#[test]
fn inactive_kind_ignores_every_toggle() {
    let mut rng = common::seeded_rng(3);
    let mut building = common::apartments();
    building.set_all_active(false);
    for _ in 0..500 {
        let kind = SourceKind::ALL[rng.random_range(0..SourceKind::ALL.len())];
        let outcome = building.toggle(kind, random_cell(&mut rng));
        assert!(!outcome.changed());
    }
    assert_eq!(building.configuration().total_units(), 0);
}

#[test]
fn kinds_may_share_a_cell() {
    let mut building = common::office();
    let cell = Cell::new(9, 9);
    for kind in common::GROUND_KINDS {
        if kind == SourceKind::HeatPump {
            continue;
        }
        assert_eq!(building.toggle(kind, cell), ToggleOutcome::Placed(cell));
    }
    assert_eq!(building.configuration().total_units(), 6);
}
