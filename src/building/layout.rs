//! Per-building-type placement geometry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::energy::SourceKind;
use crate::placement::{Grid, PlacementMode, ZoneRectangle, ZoneRules};

/// Side of the square ground platform around a building.
pub const PLATFORM_SIZE: f32 = 20.0;
/// Ground grid resolution along each axis.
pub const GROUND_GRID_SIZE: usize = 10;
/// Roof grid shape and cell size.
pub const ROOF_ROWS: usize = 4;
pub const ROOF_COLS: usize = 6;
pub const ROOF_CELL_SIZE: f32 = 2.0;
/// Rows in front of the building kept clear of turbines.
pub const TURBINE_MIN_ROW: usize = 3;

/// Building models that can host installations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    Apartments,
    Office,
}

impl BuildingType {
    pub const ALL: [BuildingType; 2] = [BuildingType::Apartments, BuildingType::Office];

    pub fn key(self) -> &'static str {
        match self {
            BuildingType::Apartments => "apartments",
            BuildingType::Office => "office",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BuildingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apartments" => Ok(BuildingType::Apartments),
            "office" => Ok(BuildingType::Office),
            _ => Err(format!(
                "unknown building type \"{s}\", expected \"apartments\" or \"office\""
            )),
        }
    }
}

/// Grid and eligibility rules for one kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindLayout {
    pub grid: Grid,
    pub rules: ZoneRules,
}

/// Which kinds a building offers and where each may go.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingLayout {
    building: BuildingType,
    kinds: BTreeMap<SourceKind, KindLayout>,
}

fn house_walls() -> Vec<ZoneRectangle> {
    vec![
        ZoneRectangle::new(4.0, 0.0, 4.0, 6.0),
        ZoneRectangle::new(-4.0, 0.0, 4.0, 6.0),
        ZoneRectangle::new(0.0, 0.0, 6.0, 6.0),
    ]
}

fn heat_pump_zones() -> Vec<ZoneRectangle> {
    vec![
        ZoneRectangle::new(0.0, 0.0, 5.0, 6.0),
        ZoneRectangle::new(4.0, 0.0, 4.0, 6.0),
        ZoneRectangle::new(-4.0, 0.0, 4.0, 6.0),
    ]
}

fn house_footprint() -> Vec<ZoneRectangle> {
    vec![ZoneRectangle::new(0.0, 0.0, 14.0, 14.0)]
}

impl BuildingLayout {
    /// Built-in geometry for `building`.
    pub fn for_building(building: BuildingType) -> Self {
        let ground = Grid::square(PLATFORM_SIZE, GROUND_GRID_SIZE);
        let roof = Grid::new(ROOF_ROWS, ROOF_COLS, ROOF_CELL_SIZE);
        let walls = ZoneRules::new(PlacementMode::Exclusion, house_walls());
        let turbines = ZoneRules::new(
            PlacementMode::RowFilteredExclusion {
                min_row: TURBINE_MIN_ROW,
            },
            house_footprint(),
        );

        let mut layout = Self {
            building,
            kinds: BTreeMap::new(),
        };
        layout.set(SourceKind::SolarPanels, roof, ZoneRules::unrestricted());
        // Neither building model places roof tiles or pico hydro; both
        // borrow the geometry of their closest relative.
        layout.set(SourceKind::SolarRoofTiles, roof, ZoneRules::unrestricted());
        layout.set(SourceKind::SolarWaterHeating, ground, walls.clone());
        layout.set(SourceKind::MicroHydroPowerSystem, ground, walls.clone());
        // Assumed: same wall exclusion as micro hydro.
        layout.set(SourceKind::PicoHydroPower, ground, walls.clone());
        layout.set(SourceKind::SmallWindTurbines, ground, turbines.clone());
        layout.set(SourceKind::VerticalAxisWindTurbines, ground, turbines);
        layout.set(
            SourceKind::HeatPump,
            ground,
            ZoneRules::new(PlacementMode::InclusionOnly, heat_pump_zones()),
        );
        if building == BuildingType::Office {
            layout.set(SourceKind::VerticalFarming, ground, walls);
        }
        layout
    }

    /// A layout offering no kinds, to be filled with [`BuildingLayout::set`].
    pub fn empty(building: BuildingType) -> Self {
        Self {
            building,
            kinds: BTreeMap::new(),
        }
    }

    /// Adds or replaces the layout for `kind`.
    pub fn set(&mut self, kind: SourceKind, grid: Grid, rules: ZoneRules) {
        self.kinds.insert(kind, KindLayout { grid, rules });
    }

    pub fn building(&self) -> BuildingType {
        self.building
    }

    pub fn get(&self, kind: SourceKind) -> Option<&KindLayout> {
        self.kinds.get(&kind)
    }

    pub fn supports(&self, kind: SourceKind) -> bool {
        self.kinds.contains_key(&kind)
    }

    /// Kinds offered, in table order.
    pub fn kinds(&self) -> impl Iterator<Item = (SourceKind, &KindLayout)> {
        self.kinds.iter().map(|(kind, layout)| (*kind, layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eligible(layout: &BuildingLayout, kind: SourceKind) -> usize {
        let kl = layout.get(kind).unwrap();
        kl.rules.eligible_cells(&kl.grid).len()
    }

    #[test]
    fn apartments_skip_vertical_farming() {
        let layout = BuildingLayout::for_building(BuildingType::Apartments);
        assert!(!layout.supports(SourceKind::VerticalFarming));
        assert_eq!(layout.kinds().count(), 8);
    }

    #[test]
    fn office_offers_every_kind() {
        let layout = BuildingLayout::for_building(BuildingType::Office);
        for kind in SourceKind::ALL {
            assert!(layout.supports(kind), "office should offer {kind}");
        }
    }

    #[test]
    fn eligible_cell_counts_match_geometry() {
        let layout = BuildingLayout::for_building(BuildingType::Office);
        assert_eq!(eligible(&layout, SourceKind::SolarPanels), 24);
        assert_eq!(eligible(&layout, SourceKind::SolarWaterHeating), 76);
        assert_eq!(eligible(&layout, SourceKind::HeatPump), 24);
        assert_eq!(eligible(&layout, SourceKind::SmallWindTurbines), 22);
        assert_eq!(eligible(&layout, SourceKind::VerticalAxisWindTurbines), 22);
    }

    #[test]
    fn borrowed_geometry_matches_relatives() {
        for building in BuildingType::ALL {
            let layout = BuildingLayout::for_building(building);
            assert_eq!(
                layout.get(SourceKind::SolarRoofTiles),
                layout.get(SourceKind::SolarPanels)
            );
            assert_eq!(
                layout.get(SourceKind::PicoHydroPower),
                layout.get(SourceKind::MicroHydroPowerSystem)
            );
        }
    }

    #[test]
    fn building_type_parses() {
        assert_eq!("office".parse::<BuildingType>(), Ok(BuildingType::Office));
        assert!("castle".parse::<BuildingType>().is_err());
    }
}
