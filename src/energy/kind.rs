//! Installation kinds and the energy categories they roll up into.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the nine installation types a building can host.
///
/// The same identifier keys placements, prices, and economic results, so no
/// display-name translation ever happens between those layers. Ordering follows
/// the cost-vs-benefit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    SolarPanels,
    SolarWaterHeating,
    SolarRoofTiles,
    HeatPump,
    SmallWindTurbines,
    VerticalAxisWindTurbines,
    MicroHydroPowerSystem,
    PicoHydroPower,
    VerticalFarming,
}

impl SourceKind {
    /// Every kind, in table order.
    pub const ALL: [SourceKind; 9] = [
        SourceKind::SolarPanels,
        SourceKind::SolarWaterHeating,
        SourceKind::SolarRoofTiles,
        SourceKind::HeatPump,
        SourceKind::SmallWindTurbines,
        SourceKind::VerticalAxisWindTurbines,
        SourceKind::MicroHydroPowerSystem,
        SourceKind::PicoHydroPower,
        SourceKind::VerticalFarming,
    ];

    /// Human-readable name used in reports.
    pub fn display_name(self) -> &'static str {
        match self {
            SourceKind::SolarPanels => "Solar Panels",
            SourceKind::SolarWaterHeating => "Solar Water Heating",
            SourceKind::SolarRoofTiles => "Solar Roof Tiles",
            SourceKind::HeatPump => "Heat Pump",
            SourceKind::SmallWindTurbines => "Small Wind Turbines",
            SourceKind::VerticalAxisWindTurbines => "Vertical Axis Wind Turbines",
            SourceKind::MicroHydroPowerSystem => "Micro Hydro Power System",
            SourceKind::PicoHydroPower => "Pico Hydro Power",
            SourceKind::VerticalFarming => "Vertical Farming",
        }
    }

    /// Snake-case key used in TOML sections, CSV rows and JSON maps.
    pub fn key(self) -> &'static str {
        match self {
            SourceKind::SolarPanels => "solar_panels",
            SourceKind::SolarWaterHeating => "solar_water_heating",
            SourceKind::SolarRoofTiles => "solar_roof_tiles",
            SourceKind::HeatPump => "heat_pump",
            SourceKind::SmallWindTurbines => "small_wind_turbines",
            SourceKind::VerticalAxisWindTurbines => "vertical_axis_wind_turbines",
            SourceKind::MicroHydroPowerSystem => "micro_hydro_power_system",
            SourceKind::PicoHydroPower => "pico_hydro_power",
            SourceKind::VerticalFarming => "vertical_farming",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = SourceKind::ALL.iter().map(|k| k.key()).collect();
                format!("unknown source kind \"{s}\", expected one of: {}", known.join(", "))
            })
    }
}

/// Broad energy class a kind belongs to; emissions are grouped by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Solar,
    Wind,
    Hydro,
    Geothermal,
    UrbanFarming,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Solar,
        Category::Wind,
        Category::Hydro,
        Category::Geothermal,
        Category::UrbanFarming,
    ];

    /// Label written into energy-usage records and charts.
    pub fn label(self) -> &'static str {
        match self {
            Category::Solar => "Solar Energy",
            Category::Wind => "Wind Energy",
            Category::Hydro => "HydroPower Energy",
            Category::Geothermal => "Geothermal Energy",
            Category::UrbanFarming => "Urban Farming",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back_to_the_same_kind() {
        for kind in SourceKind::ALL {
            assert_eq!(kind.key().parse::<SourceKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_key_lists_alternatives() {
        let err = "solar".parse::<SourceKind>().unwrap_err();
        assert!(err.contains("unknown source kind"));
        assert!(err.contains("heat_pump"));
    }

    #[test]
    fn serde_key_matches_config_key() {
        let json = serde_json::to_string(&SourceKind::VerticalAxisWindTurbines).unwrap();
        assert_eq!(json, "\"vertical_axis_wind_turbines\"");
    }

    #[test]
    fn category_labels() {
        assert_eq!(Category::Hydro.to_string(), "HydroPower Energy");
        assert_eq!(Category::UrbanFarming.label(), "Urban Farming");
    }
}
