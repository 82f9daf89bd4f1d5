//! TOML-based site configuration and preset definitions.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::building::{Building, BuildingLayout, BuildingType};
use crate::energy::{EnergySourceSpec, PriceTable, SourceKind};
use crate::placement::{Cell, Grid, PlacementMode, ToggleOutcome, ZoneRectangle, ZoneRules};
use crate::session::Session;

/// Largest custom layout grid accepted, in cells.
pub const MAX_GRID_CELLS: usize = 10_000;

/// Top-level site configuration parsed from TOML.
///
/// Every section is optional. An empty file describes an apartment block
/// with the built-in layout, standard prices and nothing placed. Load from
/// TOML with [`SiteConfig::from_toml_file`] or start from a preset via
/// [`SiteConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Kinds whose placement mode starts enabled. `None` enables all.
    #[serde(default)]
    pub active: Option<Vec<String>>,
    /// Building model selection.
    #[serde(default)]
    pub building: BuildingConfig,
    /// Partial price overrides keyed by kind key.
    #[serde(default)]
    pub prices: BTreeMap<String, PriceOverride>,
    /// Custom layouts replacing the built-in geometry of single kinds.
    #[serde(default)]
    pub layouts: Vec<LayoutConfig>,
    /// Initial placements keyed by kind key, as `[row, col]` pairs.
    #[serde(default)]
    pub placements: BTreeMap<String, Vec<[usize; 2]>>,
}

/// Building model selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingConfig {
    /// `"apartments"` or `"office"`.
    #[serde(rename = "type")]
    pub building_type: String,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            building_type: BuildingType::Apartments.key().to_string(),
        }
    }
}

/// Replaces individual fields of a kind's reference economics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceOverride {
    pub product_cost: Option<f64>,
    pub installation: Option<f64>,
    pub maintenance: Option<f64>,
    pub carbon_emissions: Option<f64>,
    pub energy_production: Option<f64>,
    pub electricity_cost: Option<f64>,
}

impl PriceOverride {
    fn fields(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("product_cost", self.product_cost),
            ("installation", self.installation),
            ("maintenance", self.maintenance),
            ("carbon_emissions", self.carbon_emissions),
            ("energy_production", self.energy_production),
            ("electricity_cost", self.electricity_cost),
        ]
    }

    fn apply(&self, base: EnergySourceSpec) -> EnergySourceSpec {
        EnergySourceSpec {
            category: base.category,
            product_cost: self.product_cost.unwrap_or(base.product_cost),
            installation: self.installation.unwrap_or(base.installation),
            maintenance: self.maintenance.unwrap_or(base.maintenance),
            carbon_emissions: self.carbon_emissions.unwrap_or(base.carbon_emissions),
            energy_production: self.energy_production.unwrap_or(base.energy_production),
            electricity_cost: self.electricity_cost.unwrap_or(base.electricity_cost),
        }
    }
}

/// A custom grid and zone list for one kind.
///
/// The grid is given either as `rows`, `cols` and `cell_size`, or as a square
/// `platform_size` split into `grid_size × grid_size` cells.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Kind key, e.g. `"heat_pump"`.
    pub kind: String,
    /// `"exclusion"`, `"inclusion"` or `"row_filtered"`.
    pub mode: String,
    /// First allowed row for `"row_filtered"`.
    pub min_row: usize,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub cell_size: Option<f32>,
    pub platform_size: Option<f32>,
    pub grid_size: Option<usize>,
    pub zones: Vec<ZoneRectangle>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: String::new(),
            mode: "exclusion".to_string(),
            min_row: 0,
            rows: None,
            cols: None,
            cell_size: None,
            platform_size: None,
            grid_size: None,
            zones: Vec::new(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"layouts[0].mode"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl LayoutConfig {
    fn placement_mode(&self, field: &str) -> Result<PlacementMode, ConfigError> {
        match self.mode.as_str() {
            "exclusion" => Ok(PlacementMode::Exclusion),
            "inclusion" => Ok(PlacementMode::InclusionOnly),
            "row_filtered" => Ok(PlacementMode::RowFilteredExclusion {
                min_row: self.min_row,
            }),
            other => Err(ConfigError::new(
                format!("{field}.mode"),
                format!(
                    "must be \"exclusion\", \"inclusion\" or \"row_filtered\", got \"{other}\""
                ),
            )),
        }
    }

    fn grid(&self, field: &str) -> Result<Grid, ConfigError> {
        let grid = self.grid_shape(field)?;
        if grid.cell_count().is_none_or(|n| n > MAX_GRID_CELLS) {
            return Err(ConfigError::new(
                field.to_string(),
                format!("grid must have at most {MAX_GRID_CELLS} cells"),
            ));
        }
        Ok(grid)
    }

    fn grid_shape(&self, field: &str) -> Result<Grid, ConfigError> {
        let explicit = (self.rows, self.cols, self.cell_size);
        let square = (self.platform_size, self.grid_size);
        match (explicit, square) {
            ((Some(rows), Some(cols), Some(cell_size)), (None, None)) => {
                if rows == 0 || cols == 0 {
                    return Err(ConfigError::new(
                        format!("{field}.rows"),
                        "rows and cols must be > 0",
                    ));
                }
                if !(cell_size > 0.0 && cell_size.is_finite()) {
                    return Err(ConfigError::new(format!("{field}.cell_size"), "must be > 0"));
                }
                Ok(Grid::new(rows, cols, cell_size))
            }
            ((None, None, None), (Some(platform_size), Some(grid_size))) => {
                if grid_size == 0 {
                    return Err(ConfigError::new(format!("{field}.grid_size"), "must be > 0"));
                }
                if !(platform_size > 0.0 && platform_size.is_finite()) {
                    return Err(ConfigError::new(
                        format!("{field}.platform_size"),
                        "must be > 0",
                    ));
                }
                Ok(Grid::square(platform_size, grid_size))
            }
            _ => Err(ConfigError::new(
                field.to_string(),
                "give either rows, cols and cell_size, or platform_size and grid_size",
            )),
        }
    }

    fn check_zones(&self, field: &str) -> Result<(), ConfigError> {
        for (i, zone) in self.zones.iter().enumerate() {
            let finite = zone.center.iter().chain(&zone.size).all(|v| v.is_finite());
            if !finite || zone.size.iter().any(|s| *s < 0.0) {
                return Err(ConfigError::new(
                    format!("{field}.zones[{i}]"),
                    "center must be finite and size non-negative",
                ));
            }
        }
        Ok(())
    }

    fn resolve(&self, index: usize) -> Result<(SourceKind, Grid, ZoneRules), ConfigError> {
        let field = format!("layouts[{index}]");
        let kind = parse_kind(&format!("{field}.kind"), &self.kind)?;
        let mode = self.placement_mode(&field)?;
        let grid = self.grid(&field)?;
        self.check_zones(&field)?;
        Ok((kind, grid, ZoneRules::new(mode, self.zones.clone())))
    }
}

fn parse_kind(field: &str, key: &str) -> Result<SourceKind, ConfigError> {
    key.parse::<SourceKind>()
        .map_err(|message| ConfigError::new(field.to_string(), message))
}

impl SiteConfig {
    /// An apartment block with nothing placed.
    pub fn apartments() -> Self {
        Self::default()
    }

    /// An office building with nothing placed.
    pub fn office() -> Self {
        Self {
            building: BuildingConfig {
                building_type: BuildingType::Office.key().to_string(),
            },
            ..Self::default()
        }
    }

    /// An office with a mix of roof solar, a heat pump, turbines and a farm.
    pub fn office_mixed() -> Self {
        let placements = [
            ("solar_panels", vec![[0, 0], [0, 1], [1, 0], [1, 1]]),
            ("heat_pump", vec![[4, 4]]),
            ("small_wind_turbines", vec![[9, 0], [9, 9]]),
            ("vertical_farming", vec![[0, 9]]),
        ]
        .into_iter()
        .map(|(key, cells)| (key.to_string(), cells))
        .collect();
        Self {
            placements,
            ..Self::office()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["apartments", "office", "office_mixed"];

    /// Loads a site from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "apartments" => Ok(Self::apartments()),
            "office" => Ok(Self::office()),
            "office_mixed" => Ok(Self::office_mixed()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a site from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("site", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a site from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Resolves the building type.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown type.
    pub fn building_type(&self) -> Result<BuildingType, ConfigError> {
        self.building
            .building_type
            .parse()
            .map_err(|message| ConfigError::new("building.type", message))
    }

    /// The standard price list with every override applied.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown kind key.
    pub fn price_table(&self) -> Result<PriceTable, ConfigError> {
        let mut table = PriceTable::standard();
        for (key, over) in &self.prices {
            let kind = parse_kind(&format!("prices.{key}"), key)?;
            if let Some(base) = table.get(kind).copied() {
                table = table.with(kind, over.apply(base));
            }
        }
        Ok(table)
    }

    /// The built-in layout for the building type with custom layouts applied.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` among the building type and layouts.
    pub fn layout(&self) -> Result<BuildingLayout, ConfigError> {
        let mut layout = BuildingLayout::for_building(self.building_type()?);
        for (i, custom) in self.layouts.iter().enumerate() {
            let (kind, grid, rules) = custom.resolve(i)?;
            layout.set(kind, grid, rules);
        }
        Ok(layout)
    }

    fn active_kinds(&self) -> Result<Option<BTreeSet<SourceKind>>, ConfigError> {
        let Some(keys) = &self.active else {
            return Ok(None);
        };
        keys.iter()
            .enumerate()
            .map(|(i, key)| parse_kind(&format!("active[{i}]"), key))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Some)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Placements are
    /// checked against the resolved layout, so an out-of-grid or ineligible
    /// cell is reported here rather than silently dropped on load.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let building_type = match self.building_type() {
            Ok(building_type) => Some(building_type),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        for (key, over) in &self.prices {
            if let Err(e) = parse_kind(&format!("prices.{key}"), key) {
                errors.push(e);
                continue;
            }
            for (name, value) in over.fields() {
                if value.is_some_and(|v| !(v.is_finite() && v >= 0.0)) {
                    errors.push(ConfigError::new(
                        format!("prices.{key}.{name}"),
                        "must be finite and >= 0",
                    ));
                }
            }
        }

        let mut seen = BTreeSet::new();
        let mut layout = building_type.map(BuildingLayout::for_building);
        for (i, custom) in self.layouts.iter().enumerate() {
            match custom.resolve(i) {
                Ok((kind, grid, rules)) => {
                    if !seen.insert(kind) {
                        errors.push(ConfigError::new(
                            format!("layouts[{i}].kind"),
                            format!("duplicate layout for \"{}\"", kind.key()),
                        ));
                    }
                    if let Some(layout) = layout.as_mut() {
                        layout.set(kind, grid, rules);
                    }
                }
                Err(e) => errors.push(e),
            }
        }

        if let Err(e) = self.active_kinds() {
            errors.push(e);
        }

        for (key, cells) in &self.placements {
            let field = format!("placements.{key}");
            let kind = match parse_kind(&field, key) {
                Ok(kind) => kind,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };
            let Some(layout) = layout.as_ref() else {
                continue;
            };
            let Some(kl) = layout.get(kind) else {
                errors.push(ConfigError::new(
                    field,
                    format!("not offered on {}", layout.building()),
                ));
                continue;
            };
            let mut placed = BTreeSet::new();
            for (i, &[row, col]) in cells.iter().enumerate() {
                let cell = Cell::new(row, col);
                let message = if !kl.grid.contains(cell) {
                    Some("outside the grid")
                } else if !kl.rules.allows(&kl.grid, cell) {
                    Some("not eligible")
                } else if !placed.insert(cell) {
                    Some("listed twice")
                } else {
                    None
                };
                if let Some(message) = message {
                    errors.push(ConfigError::new(
                        format!("{field}[{i}]"),
                        format!("cell {cell} is {message}"),
                    ));
                }
            }
        }

        errors
    }

    /// Builds the building, replays the configured placements and applies
    /// the active flags.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` met. Call [`SiteConfig::validate`]
    /// first to collect every problem at once.
    pub fn build_building(&self) -> Result<Building, ConfigError> {
        let mut building = Building::from_layout(&self.layout()?);
        for (key, cells) in &self.placements {
            let kind = parse_kind(&format!("placements.{key}"), key)?;
            for &[row, col] in cells {
                let cell = Cell::new(row, col);
                if building.controller(kind).is_some_and(|c| c.contains(cell)) {
                    return Err(ConfigError::new(
                        format!("placements.{key}"),
                        format!("cell {cell} is listed twice"),
                    ));
                }
                if let ToggleOutcome::Rejected(reason) = building.toggle(kind, cell) {
                    return Err(ConfigError::new(
                        format!("placements.{key}"),
                        format!("cell {cell} rejected: {reason}"),
                    ));
                }
            }
        }
        if let Some(active) = self.active_kinds()? {
            for kind in SourceKind::ALL {
                building.set_active(kind, active.contains(&kind));
            }
        }
        debug!(
            building = %building.building_type(),
            units = building.configuration().total_units(),
            "site loaded"
        );
        Ok(building)
    }

    /// Builds a [`Session`] ready for interaction.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` met while resolving prices or the building.
    pub fn build_session(&self) -> Result<Session, ConfigError> {
        Ok(Session::new(self.build_building()?, self.price_table()?))
    }
}
