//! Per-kind cost, savings and payback.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::energy::{EnergySourceSpec, PriceTable, SourceKind};

/// Installed unit count per kind. Kinds never set count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Configuration {
    counts: BTreeMap<SourceKind, usize>,
}

impl Configuration {
    /// A configuration with zero units of every kind.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: impl IntoIterator<Item = (SourceKind, usize)>) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    pub fn with(mut self, kind: SourceKind, count: usize) -> Self {
        self.set(kind, count);
        self
    }

    pub fn set(&mut self, kind: SourceKind, count: usize) {
        self.counts.insert(kind, count);
    }

    pub fn count(&self, kind: SourceKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Every kind with its count, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceKind, usize)> + '_ {
        SourceKind::ALL.into_iter().map(|kind| (kind, self.count(kind)))
    }

    /// Total units across all kinds.
    pub fn total_units(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Years needed for savings to cover the total cost.
///
/// `NoPayback` stands in for any non-finite ratio (no units, or a kind that
/// saves nothing). It renders as "0 years" and serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payback {
    Years(f64),
    NoPayback,
}

impl Payback {
    /// `total_cost / annual_savings`, or `NoPayback` when that is not finite.
    pub fn from_ratio(total_cost: f64, annual_savings: f64) -> Self {
        let years = total_cost / annual_savings;
        if years.is_finite() {
            Payback::Years(years)
        } else {
            Payback::NoPayback
        }
    }

    pub fn years(self) -> Option<f64> {
        match self {
            Payback::Years(years) => Some(years),
            Payback::NoPayback => None,
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Years(years) => write!(f, "{years:.2} years"),
            Payback::NoPayback => f.write_str("0 years"),
        }
    }
}

impl Serialize for Payback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.years().serialize(serializer)
    }
}

/// Derived economics for one kind at one unit count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicResult {
    pub count: usize,
    pub total_product_cost: f64,
    pub total_installation_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_carbon_emissions: f64,
    pub total_cost: f64,
    pub annual_savings: f64,
    pub payback_period: Payback,
}

impl EconomicResult {
    /// Scales `spec` by `count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use renewables_planner::economics::cost::{EconomicResult, Payback};
    /// use renewables_planner::energy::{PriceTable, SourceKind};
    ///
    /// let prices = PriceTable::standard();
    /// let spec = prices.get(SourceKind::SolarPanels).unwrap();
    /// let result = EconomicResult::for_count(spec, 3);
    /// assert_eq!(result.total_cost, 255_000.0);
    /// assert_eq!(EconomicResult::for_count(spec, 0).payback_period, Payback::NoPayback);
    /// ```
    pub fn for_count(spec: &EnergySourceSpec, count: usize) -> Self {
        let n = count as f64;
        let total_product_cost = spec.product_cost * n;
        let total_installation_cost = spec.installation * n;
        let total_maintenance_cost = spec.maintenance * n;
        let total_cost = total_product_cost + total_installation_cost + total_maintenance_cost;
        let annual_savings = spec.energy_production * spec.electricity_cost * n;

        Self {
            count,
            total_product_cost,
            total_installation_cost,
            total_maintenance_cost,
            total_carbon_emissions: spec.carbon_emissions * n,
            total_cost,
            annual_savings,
            payback_period: Payback::from_ratio(total_cost, annual_savings),
        }
    }
}

/// Economic results keyed by kind.
pub type CostBreakdown = BTreeMap<SourceKind, EconomicResult>;

/// Computes the result of every kind in `configuration`.
///
/// Kinds missing from `prices` are left out with a warning; the rest of the
/// computation carries on.
pub fn compute_costs(prices: &PriceTable, configuration: &Configuration) -> CostBreakdown {
    let mut results = CostBreakdown::new();
    for (kind, count) in configuration.iter() {
        match prices.get(kind) {
            Some(spec) => {
                results.insert(kind, EconomicResult::for_count(spec, count));
            }
            None => {
                warn!(kind = kind.key(), count, "no price entry, skipping");
            }
        }
    }
    results
}
