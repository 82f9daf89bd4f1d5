//! Cross-kind totals and category grouping.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::energy::{Category, PriceTable};

use super::cost::CostBreakdown;

/// Divisor turning total embodied emissions into the carbon payback figure.
pub const CARBON_PAYBACK_DIVISOR: f64 = 1000.0;

/// Sums across every kind in a [`CostBreakdown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_product_cost: f64,
    pub total_installation_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_carbon_emissions: f64,
    pub total_cost: f64,
    pub total_annual_savings: f64,
    pub carbon_payback_period: f64,
}

impl Totals {
    pub fn from_results(results: &CostBreakdown) -> Self {
        let mut totals = Totals::default();
        for result in results.values() {
            totals.total_product_cost += result.total_product_cost;
            totals.total_installation_cost += result.total_installation_cost;
            totals.total_maintenance_cost += result.total_maintenance_cost;
            totals.total_carbon_emissions += result.total_carbon_emissions;
            totals.total_annual_savings += result.annual_savings;
        }
        totals.total_cost = totals.total_product_cost
            + totals.total_installation_cost
            + totals.total_maintenance_cost;
        totals.carbon_payback_period = carbon_payback_period(totals.total_carbon_emissions);
        totals
    }
}

/// `total_carbon_emissions / 1000`, rounded to two decimals.
pub fn carbon_payback_period(total_carbon_emissions: f64) -> f64 {
    round2(total_carbon_emissions / CARBON_PAYBACK_DIVISOR)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Accumulates each kind's emissions into its category.
///
/// Every category appears, zero when nothing contributes. Kinds without a
/// price entry are skipped with a warning.
pub fn emissions_by_category(prices: &PriceTable, results: &CostBreakdown) -> BTreeMap<Category, f64> {
    let mut buckets: BTreeMap<Category, f64> =
        Category::ALL.into_iter().map(|category| (category, 0.0)).collect();
    for (kind, result) in results {
        let Some(spec) = prices.get(*kind) else {
            warn!(kind = kind.key(), "no price entry, category unknown");
            continue;
        };
        *buckets.entry(spec.category).or_default() += result.total_carbon_emissions;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economics::cost::{Configuration, EconomicResult, compute_costs};
    use crate::energy::SourceKind;

    #[test]
    fn grand_total_for_solar_and_heat_pump() {
        let prices = PriceTable::standard();
        let config = Configuration::empty()
            .with(SourceKind::SolarPanels, 2)
            .with(SourceKind::HeatPump, 1);
        let results = compute_costs(&prices, &config);
        let totals = Totals::from_results(&results);

        let summed: f64 = results.values().map(|r| r.total_cost).sum();
        assert_eq!(totals.total_cost, summed);
        assert_eq!(totals.total_cost, 530_000.0);
        assert_eq!(totals.total_product_cost, 210_000.0);
        assert_eq!(totals.total_installation_cost, 280_000.0);
        assert_eq!(totals.total_maintenance_cost, 40_000.0);
        assert_eq!(totals.total_carbon_emissions, 90.0);
        assert_eq!(totals.carbon_payback_period, 0.09);
    }

    #[test]
    fn carbon_payback_rounds_to_cents() {
        assert_eq!(carbon_payback_period(4000.0), 4.0);
        assert_eq!(carbon_payback_period(1234.0), 1.23);
        assert_eq!(carbon_payback_period(1235.6), 1.24);
        assert_eq!(carbon_payback_period(0.0), 0.0);
    }

    #[test]
    fn heat_pump_and_solar_fill_two_buckets() {
        let prices = PriceTable::standard();
        let config = Configuration::empty()
            .with(SourceKind::SolarPanels, 3)
            .with(SourceKind::HeatPump, 2);
        let results = compute_costs(&prices, &config);
        let buckets = emissions_by_category(&prices, &results);

        let non_zero: Vec<_> = buckets.iter().filter(|(_, v)| **v > 0.0).collect();
        assert_eq!(non_zero.len(), 2);
        assert_eq!(buckets[&Category::Solar], 120.0);
        assert_eq!(buckets[&Category::Geothermal], 20.0);
        assert_eq!(buckets[&Category::Wind], 0.0);
    }

    #[test]
    fn solar_kinds_share_a_bucket() {
        let prices = PriceTable::standard();
        let config = Configuration::empty()
            .with(SourceKind::SolarPanels, 1)
            .with(SourceKind::SolarRoofTiles, 2);
        let results = compute_costs(&prices, &config);
        let buckets = emissions_by_category(&prices, &results);
        assert_eq!(buckets[&Category::Solar], 120.0);
    }

    #[test]
    fn unpriced_result_is_skipped_in_grouping() {
        let prices = PriceTable::standard().without(SourceKind::HeatPump);
        let full = PriceTable::standard();
        let mut results = CostBreakdown::new();
        results.insert(
            SourceKind::HeatPump,
            EconomicResult::for_count(full.get(SourceKind::HeatPump).unwrap(), 4),
        );
        let buckets = emissions_by_category(&prices, &results);
        assert!(buckets.values().all(|v| *v == 0.0));
    }
}
