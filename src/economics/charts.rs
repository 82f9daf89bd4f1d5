//! Chart-ready projections of a cost breakdown.
//!
//! These are pure views over [`CostBreakdown`] and [`Totals`]; they hold no
//! state of their own and are rebuilt with every report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::energy::{Category, SourceKind};

use super::cost::CostBreakdown;
use super::rollup::Totals;

/// Fraction of total cost plotted as estimated savings in the cost-vs-savings chart.
pub const ESTIMATED_SAVINGS_RATIO: f64 = 0.2;

/// One bar group of the cost-vs-savings chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSavingsPoint {
    pub kind: SourceKind,
    pub name: &'static str,
    pub total_cost: f64,
    pub annual_savings: f64,
    pub estimated_savings: f64,
}

/// One slice of the cost breakdown pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostShare {
    pub name: &'static str,
    pub value: f64,
    /// Share of the total in percent, zero when the total is zero.
    pub percent: f64,
}

/// Emissions of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEmissions {
    pub category: Category,
    pub label: &'static str,
    pub emissions: f64,
}

/// Every series the analysis view draws.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub cost_vs_savings: Vec<CostSavingsPoint>,
    pub cost_breakdown: Vec<CostShare>,
    pub emissions_by_category: Vec<CategoryEmissions>,
}

impl ChartSeries {
    pub fn build(
        results: &CostBreakdown,
        totals: &Totals,
        categories: &BTreeMap<Category, f64>,
    ) -> Self {
        Self {
            cost_vs_savings: cost_vs_savings(results),
            cost_breakdown: cost_breakdown(totals),
            emissions_by_category: emissions_series(categories),
        }
    }
}

/// One point per kind in table order.
pub fn cost_vs_savings(results: &CostBreakdown) -> Vec<CostSavingsPoint> {
    results
        .iter()
        .map(|(kind, result)| CostSavingsPoint {
            kind: *kind,
            name: kind.display_name(),
            total_cost: result.total_cost,
            annual_savings: result.annual_savings,
            estimated_savings: result.total_cost * ESTIMATED_SAVINGS_RATIO,
        })
        .collect()
}

/// Product, installation and maintenance slices.
pub fn cost_breakdown(totals: &Totals) -> Vec<CostShare> {
    let slices = [
        ("Product Cost", totals.total_product_cost),
        ("Installation Cost", totals.total_installation_cost),
        ("Maintenance Cost", totals.total_maintenance_cost),
    ];
    let sum: f64 = slices.iter().map(|(_, value)| value).sum();
    slices
        .into_iter()
        .map(|(name, value)| CostShare {
            name,
            value,
            percent: if sum > 0.0 { 100.0 * value / sum } else { 0.0 },
        })
        .collect()
}

pub fn emissions_series(categories: &BTreeMap<Category, f64>) -> Vec<CategoryEmissions> {
    categories
        .iter()
        .map(|(category, emissions)| CategoryEmissions {
            category: *category,
            label: category.label(),
            emissions: *emissions,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economics::cost::{Configuration, compute_costs};
    use crate::economics::rollup::emissions_by_category;
    use crate::energy::PriceTable;

    fn sample() -> (CostBreakdown, Totals) {
        let config = Configuration::empty()
            .with(SourceKind::SolarPanels, 2)
            .with(SourceKind::HeatPump, 1);
        let results = compute_costs(&PriceTable::standard(), &config);
        let totals = Totals::from_results(&results);
        (results, totals)
    }

    #[test]
    fn estimated_savings_is_a_fifth_of_cost() {
        let (results, _) = sample();
        let series = cost_vs_savings(&results);
        assert_eq!(series.len(), 9);
        let solar = series
            .iter()
            .find(|p| p.kind == SourceKind::SolarPanels)
            .unwrap();
        assert_eq!(solar.name, "Solar Panels");
        assert_eq!(solar.estimated_savings, 34_000.0);
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let (_, totals) = sample();
        let shares = cost_breakdown(&totals);
        assert_eq!(shares.len(), 3);
        let sum: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(shares[2].value, 40_000.0);
    }

    #[test]
    fn empty_totals_give_zero_shares() {
        let shares = cost_breakdown(&Totals::default());
        assert!(shares.iter().all(|s| s.percent == 0.0 && s.value == 0.0));
    }

    #[test]
    fn category_series_lists_every_category() {
        let (results, totals) = sample();
        let categories = emissions_by_category(&PriceTable::standard(), &results);
        let charts = ChartSeries::build(&results, &totals, &categories);
        assert_eq!(charts.emissions_by_category.len(), Category::ALL.len());
        let geo = charts
            .emissions_by_category
            .iter()
            .find(|c| c.category == Category::Geothermal)
            .unwrap();
        assert_eq!(geo.emissions, 10.0);
        assert_eq!(geo.label, "Geothermal Energy");
    }
}
