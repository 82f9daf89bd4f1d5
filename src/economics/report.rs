//! Full analysis snapshot produced from a configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::energy::{Category, PriceTable, SourceKind};

use super::charts::ChartSeries;
use super::cost::{Configuration, CostBreakdown, EconomicResult, compute_costs};
use super::rollup::{Totals, emissions_by_category};

/// Per-kind results, rollups and chart series for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub results: CostBreakdown,
    pub totals: Totals,
    pub emissions_by_category: BTreeMap<Category, f64>,
    pub charts: ChartSeries,
}

impl AnalysisReport {
    /// Runs the aggregator and every rollup over `configuration`.
    pub fn compute(prices: &PriceTable, configuration: &Configuration) -> Self {
        let results = compute_costs(prices, configuration);
        let totals = Totals::from_results(&results);
        let emissions_by_category = emissions_by_category(prices, &results);
        let charts = ChartSeries::build(&results, &totals, &emissions_by_category);
        Self {
            results,
            totals,
            emissions_by_category,
            charts,
        }
    }

    /// Categories with non-zero emissions, in category order.
    pub fn emitting_categories(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.emissions_by_category
            .iter()
            .filter(|(_, emissions)| **emissions != 0.0)
            .map(|(category, emissions)| (*category, *emissions))
    }

    pub fn result(&self, kind: SourceKind) -> Option<&EconomicResult> {
        self.results.get(&kind)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Cost vs Benefit ---")?;
        writeln!(
            f,
            "{:<28} {:>5} {:>14} {:>12} {:>18}",
            "Source", "Count", "Total cost", "Savings/yr", "Payback"
        )?;
        for (kind, result) in &self.results {
            writeln!(
                f,
                "{:<28} {:>5} {:>14.2} {:>12.2} {:>18}",
                kind.display_name(),
                result.count,
                result.total_cost,
                result.annual_savings,
                result.payback_period.to_string()
            )?;
        }

        let t = &self.totals;
        writeln!(f)?;
        writeln!(f, "--- Cost Breakdown ---")?;
        writeln!(f, "Product cost:          {:.2}", t.total_product_cost)?;
        writeln!(f, "Installation cost:     {:.2}", t.total_installation_cost)?;
        writeln!(f, "Maintenance cost:      {:.2}", t.total_maintenance_cost)?;

        writeln!(f)?;
        writeln!(f, "--- Carbon ---")?;
        writeln!(f, "Total emissions:       {:.2} kg", t.total_carbon_emissions)?;
        writeln!(f, "Carbon payback:        {:.2}", t.carbon_payback_period)?;
        for (category, emissions) in self.emitting_categories() {
            writeln!(f, "  {:<20} {:.2} kg", category.label(), emissions)?;
        }

        writeln!(f)?;
        write!(f, "Grand total:           {:.2}", t.total_cost)
    }
}
