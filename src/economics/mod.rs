//! Techno-economic aggregation: per-kind costs, rollups and chart views.

pub mod charts;
pub mod cost;
pub mod report;
/// Totals, carbon payback and category grouping.
pub mod rollup;

pub use charts::ChartSeries;
pub use cost::{Configuration, CostBreakdown, EconomicResult, Payback, compute_costs};
pub use report::AnalysisReport;
pub use rollup::{Totals, carbon_payback_period, emissions_by_category};
