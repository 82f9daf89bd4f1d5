//! Record shapes handed to a sink when an analysis is saved.

use serde::Serialize;

use crate::economics::AnalysisReport;

/// Summed cost components of one saved analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAnalysisRecord {
    #[serde(rename = "user_id")]
    pub user_id: String,
    pub total_product_cost: f64,
    pub total_installation_cost: f64,
    pub total_maintenance_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CarbonAnalysisRecord {
    #[serde(rename = "user_id")]
    pub user_id: String,
    pub carbon_payback_period: f64,
    pub total_carbon_emission: f64,
}

/// Emissions of one category. Only categories with non-zero emissions are saved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnergyUsageRecord {
    #[serde(rename = "user_id")]
    pub user_id: String,
    /// Category label, e.g. `"Solar Energy"`.
    #[serde(rename = "Type")]
    pub category: String,
    pub emissions: f64,
}

/// Any record a sink accepts, tagged with its destination collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record {
    CostAnalysis(CostAnalysisRecord),
    CarbonAnalysis(CarbonAnalysisRecord),
    EnergyUsage(EnergyUsageRecord),
}

impl Record {
    /// Destination collection name.
    pub fn collection(&self) -> &'static str {
        match self {
            Record::CostAnalysis(_) => "cost_analysis",
            Record::CarbonAnalysis(_) => "carbon_analysis",
            Record::EnergyUsage(_) => "energy_usage",
        }
    }
}

/// Records for `report` in save order: cost, carbon, then one energy-usage
/// record per emitting category.
pub fn records_for(report: &AnalysisReport, user_id: &str) -> Vec<Record> {
    let t = &report.totals;
    let mut records = vec![
        Record::CostAnalysis(CostAnalysisRecord {
            user_id: user_id.to_string(),
            total_product_cost: t.total_product_cost,
            total_installation_cost: t.total_installation_cost,
            total_maintenance_cost: t.total_maintenance_cost,
        }),
        Record::CarbonAnalysis(CarbonAnalysisRecord {
            user_id: user_id.to_string(),
            carbon_payback_period: t.carbon_payback_period,
            total_carbon_emission: t.total_carbon_emissions,
        }),
    ];
    records.extend(report.emitting_categories().map(|(category, emissions)| {
        Record::EnergyUsage(EnergyUsageRecord {
            user_id: user_id.to_string(),
            category: category.label().to_string(),
            emissions,
        })
    }));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economics::Configuration;
    use crate::energy::{PriceTable, SourceKind};

    #[test]
    fn field_names_match_the_store() {
        let config = Configuration::empty().with(SourceKind::SolarPanels, 1);
        let report = AnalysisReport::compute(&PriceTable::standard(), &config);
        let records = records_for(&report, "u-7");
        let json: Vec<serde_json::Value> = records
            .iter()
            .map(|r| serde_json::to_value(r).unwrap())
            .collect();

        assert_eq!(json[0]["record"], "cost_analysis");
        assert_eq!(json[0]["user_id"], "u-7");
        assert_eq!(json[0]["TotalProductCost"], 30_000.0);
        assert_eq!(json[1]["CarbonPaybackPeriod"], 0.04);
        assert_eq!(json[1]["TotalCarbonEmission"], 40.0);
        assert_eq!(json[2]["Type"], "Solar Energy");
        assert_eq!(json[2]["Emissions"], 40.0);
    }

    #[test]
    fn zero_emission_categories_are_not_saved() {
        let config = Configuration::empty().with(SourceKind::SolarWaterHeating, 3);
        let report = AnalysisReport::compute(&PriceTable::standard(), &config);
        let records = records_for(&report, "u");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.collection() != "energy_usage"));
    }
}
