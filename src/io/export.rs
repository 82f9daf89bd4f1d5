//! CSV export for per-kind economic results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::economics::CostBreakdown;

/// Column header for the cost-vs-benefit CSV.
const HEADER: &str = "source,count,total_product_cost,total_installation_cost,\
                       total_maintenance_cost,total_carbon_emissions,total_cost,\
                       annual_savings,payback_years";

/// Exports results to a CSV file at the given path.
///
/// Writes a header row followed by one row per kind in table order.
/// Produces deterministic output for identical inputs.
///
/// # Arguments
///
/// * `results` - Per-kind economic results
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &CostBreakdown, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)?;
    info!(path = %path.display(), rows = results.len(), "results exported");
    Ok(())
}

/// Writes results as CSV to any writer.
///
/// `payback_years` is left empty for kinds that never pay back.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &CostBreakdown, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for (kind, r) in results {
        wtr.write_record(&[
            kind.key().to_string(),
            r.count.to_string(),
            format!("{:.2}", r.total_product_cost),
            format!("{:.2}", r.total_installation_cost),
            format!("{:.2}", r.total_maintenance_cost),
            format!("{:.2}", r.total_carbon_emissions),
            format!("{:.2}", r.total_cost),
            format!("{:.2}", r.annual_savings),
            r.payback_period
                .years()
                .map(|years| format!("{years:.2}"))
                .unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economics::{Configuration, compute_costs};
    use crate::energy::{PriceTable, SourceKind};

    fn results() -> CostBreakdown {
        let config = Configuration::empty()
            .with(SourceKind::SolarPanels, 2)
            .with(SourceKind::HeatPump, 1);
        compute_costs(&PriceTable::standard(), &config)
    }

    fn render(results: &CostBreakdown) -> String {
        let mut buf = Vec::new();
        write_csv(results, &mut buf).ok();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn header_matches_columns() {
        let output = render(&results());
        let first_line = output.lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "source,count,total_product_cost,total_installation_cost,\
             total_maintenance_cost,total_carbon_emissions,total_cost,\
             annual_savings,payback_years"
        );
    }

    #[test]
    fn one_row_per_kind() {
        let output = render(&results());
        // 1 header + 9 kinds
        assert_eq!(output.lines().count(), 10);
    }

    #[test]
    fn no_payback_leaves_column_empty() {
        let output = render(&results());
        let wind = output
            .lines()
            .find(|l| l.starts_with("small_wind_turbines,"))
            .unwrap_or("");
        assert!(wind.ends_with(",0.00,"), "got {wind}");
        let solar = output
            .lines()
            .find(|l| l.starts_with("solar_panels,"))
            .unwrap_or("");
        assert!(solar.ends_with(",150.00,1133.33"), "got {solar}");
    }

    #[test]
    fn deterministic_output() {
        let r = results();
        assert_eq!(render(&r), render(&r));
    }

    #[test]
    fn parses_back() {
        let output = render(&results());
        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(9));
        let mut rows = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref().unwrap();
            for i in 1..8 {
                assert!(rec[i].parse::<f64>().is_ok(), "column {i} should parse");
            }
            rows += 1;
        }
        assert_eq!(rows, 9);
    }
}
