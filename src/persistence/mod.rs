//! Saving analyses to an external record store.

pub mod records;
pub mod sink;

pub use records::{CarbonAnalysisRecord, CostAnalysisRecord, EnergyUsageRecord, Record, records_for};
pub use sink::{JsonLinesSink, MemorySink, PersistError, RecordSink, save_analysis};
