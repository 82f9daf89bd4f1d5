//! Record sinks and the save operation.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::economics::AnalysisReport;

use super::records::{Record, records_for};

/// Failure while handing records to a sink.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("record store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("record could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for saved analysis records.
pub trait RecordSink {
    /// Accepts one record.
    ///
    /// # Errors
    ///
    /// Returns a `PersistError` if the record could not be stored.
    fn send(&mut self, record: &Record) -> Result<(), PersistError>;

    /// Pushes buffered records out. The default does nothing.
    ///
    /// # Errors
    ///
    /// Returns a `PersistError` if the flush fails.
    fn flush(&mut self) -> Result<(), PersistError> {
        Ok(())
    }
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Opens `path` for appending, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns a `PersistError` if the file cannot be opened.
    pub fn append(path: &Path) -> Result<Self, PersistError> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn send(&mut self, record: &Record) -> Result<(), PersistError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), PersistError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps records in memory. Can be told to fail after a number of sends.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<Record>,
    fail_after: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that accepts `n` records and fails every later send.
    pub fn failing_after(n: usize) -> Self {
        Self {
            records: Vec::new(),
            fail_after: Some(n),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl RecordSink for MemorySink {
    fn send(&mut self, record: &Record) -> Result<(), PersistError> {
        if self.fail_after.is_some_and(|n| self.records.len() >= n) {
            let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "record store unavailable");
            return Err(refused.into());
        }
        self.records.push(record.clone());
        Ok(())
    }
}

/// Sends the records of `report` for `user_id` to `sink`.
///
/// Stops at the first failure with no retry; records already sent stay sent.
/// The report itself is never touched. Returns the number of records sent.
///
/// # Errors
///
/// Returns the first `PersistError` raised by the sink.
pub fn save_analysis(
    report: &AnalysisReport,
    user_id: &str,
    sink: &mut impl RecordSink,
) -> Result<usize, PersistError> {
    let records = records_for(report, user_id);
    let result = records
        .iter()
        .try_for_each(|record| sink.send(record))
        .and_then(|()| sink.flush());
    match result {
        Ok(()) => {
            info!(user_id, records = records.len(), "analysis saved");
            Ok(records.len())
        }
        Err(e) => {
            warn!(user_id, error = %e, "failed to save analysis");
            Err(e)
        }
    }
}
