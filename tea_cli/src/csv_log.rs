//! CSV output of per-step records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tea_core::StepRecord;
use tea_traits::RecordSink;

/// Writes `StepRecord`s as CSV rows, header first.
///
/// The header goes out at most once per stream. The first write failure is
/// logged and disables the sink; the simulation never sees it.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
    failed: bool,
}

impl CsvSink<File> {
    /// Create (or truncate) `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(inner),
            header_written: false,
            failed: false,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.failed
    }

    /// Emit the header row unless it has already been attempted.
    pub fn write_header(&mut self) {
        if self.header_written || self.failed {
            return;
        }
        // Marked before writing so a failed attempt is not repeated
        self.header_written = true;
        let res = self.writer.write_record(StepRecord::HEADER);
        self.check(res);
    }

    pub fn write_record(&mut self, record: &StepRecord) {
        self.write_header();
        if self.failed {
            return;
        }
        let res = self.writer.write_record(record.to_fields());
        self.check(res);
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Option<W> {
        self.writer.into_inner().ok()
    }

    fn check(&mut self, res: csv::Result<()>) {
        if let Err(e) = res {
            tracing::warn!(error = %e, "CSV write failed; further rows are dropped");
            self.failed = true;
        }
    }
}

impl<W: Write> RecordSink<StepRecord> for CsvSink<W> {
    fn record(&mut self, record: &StepRecord) {
        self.write_record(record);
    }

    fn flush(&mut self) {
        if self.failed {
            return;
        }
        if let Err(e) = self.writer.flush() {
            tracing::warn!(error = %e, "CSV flush failed; further rows are dropped");
            self.failed = true;
        }
    }
}
