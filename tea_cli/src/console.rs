//! Per-step console lines.

use std::io::Write;

use tea_core::{Stage, StepRecord};
use tea_traits::RecordSink;

/// Width of the bracketed stage label column.
const LABEL_WIDTH: usize = 11;

/// `[STEAMING] t=30s moisture=0.78 temp=95.0 aroma=40.0 color=10.0`
pub fn format_line(record: &StepRecord) -> String {
    format!(
        "{:<width$}t={}s moisture={:.2} temp={:.1} aroma={:.1} color={:.1}",
        label(record.process),
        record.elapsed_seconds,
        record.moisture,
        record.temperature_c,
        record.aroma,
        record.color,
        width = LABEL_WIDTH,
    )
}

fn label(stage: Stage) -> String {
    format!("[{}]", stage.as_str())
}

/// Writes one line per record; write errors disable the sink.
pub struct ConsoleSink<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }
}

impl<W: Write> RecordSink<StepRecord> for ConsoleSink<W> {
    fn record(&mut self, record: &StepRecord) {
        if self.failed {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", format_line(record)) {
            tracing::warn!(error = %e, "console write failed; step lines disabled");
            self.failed = true;
        }
    }

    fn flush(&mut self) {
        if !self.failed {
            let _ = self.out.flush();
        }
    }
}
