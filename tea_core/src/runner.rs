//! Batch runner: drive one sequencer to completion with a fixed step.

use tea_traits::RecordSink;

use crate::leaf::TeaLeaf;
use crate::profile::ProfileKind;
use crate::quality::QualityStatus;
use crate::record::StepRecord;
use crate::sequencer::Sequencer;

/// Outcome of a completed batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Number of records emitted.
    pub steps: u64,
    pub elapsed_seconds: u32,
    pub profile: ProfileKind,
    pub final_leaf: TeaLeaf,
    pub final_score: f64,
    pub final_status: QualityStatus,
}

impl RunSummary {
    pub fn of(seq: &Sequencer, steps: u64) -> Self {
        Self {
            steps,
            elapsed_seconds: seq.elapsed_seconds(),
            profile: seq.profile(),
            final_leaf: *seq.leaf(),
            final_score: seq.quality_score(),
            final_status: seq.quality_status(),
        }
    }
}

/// Call `step(dt_seconds)` until it reports no progress, handing a record
/// of every completed step to `sink`.
///
/// A `dt_seconds` of 0 makes no progress and returns immediately.
pub fn run<S>(seq: &mut Sequencer, dt_seconds: u32, sink: &mut S) -> RunSummary
where
    S: RecordSink<StepRecord> + ?Sized,
{
    tracing::info!(
        dt_s = dt_seconds,
        profile = %seq.profile(),
        total_s = seq.durations().total(),
        "batch run start"
    );

    let mut steps = 0u64;
    while seq.step(dt_seconds) {
        sink.record(&StepRecord::capture(seq));
        steps += 1;
    }
    sink.flush();

    let summary = RunSummary::of(seq, steps);
    tracing::info!(
        steps,
        elapsed_s = summary.elapsed_seconds,
        quality_score = summary.final_score,
        status = %summary.final_status,
        "batch run complete"
    );
    summary
}
