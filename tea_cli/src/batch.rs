//! `run` subcommand: fixed-step batch driver.

use serde_json::json;
use tea_core::{RunSummary, Sequencer, StepRecord, run};
use tea_traits::{NullSink, RecordSink};

/// Run `count` copies of `prototype` to completion with `dt_seconds`.
///
/// Only the first (primary) batch feeds `primary_sink`; the others run
/// silently. Summaries come back in batch order.
pub fn run_batches(
    prototype: &Sequencer,
    dt_seconds: u32,
    count: usize,
    primary_sink: &mut dyn RecordSink<StepRecord>,
) -> Vec<RunSummary> {
    let mut summaries = Vec::with_capacity(count.max(1));
    for index in 0..count.max(1) {
        let mut seq = prototype.clone();
        let summary = if index == 0 {
            run(&mut seq, dt_seconds, &mut *primary_sink)
        } else {
            run(&mut seq, dt_seconds, &mut NullSink)
        };
        tracing::debug!(
            batch = index,
            quality_score = summary.final_score,
            status = %summary.final_status,
            "batch done"
        );
        summaries.push(summary);
    }
    summaries
}

/// One-line JSON summary printed with `--json`.
pub fn summary_json(summaries: &[RunSummary]) -> serde_json::Value {
    let primary = summaries.first();
    let finals: Vec<serde_json::Value> = summaries
        .iter()
        .enumerate()
        .map(|(batch, s)| {
            json!({
                "batch": batch,
                "moisture": s.final_leaf.moisture,
                "temperature_c": s.final_leaf.temperature_c,
                "aroma": s.final_leaf.aroma,
                "color": s.final_leaf.color,
                "quality_score": s.final_score,
                "quality_status": s.final_status.as_str(),
            })
        })
        .collect();
    json!({
        "profile": primary.map(|s| s.profile.as_str()),
        "batches": summaries.len(),
        "elapsed_seconds": primary.map(|s| s.elapsed_seconds),
        "steps": primary.map(|s| s.steps),
        "final": finals,
    })
}
