//! Per-step output record.

use crate::leaf::TeaLeaf;
use crate::quality::{QualityStatus, quality_status};
use crate::sequencer::Sequencer;
use crate::stage::Stage;

/// Snapshot of a batch after one completed step.
///
/// The score is always the instantaneous one, even once the batch has
/// finished and a final score is memoized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub process: Stage,
    pub elapsed_seconds: u32,
    pub moisture: f64,
    pub temperature_c: f64,
    pub aroma: f64,
    pub color: f64,
    pub quality_score: f64,
    pub quality_status: QualityStatus,
}

impl StepRecord {
    /// Column names, in output order.
    pub const HEADER: [&'static str; 8] = [
        "process",
        "elapsedSeconds",
        "moisture",
        "temperatureC",
        "aroma",
        "color",
        "qualityScore",
        "qualityStatus",
    ];

    pub fn capture(seq: &Sequencer) -> Self {
        let TeaLeaf {
            moisture,
            temperature_c,
            aroma,
            color,
        } = *seq.leaf();
        let score = seq.current_quality_score();
        Self {
            process: seq.stage(),
            elapsed_seconds: seq.elapsed_seconds(),
            moisture,
            temperature_c,
            aroma,
            color,
            quality_score: score,
            quality_status: quality_status(score),
        }
    }

    /// Render the fields with fixed precision (6/3/3/3/2 decimals).
    pub fn to_fields(&self) -> [String; 8] {
        [
            self.process.as_str().to_owned(),
            self.elapsed_seconds.to_string(),
            format!("{:.6}", self.moisture),
            format!("{:.3}", self.temperature_c),
            format!("{:.3}", self.aroma),
            format!("{:.3}", self.color),
            format!("{:.2}", self.quality_score),
            self.quality_status.as_str().to_owned(),
        ]
    }
}
