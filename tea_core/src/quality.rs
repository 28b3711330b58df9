//! Finished-product quality score and its GOOD/OK/BAD classification.

use std::fmt;

use crate::leaf::clamp;

/// Scores at or above this are GOOD.
pub const GOOD_THRESHOLD: f64 = 80.0;
/// Scores at or above this (and below GOOD) are OK.
pub const OK_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityStatus {
    Good,
    Ok,
    Bad,
}

impl QualityStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            QualityStatus::Good => "GOOD",
            QualityStatus::Ok => "OK",
            QualityStatus::Bad => "BAD",
        }
    }
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `aroma·0.4 + color·0.4 + (1 − moisture)·100·0.2`, clamped to [0, 100].
#[inline]
pub fn quality_score(moisture: f64, aroma: f64, color: f64) -> f64 {
    let score = aroma * 0.4 + color * 0.4 + (1.0 - moisture) * 100.0 * 0.2;
    clamp(score, 0.0, 100.0)
}

/// Both thresholds are inclusive.
#[inline]
pub fn quality_status(score: f64) -> QualityStatus {
    if score >= GOOD_THRESHOLD {
        QualityStatus::Good
    } else if score >= OK_THRESHOLD {
        QualityStatus::Ok
    } else {
        QualityStatus::Bad
    }
}
