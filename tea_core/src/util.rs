//! Time helpers for the whole-second accumulator.

/// Slack added before flooring banked time, so that e.g. ten 0.1 s deltas
/// (which sum to 0.9999999999999999) still yield one whole tick.
pub const TICK_EPSILON: f64 = 1e-9;

/// Whole seconds contained in `banked`, tolerant of summation error.
/// Non-finite or non-positive input yields 0; huge values saturate.
#[inline]
pub fn whole_seconds(banked: f64) -> u64 {
    if banked.is_nan() || banked <= 0.0 {
        return 0;
    }
    // `as` saturates for out-of-range floats
    (banked + TICK_EPSILON).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::whole_seconds;

    #[test]
    fn floors_with_tolerance() {
        let ten_tenths: f64 = (0..10).map(|_| 0.1).sum();
        assert!(ten_tenths < 1.0);
        assert_eq!(whole_seconds(ten_tenths), 1);
        assert_eq!(whole_seconds(0.999), 0);
        assert_eq!(whole_seconds(2.5), 2);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(whole_seconds(f64::NAN), 0);
        assert_eq!(whole_seconds(-4.0), 0);
        assert_eq!(whole_seconds(0.0), 0);
        assert_eq!(whole_seconds(f64::INFINITY), u64::MAX);
    }
}
