use rstest::rstest;
use tea_core::{QualityStatus, quality_score, quality_status};

#[rstest]
fn stock_leaf_scores_thirteen() {
    let expected = 10.0 * 0.4 + 10.0 * 0.4 + (1.0 - 0.75) * 100.0 * 0.2;
    assert!((quality_score(0.75, 10.0, 10.0) - expected).abs() < 1e-12);
    assert!((expected - 13.0).abs() < 1e-12);
}

#[rstest]
#[case(0.0, -1000.0, 0.0, 0.0)]
#[case(1.0, 0.0, 0.0, 0.0)]
#[case(0.0, 1000.0, 1000.0, 100.0)]
#[case(0.0, 100.0, 100.0, 100.0)]
fn score_is_clamped(
    #[case] moisture: f64,
    #[case] aroma: f64,
    #[case] color: f64,
    #[case] expected: f64,
) {
    assert_eq!(quality_score(moisture, aroma, color), expected);
}

#[rstest]
#[case(100.0, QualityStatus::Good)]
#[case(80.0, QualityStatus::Good)]
#[case(79.999, QualityStatus::Ok)]
#[case(60.0, QualityStatus::Ok)]
#[case(59.999, QualityStatus::Bad)]
#[case(0.0, QualityStatus::Bad)]
fn thresholds_are_inclusive(#[case] score: f64, #[case] status: QualityStatus) {
    assert_eq!(quality_status(score), status);
}

#[rstest]
fn status_strings() {
    assert_eq!(QualityStatus::Good.to_string(), "GOOD");
    assert_eq!(QualityStatus::Ok.to_string(), "OK");
    assert_eq!(QualityStatus::Bad.to_string(), "BAD");
}
