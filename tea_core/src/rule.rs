//! Per-stage update rules.
//!
//! Every rule is a forward-Euler step of `dt` seconds followed by
//! `normalize`. Rules are plain values; switching stage or profile just
//! builds a new one.

use crate::leaf::{TeaLeaf, normalize};
use crate::profile::{DryingCoeffs, ProfileCoeffs, RollingCoeffs, SteamingCoeffs};
use crate::stage::Stage;

/// The update formula for one working stage together with its coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageRule {
    Steaming(SteamingCoeffs),
    Rolling(RollingCoeffs),
    Drying(DryingCoeffs),
}

/// First-order relaxation of `value` toward `target`.
#[inline]
fn relax(value: f64, target: f64, k: f64, dt: f64) -> f64 {
    value + (target - value) * k * dt
}

/// Growth that slows as `value` approaches the 100 ceiling.
#[inline]
fn saturating_gain(value: f64, rate: f64, dt: f64) -> f64 {
    value + rate * dt * (1.0 - value / 100.0)
}

impl StageRule {
    /// Rule for `stage` drawn from `coeffs`; `None` for `Finished`.
    pub fn for_stage(stage: Stage, coeffs: &ProfileCoeffs) -> Option<StageRule> {
        match stage {
            Stage::Steaming => Some(StageRule::Steaming(coeffs.steaming)),
            Stage::Rolling => Some(StageRule::Rolling(coeffs.rolling)),
            Stage::Drying => Some(StageRule::Drying(coeffs.drying)),
            Stage::Finished => None,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            StageRule::Steaming(_) => Stage::Steaming,
            StageRule::Rolling(_) => Stage::Rolling,
            StageRule::Drying(_) => Stage::Drying,
        }
    }

    /// Advance `leaf` by `dt` seconds. Callers pass `dt > 0`.
    pub fn apply(&self, leaf: &mut TeaLeaf, dt: f64) {
        match self {
            StageRule::Steaming(c) => {
                leaf.temperature_c = relax(leaf.temperature_c, c.target_temp_c, c.heat_k, dt);
                leaf.moisture += c.moisture_gain_per_s * dt;
                leaf.aroma = saturating_gain(leaf.aroma, c.aroma_gain_per_s, dt);
                leaf.color = saturating_gain(leaf.color, c.color_gain_per_s, dt);
            }
            StageRule::Rolling(c) => {
                leaf.temperature_c = relax(leaf.temperature_c, c.target_temp_c, c.cool_k, dt);
                // wetter leaves shed water faster; the 0.4 floor keeps loss going near dry
                leaf.moisture -= c.moisture_loss_k * dt * (0.4 + 0.6 * leaf.moisture);
                leaf.aroma = saturating_gain(leaf.aroma, c.aroma_gain_per_s, dt);
                leaf.color = saturating_gain(leaf.color, c.color_gain_per_s, dt);
            }
            StageRule::Drying(c) => {
                leaf.temperature_c = relax(leaf.temperature_c, c.target_temp_c, c.temp_k, dt);
                leaf.moisture *= (-c.dry_k * dt).exp();
                if leaf.temperature_c > c.overheat_c {
                    leaf.aroma -= c.aroma_damage_k * (leaf.temperature_c - c.overheat_c) * dt;
                } else {
                    leaf.aroma = saturating_gain(leaf.aroma, c.aroma_recover_per_s, dt);
                }
                leaf.color = saturating_gain(leaf.color, c.color_gain_per_s, dt);
            }
        }
        normalize(leaf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ProfileKind, make_profile};

    fn rule(stage: Stage) -> StageRule {
        StageRule::for_stage(stage, &make_profile(ProfileKind::Default)).unwrap()
    }

    #[test]
    fn finished_has_no_rule() {
        assert!(StageRule::for_stage(Stage::Finished, &ProfileCoeffs::default()).is_none());
        for s in Stage::PROCESSING {
            assert_eq!(rule(s).stage(), s);
        }
    }

    #[test]
    fn steaming_one_second_from_stock_state() {
        let mut leaf = TeaLeaf::default();
        rule(Stage::Steaming).apply(&mut leaf, 1.0);
        assert!((leaf.temperature_c - (25.0 + 70.0 * 0.08)).abs() < 1e-12);
        assert!((leaf.moisture - 0.7508).abs() < 1e-12);
        assert!((leaf.aroma - (10.0 + 1.0 * 0.9)).abs() < 1e-12);
        assert!((leaf.color - (10.0 + 0.2 * 0.9)).abs() < 1e-12);
    }

    #[test]
    fn rolling_loses_moisture_faster_when_wet() {
        let r = rule(Stage::Rolling);
        let mut wet = TeaLeaf { moisture: 0.9, ..TeaLeaf::default() };
        let mut dry = TeaLeaf { moisture: 0.1, ..TeaLeaf::default() };
        r.apply(&mut wet, 1.0);
        r.apply(&mut dry, 1.0);
        let wet_loss = 0.9 - wet.moisture;
        let dry_loss = 0.1 - dry.moisture;
        assert!(wet_loss > dry_loss);
        assert!((dry_loss - 0.0015 * (0.4 + 0.06)).abs() < 1e-12);
    }

    #[test]
    fn drying_decays_moisture_exponentially() {
        let mut leaf = TeaLeaf { temperature_c: 60.0, ..TeaLeaf::default() };
        rule(Stage::Drying).apply(&mut leaf, 10.0);
        assert!((leaf.moisture - 0.75 * (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn drying_damages_aroma_when_overheated() {
        let r = rule(Stage::Drying);
        // relax(90 → 60, 0.07, 1s) = 87.9 > 70 → damage 0.02 * 17.9
        let mut hot = TeaLeaf { temperature_c: 90.0, aroma: 50.0, ..TeaLeaf::default() };
        r.apply(&mut hot, 1.0);
        assert!((hot.aroma - (50.0 - 0.02 * 17.9)).abs() < 1e-9);

        let mut cool = TeaLeaf { temperature_c: 60.0, aroma: 50.0, ..TeaLeaf::default() };
        r.apply(&mut cool, 1.0);
        assert!((cool.aroma - (50.0 + 0.2 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn results_are_normalized() {
        let mut leaf = TeaLeaf { moisture: 0.9999, aroma: 99.99, color: 99.99, temperature_c: 25.0 };
        rule(Stage::Steaming).apply(&mut leaf, 5.0);
        assert!(leaf.in_bounds());
        assert_eq!(leaf.moisture, 1.0);
    }
}
