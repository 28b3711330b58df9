//! The stage sequencer: one batch moving through the pipeline.
//!
//! Owns the leaf state, the active stage and its rule, the whole-second
//! counters and the memoized final score. Two ways to advance it:
//!
//! - `step(dt)`: one rule application of at most `dt` seconds, never crossing
//!   a stage boundary. The batch runner calls this in a loop.
//! - `update(delta)`: banks fractional wall-clock seconds and spends every
//!   whole second as a unit tick, splitting across as many boundaries as
//!   needed. Slicing a total into any number of calls gives the same result.

use crate::config::StageDurations;
use crate::leaf::TeaLeaf;
use crate::profile::{ProfileCoeffs, ProfileKind, make_profile};
use crate::quality::{QualityStatus, quality_score, quality_status};
use crate::rule::StageRule;
use crate::stage::Stage;
use crate::util::whole_seconds;

/// A single batch and its position in the pipeline.
#[derive(Debug, Clone)]
pub struct Sequencer {
    durations: StageDurations,
    profile: ProfileKind,
    coeffs: ProfileCoeffs,
    initial: TeaLeaf,

    leaf: TeaLeaf,
    stage: Stage,
    // None only while Finished
    rule: Option<StageRule>,
    stage_elapsed_s: u32,
    elapsed_s: u32,
    // Fractional seconds banked by `update`, always in [0, 1) between calls
    banked_s: f64,
    // Committed exactly once, on entering Finished
    final_score: Option<f64>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(StageDurations::default(), ProfileKind::Default)
    }
}

impl Sequencer {
    /// Fresh batch with the stock initial leaf.
    ///
    /// Durations are taken as given; use `Sequencer::builder()` for checked
    /// construction.
    pub fn new(durations: StageDurations, profile: ProfileKind) -> Self {
        Self::with_initial_leaf(durations, profile, TeaLeaf::default())
    }

    /// Fresh batch starting from `initial` (normalized on entry).
    pub fn with_initial_leaf(
        durations: StageDurations,
        profile: ProfileKind,
        initial: TeaLeaf,
    ) -> Self {
        let coeffs = make_profile(profile);
        let initial = initial.normalized();
        Self {
            durations,
            profile,
            coeffs,
            initial,
            leaf: initial,
            stage: Stage::Steaming,
            rule: StageRule::for_stage(Stage::Steaming, &coeffs),
            stage_elapsed_s: 0,
            elapsed_s: 0,
            banked_s: 0.0,
            final_score: None,
        }
    }

    /// Start building a checked `Sequencer`.
    pub fn builder() -> crate::builder::SequencerBuilder {
        crate::builder::SequencerBuilder::default()
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn leaf(&self) -> &TeaLeaf {
        &self.leaf
    }

    pub fn profile(&self) -> ProfileKind {
        self.profile
    }

    pub fn coefficients(&self) -> &ProfileCoeffs {
        &self.coeffs
    }

    pub fn durations(&self) -> &StageDurations {
        &self.durations
    }

    /// Rule that the next tick will apply; `None` once finished.
    pub fn active_rule(&self) -> Option<&StageRule> {
        self.rule.as_ref()
    }

    /// Whole seconds simulated since construction or reset.
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_s
    }

    /// Whole seconds spent in the current stage.
    pub fn stage_elapsed_seconds(&self) -> u32 {
        self.stage_elapsed_s
    }

    /// Seconds left in the current stage (0 when finished or exhausted).
    pub fn stage_remaining_seconds(&self) -> u32 {
        self.durations
            .for_stage(self.stage)
            .saturating_sub(self.stage_elapsed_s)
    }

    pub fn is_finished(&self) -> bool {
        self.stage.is_terminal()
    }

    /// Score of the current leaf state, regardless of stage.
    pub fn current_quality_score(&self) -> f64 {
        quality_score(self.leaf.moisture, self.leaf.aroma, self.leaf.color)
    }

    /// The memoized score once finished; the instantaneous score before.
    pub fn quality_score(&self) -> f64 {
        self.final_score
            .unwrap_or_else(|| self.current_quality_score())
    }

    pub fn quality_status(&self) -> QualityStatus {
        quality_status(self.quality_score())
    }

    /// Score committed on entering `Finished`, if that has happened.
    pub fn final_quality_score(&self) -> Option<f64> {
        self.final_score
    }

    // ── Mutation ─────────────────────────────────────────────────────────────

    /// Advance by one step of at most `dt_seconds`, clipped to what is left
    /// of the current stage.
    ///
    /// Returns `false` without touching state when `dt_seconds == 0` or the
    /// batch is finished, and `false` when this call is the one that moves
    /// an exhausted Drying stage into `Finished`.
    pub fn step(&mut self, dt_seconds: u32) -> bool {
        if dt_seconds == 0 || self.is_finished() {
            return false;
        }
        if !self.settle_stage() {
            return false;
        }
        let dt = dt_seconds.min(self.stage_remaining_seconds());
        self.apply(dt);
        true
    }

    /// Feed `delta_seconds` of (possibly fractional) time.
    ///
    /// Whole seconds are spent immediately as unit ticks; the fraction is
    /// banked for the next call. Time past the end of the pipeline is
    /// dropped. Non-positive or NaN deltas are ignored.
    pub fn update(&mut self, delta_seconds: f64) {
        if delta_seconds.is_nan() || delta_seconds <= 0.0 || self.is_finished() {
            return;
        }
        self.banked_s += delta_seconds;
        let mut budget = whole_seconds(self.banked_s);
        if budget == 0 {
            return;
        }
        self.banked_s = (self.banked_s - budget as f64).max(0.0);

        while budget > 0 && self.settle_stage() {
            let chunk = budget.min(u64::from(self.stage_remaining_seconds()));
            for _ in 0..chunk {
                self.apply(1);
            }
            budget -= chunk;
        }
        self.settle_stage();
        if self.is_finished() {
            self.banked_s = 0.0;
        }
    }

    /// Swap coefficient sets in place. Only the active rule is rebuilt; the
    /// stage and every counter are kept. Later stages pick the new profile
    /// up when they are entered.
    pub fn set_profile(&mut self, profile: ProfileKind) {
        if profile == self.profile {
            return;
        }
        self.profile = profile;
        self.coeffs = make_profile(profile);
        self.rule = StageRule::for_stage(self.stage, &self.coeffs);
        tracing::debug!(
            profile = %profile,
            stage = %self.stage,
            elapsed_s = self.elapsed_s,
            "profile switched"
        );
    }

    /// Back to the initial leaf at the start of Steaming. Profile and
    /// durations are kept.
    pub fn reset(&mut self) {
        self.leaf = self.initial;
        self.stage = Stage::Steaming;
        self.rule = StageRule::for_stage(Stage::Steaming, &self.coeffs);
        self.stage_elapsed_s = 0;
        self.elapsed_s = 0;
        self.banked_s = 0.0;
        self.final_score = None;
    }

    // ── Internals ────────────────────────────────────────────────────────────

    /// Run the active rule for `dt` seconds and advance the counters.
    fn apply(&mut self, dt: u32) {
        if dt == 0 {
            return;
        }
        if let Some(rule) = self.rule {
            rule.apply(&mut self.leaf, f64::from(dt));
            self.stage_elapsed_s += dt;
            self.elapsed_s += dt;
        }
    }

    /// Leave every exhausted stage. Returns `false` once finished.
    fn settle_stage(&mut self) -> bool {
        while !self.is_finished() && self.stage_remaining_seconds() == 0 {
            self.enter(self.stage.next());
        }
        !self.is_finished()
    }

    fn enter(&mut self, stage: Stage) {
        let from = self.stage;
        self.stage = stage;
        self.stage_elapsed_s = 0;
        self.rule = StageRule::for_stage(stage, &self.coeffs);
        tracing::debug!(from = %from, to = %stage, elapsed_s = self.elapsed_s, "stage transition");

        if stage.is_terminal() && self.final_score.is_none() {
            let score = self.current_quality_score();
            self.final_score = Some(score);
            tracing::info!(
                elapsed_s = self.elapsed_s,
                profile = %self.profile,
                quality_score = score,
                status = %quality_status(score),
                "batch finished"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_rejects_zero_without_mutation() {
        let mut seq = Sequencer::default();
        assert!(!seq.step(0));
        assert_eq!(seq.elapsed_seconds(), 0);
        assert_eq!(*seq.leaf(), TeaLeaf::default());
    }

    #[test]
    fn step_clips_to_stage_remaining() {
        let mut seq = Sequencer::new(StageDurations::new(10, 6, 3), ProfileKind::Default);
        assert!(seq.step(7));
        assert_eq!(seq.elapsed_seconds(), 7);
        assert!(seq.step(7));
        // clipped at the steaming boundary; advance happens on the next call
        assert_eq!(seq.elapsed_seconds(), 10);
        assert_eq!(seq.stage(), Stage::Steaming);
        assert!(seq.step(7));
        assert_eq!(seq.stage(), Stage::Rolling);
        assert_eq!(seq.elapsed_seconds(), 16);
    }

    #[test]
    fn step_returns_false_on_entering_finished() {
        let mut seq = Sequencer::new(StageDurations::new(1, 1, 1), ProfileKind::Default);
        let mut calls = 0;
        while seq.step(5) {
            calls += 1;
        }
        assert_eq!(calls, 3);
        assert!(seq.is_finished());
        assert_eq!(seq.elapsed_seconds(), 3);
        assert!(seq.final_quality_score().is_some());
        assert!(!seq.step(5));
    }

    #[test]
    fn update_banks_fractions() {
        let mut seq = Sequencer::default();
        seq.update(0.4);
        assert_eq!(seq.elapsed_seconds(), 0);
        assert_eq!(*seq.leaf(), TeaLeaf::default());
        seq.update(0.6);
        assert_eq!(seq.elapsed_seconds(), 1);
    }

    #[test]
    fn update_ignores_garbage_deltas() {
        let mut seq = Sequencer::default();
        seq.update(-3.0);
        seq.update(0.0);
        seq.update(f64::NAN);
        assert_eq!(seq.elapsed_seconds(), 0);
        seq.update(1.0);
        assert_eq!(seq.elapsed_seconds(), 1);
    }

    #[test]
    fn reset_restores_initial_state_and_clears_memo() {
        let mut seq = Sequencer::default();
        seq.update(500.0);
        assert!(seq.is_finished());
        seq.reset();
        assert_eq!(seq.stage(), Stage::Steaming);
        assert_eq!(seq.elapsed_seconds(), 0);
        assert_eq!(seq.stage_remaining_seconds(), 30);
        assert_eq!(*seq.leaf(), TeaLeaf::default());
        assert!(seq.final_quality_score().is_none());
    }

    #[test]
    fn custom_initial_leaf_survives_reset() {
        let start = TeaLeaf {
            moisture: 2.0,
            temperature_c: 40.0,
            aroma: 30.0,
            color: 20.0,
        };
        let mut seq =
            Sequencer::with_initial_leaf(StageDurations::default(), ProfileKind::Default, start);
        assert_eq!(seq.leaf().moisture, 1.0);
        seq.update(5.0);
        seq.reset();
        assert_eq!(seq.leaf().temperature_c, 40.0);
        assert_eq!(seq.leaf().moisture, 1.0);
    }
}
