//! Start/pause/reset control over one or more batches.
//!
//! The controller owns every batch exclusively and forwards wall-clock
//! deltas to them while running. Batches share durations, profile and
//! initial leaf; they differ only in that each keeps its own state.

use crate::config::StageDurations;
use crate::profile::ProfileKind;
use crate::sequencer::Sequencer;

#[derive(Debug, Clone)]
pub struct RunController {
    running: bool,
    profile: ProfileKind,
    batches: Vec<Sequencer>,
}

impl RunController {
    /// `batch_count` batches with the stock initial leaf. A count of 0 is
    /// treated as 1.
    pub fn new(durations: StageDurations, profile: ProfileKind, batch_count: usize) -> Self {
        Self::from_prototype(&Sequencer::new(durations, profile), batch_count)
    }

    /// Clone `prototype` into `batch_count` batches (at least one). Each
    /// batch starts from the prototype's initial state.
    pub fn from_prototype(prototype: &Sequencer, batch_count: usize) -> Self {
        let mut template = prototype.clone();
        template.reset();
        let batches = vec![template; batch_count.max(1)];
        Self {
            running: false,
            profile: prototype.profile(),
            batches,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn profile(&self) -> ProfileKind {
        self.profile
    }

    pub fn batches(&self) -> &[Sequencer] {
        &self.batches
    }

    /// The first batch; drives start gating and single-stream output.
    pub fn primary(&self) -> &Sequencer {
        // never empty: construction clamps the count to >= 1
        &self.batches[0]
    }

    pub fn all_finished(&self) -> bool {
        self.batches.iter().all(Sequencer::is_finished)
    }

    /// Begin forwarding time. No-op once the primary batch has finished.
    pub fn start(&mut self) {
        if self.primary().is_finished() {
            tracing::debug!("start ignored: primary batch already finished");
            return;
        }
        if !self.running {
            tracing::info!(batches = self.batches.len(), profile = %self.profile, "run started");
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        if self.running {
            tracing::info!(
                elapsed_s = self.primary().elapsed_seconds(),
                "run paused"
            );
        }
        self.running = false;
    }

    /// Stop and put every batch back to its initial state under the
    /// current profile.
    pub fn reset(&mut self) {
        self.running = false;
        let profile = self.profile;
        for batch in &mut self.batches {
            batch.set_profile(profile);
            batch.reset();
        }
        tracing::info!(profile = %profile, "run reset");
    }

    /// Forward `delta_seconds` to every unfinished batch. Stops itself once
    /// all batches are finished.
    pub fn update(&mut self, delta_seconds: f64) {
        if !self.running {
            return;
        }
        for batch in self.batches.iter_mut().filter(|b| !b.is_finished()) {
            batch.update(delta_seconds);
        }
        if self.all_finished() {
            self.running = false;
            tracing::info!(
                elapsed_s = self.primary().elapsed_seconds(),
                quality_score = self.primary().quality_score(),
                "all batches finished"
            );
        }
    }

    /// Switch profile and reset every batch. Rejected while running;
    /// returns whether the switch was applied.
    pub fn set_profile(&mut self, profile: ProfileKind) -> bool {
        if self.running {
            tracing::warn!(requested = %profile, "profile change rejected while running");
            return false;
        }
        self.profile = profile;
        self.reset();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;

    fn short() -> StageDurations {
        StageDurations::new(2, 2, 2)
    }

    #[test]
    fn zero_batches_clamps_to_one() {
        let c = RunController::new(short(), ProfileKind::Default, 0);
        assert_eq!(c.batches().len(), 1);
        assert!(!c.is_running());
    }

    #[test]
    fn update_is_ignored_until_started() {
        let mut c = RunController::new(short(), ProfileKind::Default, 1);
        c.update(1.0);
        assert_eq!(c.primary().elapsed_seconds(), 0);
        c.start();
        c.update(1.0);
        assert_eq!(c.primary().elapsed_seconds(), 1);
    }

    #[test]
    fn auto_stops_when_every_batch_finishes() {
        let mut c = RunController::new(short(), ProfileKind::Default, 3);
        c.start();
        c.update(6.0);
        assert!(c.all_finished());
        assert!(!c.is_running());
        c.start();
        assert!(!c.is_running());
    }

    #[test]
    fn set_profile_rejected_while_running() {
        let mut c = RunController::new(short(), ProfileKind::Default, 1);
        c.start();
        c.update(1.0);
        assert!(!c.set_profile(ProfileKind::Aggressive));
        assert_eq!(c.profile(), ProfileKind::Default);
        assert_eq!(c.primary().elapsed_seconds(), 1);

        c.pause();
        assert!(c.set_profile(ProfileKind::Aggressive));
        assert_eq!(c.primary().profile(), ProfileKind::Aggressive);
        assert_eq!(c.primary().elapsed_seconds(), 0);
        assert_eq!(c.primary().stage(), Stage::Steaming);
    }

    #[test]
    fn reset_stops_and_rewinds() {
        let mut c = RunController::new(short(), ProfileKind::Gentle, 2);
        c.start();
        c.update(3.0);
        c.reset();
        assert!(!c.is_running());
        for b in c.batches() {
            assert_eq!(b.elapsed_seconds(), 0);
            assert_eq!(b.profile(), ProfileKind::Gentle);
        }
    }
}
