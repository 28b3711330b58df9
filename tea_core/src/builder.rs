//! Checked construction for `Sequencer`.
//!
//! `Sequencer::new` trusts its inputs; the builder is what the CLI and the
//! controller go through so a zero-length stage or a NaN starting value is
//! reported as a `BuildError` instead of producing a silent no-op pipeline.

use crate::config::{SimulationCfg, StageDurations};
use crate::error::{BuildError, Result};
use crate::leaf::TeaLeaf;
use crate::profile::ProfileKind;
use crate::sequencer::Sequencer;

/// Builder for `Sequencer`. Everything is validated on `build()`.
#[derive(Debug, Clone, Default)]
pub struct SequencerBuilder {
    durations: Option<StageDurations>,
    profile: Option<ProfileKind>,
    initial: Option<TeaLeaf>,
}

impl SequencerBuilder {
    pub fn with_durations(mut self, durations: StageDurations) -> Self {
        self.durations = Some(durations);
        self
    }

    pub fn with_profile(mut self, profile: ProfileKind) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Starting leaf state; normalized at build time.
    pub fn with_initial_leaf(mut self, leaf: TeaLeaf) -> Self {
        self.initial = Some(leaf);
        self
    }

    /// Take durations and profile from an engine config in one go.
    pub fn with_config(self, cfg: &SimulationCfg) -> Self {
        self.with_durations(cfg.durations).with_profile(cfg.profile)
    }

    /// Validate and build the sequencer.
    pub fn build(self) -> Result<Sequencer> {
        let durations = self
            .durations
            .ok_or_else(|| eyre::Report::new(BuildError::MissingDurations))?;

        if durations.steaming_s == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "steaming seconds must be > 0",
            )));
        }
        if durations.rolling_s == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "rolling seconds must be > 0",
            )));
        }
        if durations.drying_s == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "drying seconds must be > 0",
            )));
        }
        if durations
            .steaming_s
            .checked_add(durations.rolling_s)
            .and_then(|s| s.checked_add(durations.drying_s))
            .is_none()
        {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "total duration overflows",
            )));
        }

        let initial = self.initial.unwrap_or_default();
        let finite = [
            initial.moisture,
            initial.temperature_c,
            initial.aroma,
            initial.color,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "initial leaf values must be finite",
            )));
        }

        Ok(Sequencer::with_initial_leaf(
            durations,
            self.profile.unwrap_or_default(),
            initial,
        ))
    }
}
