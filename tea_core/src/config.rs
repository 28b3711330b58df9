//! Runtime configuration types for the engine.
//!
//! These are the plain structs the sequencer consumes. They are separate from
//! the TOML-deserialized config in `tea_config`; see `conversions`.

use crate::profile::ProfileKind;
use crate::stage::Stage;

/// Seconds spent in each working stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDurations {
    pub steaming_s: u32,
    pub rolling_s: u32,
    pub drying_s: u32,
}

impl Default for StageDurations {
    fn default() -> Self {
        Self {
            steaming_s: 30,
            rolling_s: 30,
            drying_s: 60,
        }
    }
}

impl StageDurations {
    pub const fn new(steaming_s: u32, rolling_s: u32, drying_s: u32) -> Self {
        Self {
            steaming_s,
            rolling_s,
            drying_s,
        }
    }

    /// Configured length of `stage`; `Finished` lasts 0 s.
    pub const fn for_stage(&self, stage: Stage) -> u32 {
        match stage {
            Stage::Steaming => self.steaming_s,
            Stage::Rolling => self.rolling_s,
            Stage::Drying => self.drying_s,
            Stage::Finished => 0,
        }
    }

    /// Length of the whole pipeline in seconds.
    pub fn total(&self) -> u32 {
        self.steaming_s
            .saturating_add(self.rolling_s)
            .saturating_add(self.drying_s)
    }
}

/// Everything a batch driver needs besides the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationCfg {
    /// Step handed to `Sequencer::step` by the batch runner.
    pub dt_seconds: u32,
    pub durations: StageDurations,
    pub profile: ProfileKind,
}

impl Default for SimulationCfg {
    fn default() -> Self {
        Self {
            dt_seconds: 1,
            durations: StageDurations::default(),
            profile: ProfileKind::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_pure_per_stage() {
        let d = StageDurations::new(10, 6, 3);
        assert_eq!(d.for_stage(Stage::Steaming), 10);
        assert_eq!(d.for_stage(Stage::Rolling), 6);
        assert_eq!(d.for_stage(Stage::Drying), 3);
        assert_eq!(d.for_stage(Stage::Finished), 0);
        assert_eq!(d.total(), 19);
        assert_eq!(StageDurations::default().total(), 120);
    }
}
