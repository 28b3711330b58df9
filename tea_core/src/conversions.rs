//! Conversions bridging `tea_config` types to `tea_core` types.
//!
//! The config crate keeps the file's wide integer types so it can report
//! negative values; narrowing to the engine's `u32` seconds happens here.

use crate::config::{SimulationCfg, StageDurations};
use crate::error::BuildError;
use crate::leaf::TeaLeaf;
use crate::profile::ProfileKind;

// ── ProfileKind ──────────────────────────────────────────────────────────────

impl From<tea_config::Profile> for ProfileKind {
    fn from(p: tea_config::Profile) -> Self {
        match p {
            tea_config::Profile::Default => ProfileKind::Default,
            tea_config::Profile::Gentle => ProfileKind::Gentle,
            tea_config::Profile::Aggressive => ProfileKind::Aggressive,
        }
    }
}

impl From<ProfileKind> for tea_config::Profile {
    fn from(k: ProfileKind) -> Self {
        match k {
            ProfileKind::Default => tea_config::Profile::Default,
            ProfileKind::Gentle => tea_config::Profile::Gentle,
            ProfileKind::Aggressive => tea_config::Profile::Aggressive,
        }
    }
}

// ── TeaLeaf ──────────────────────────────────────────────────────────────────

impl From<&tea_config::InitialLeaf> for TeaLeaf {
    fn from(c: &tea_config::InitialLeaf) -> Self {
        TeaLeaf {
            moisture: c.moisture,
            temperature_c: c.temperature_c,
            aroma: c.aroma,
            color: c.color,
        }
        .normalized()
    }
}

// ── SimulationCfg ────────────────────────────────────────────────────────────

fn positive_seconds(v: i64, what: &'static str) -> Result<u32, BuildError> {
    match u32::try_from(v) {
        Ok(s) if s > 0 => Ok(s),
        _ => Err(BuildError::InvalidConfig(what)),
    }
}

impl TryFrom<&tea_config::SimulationCfg> for StageDurations {
    type Error = BuildError;

    fn try_from(c: &tea_config::SimulationCfg) -> Result<Self, Self::Error> {
        Ok(StageDurations {
            steaming_s: positive_seconds(c.steaming_seconds, "steaming seconds out of range")?,
            rolling_s: positive_seconds(c.rolling_seconds, "rolling seconds out of range")?,
            drying_s: positive_seconds(c.drying_seconds, "drying seconds out of range")?,
        })
    }
}

impl TryFrom<&tea_config::SimulationCfg> for SimulationCfg {
    type Error = BuildError;

    fn try_from(c: &tea_config::SimulationCfg) -> Result<Self, Self::Error> {
        Ok(SimulationCfg {
            dt_seconds: positive_seconds(c.dt_seconds, "dt seconds out of range")?,
            durations: StageDurations::try_from(c)?,
            profile: c.profile.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_file_config() {
        let file = tea_config::SimulationCfg {
            dt_seconds: 7,
            steaming_seconds: 10,
            rolling_seconds: 6,
            drying_seconds: 3,
            profile: tea_config::Profile::Gentle,
        };
        let cfg = SimulationCfg::try_from(&file).unwrap();
        assert_eq!(cfg.dt_seconds, 7);
        assert_eq!(cfg.durations, StageDurations::new(10, 6, 3));
        assert_eq!(cfg.profile, ProfileKind::Gentle);
    }

    #[test]
    fn rejects_non_positive_seconds() {
        let file = tea_config::SimulationCfg {
            rolling_seconds: -2,
            ..tea_config::SimulationCfg::default()
        };
        assert_eq!(
            StageDurations::try_from(&file),
            Err(BuildError::InvalidConfig("rolling seconds out of range"))
        );
    }

    #[test]
    fn initial_leaf_is_normalized() {
        let init = tea_config::InitialLeaf {
            moisture: 1.4,
            temperature_c: -5.0,
            aroma: 130.0,
            color: 40.0,
        };
        let leaf = TeaLeaf::from(&init);
        assert_eq!(leaf.moisture, 1.0);
        assert_eq!(leaf.aroma, 100.0);
        assert_eq!(leaf.temperature_c, -5.0);
    }
}
