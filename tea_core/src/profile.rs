//! Coefficient profiles.
//!
//! `Gentle` and `Aggressive` are the `Default` set with every rate term
//! multiplied by one factor. Target temperatures and the overheat threshold
//! are shared by all profiles.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseProfileError;

/// Selectable coefficient set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfileKind {
    #[default]
    Default,
    Gentle,
    Aggressive,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 3] = [
        ProfileKind::Default,
        ProfileKind::Gentle,
        ProfileKind::Aggressive,
    ];

    /// Multiplier applied to every rate coefficient.
    pub const fn scale(self) -> f64 {
        match self {
            ProfileKind::Default => 1.0,
            ProfileKind::Gentle => 0.75,
            ProfileKind::Aggressive => 1.25,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ProfileKind::Default => "default",
            ProfileKind::Gentle => "gentle",
            ProfileKind::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseProfileError(s.to_string()))
    }
}

/// Steaming: heat toward a high target, gain moisture, build aroma fast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteamingCoeffs {
    pub target_temp_c: f64,
    pub heat_k: f64,
    pub moisture_gain_per_s: f64,
    pub aroma_gain_per_s: f64,
    pub color_gain_per_s: f64,
}

impl Default for SteamingCoeffs {
    fn default() -> Self {
        Self {
            target_temp_c: 95.0,
            heat_k: 0.08,
            moisture_gain_per_s: 0.0008,
            aroma_gain_per_s: 1.0,
            color_gain_per_s: 0.2,
        }
    }
}

/// Rolling: cool toward a lower target while shedding water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingCoeffs {
    pub target_temp_c: f64,
    pub cool_k: f64,
    pub moisture_loss_k: f64,
    pub aroma_gain_per_s: f64,
    pub color_gain_per_s: f64,
}

impl Default for RollingCoeffs {
    fn default() -> Self {
        Self {
            target_temp_c: 70.0,
            cool_k: 0.05,
            moisture_loss_k: 0.0015,
            aroma_gain_per_s: 0.6,
            color_gain_per_s: 0.3,
        }
    }
}

/// Drying: exponential moisture decay; aroma suffers above `overheat_c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryingCoeffs {
    pub target_temp_c: f64,
    pub temp_k: f64,
    pub dry_k: f64,
    pub aroma_recover_per_s: f64,
    pub overheat_c: f64,
    pub aroma_damage_k: f64,
    pub color_gain_per_s: f64,
}

impl Default for DryingCoeffs {
    fn default() -> Self {
        Self {
            target_temp_c: 60.0,
            temp_k: 0.07,
            dry_k: 0.05,
            aroma_recover_per_s: 0.2,
            overheat_c: 70.0,
            aroma_damage_k: 0.02,
            color_gain_per_s: 0.15,
        }
    }
}

/// One coefficient set per working stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfileCoeffs {
    pub steaming: SteamingCoeffs,
    pub rolling: RollingCoeffs,
    pub drying: DryingCoeffs,
}

impl ProfileCoeffs {
    /// Multiply every rate term by `k`; targets and thresholds are kept.
    #[must_use]
    pub fn scaled(mut self, k: f64) -> Self {
        let s = &mut self.steaming;
        s.heat_k *= k;
        s.moisture_gain_per_s *= k;
        s.aroma_gain_per_s *= k;
        s.color_gain_per_s *= k;

        let r = &mut self.rolling;
        r.cool_k *= k;
        r.moisture_loss_k *= k;
        r.aroma_gain_per_s *= k;
        r.color_gain_per_s *= k;

        let d = &mut self.drying;
        d.temp_k *= k;
        d.dry_k *= k;
        d.aroma_recover_per_s *= k;
        d.aroma_damage_k *= k;
        d.color_gain_per_s *= k;

        self
    }
}

/// Coefficients for `kind`. `Default` is the unscaled base set.
pub fn make_profile(kind: ProfileKind) -> ProfileCoeffs {
    let base = ProfileCoeffs::default();
    match kind {
        ProfileKind::Default => base,
        other => base.scaled(other.scale()),
    }
}
