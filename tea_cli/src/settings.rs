//! Effective settings: config file, then command-line overrides, then validation.

use std::path::PathBuf;

use tea_config::Config;
use tea_core::{ProfileKind, Sequencer, SimulationCfg, TeaLeaf};

use crate::cli::Overrides;
use crate::error_fmt::ConfigError;

/// Validated, engine-typed view of the configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sim: SimulationCfg,
    pub initial: TeaLeaf,
    pub batch_count: usize,
    /// `None` when CSV output is disabled.
    pub csv: Option<PathBuf>,
}

impl Settings {
    /// Apply `overrides` to `cfg`, validate, and convert.
    pub fn resolve(mut cfg: Config, overrides: &Overrides) -> eyre::Result<Self> {
        apply_overrides(&mut cfg, overrides)?;
        cfg.validate()
            .map_err(|e| eyre::Report::new(ConfigError(e.to_string())))?;

        let sim = SimulationCfg::try_from(&cfg.simulation)?;
        let initial = cfg.initial.as_ref().map(TeaLeaf::from).unwrap_or_default();
        let csv = cfg
            .output
            .csv_enabled
            .then(|| PathBuf::from(cfg.output.csv.trim()));

        Ok(Self {
            sim,
            initial,
            batch_count: cfg.batches.count as usize,
            csv,
        })
    }

    /// A fresh batch built from these settings.
    pub fn prototype(&self) -> eyre::Result<Sequencer> {
        Sequencer::builder()
            .with_config(&self.sim)
            .with_initial_leaf(self.initial)
            .build()
    }
}

pub fn apply_overrides(cfg: &mut Config, o: &Overrides) -> eyre::Result<()> {
    let sim = &mut cfg.simulation;
    if let Some(v) = o.dt {
        sim.dt_seconds = v;
    }
    if let Some(v) = o.steaming {
        sim.steaming_seconds = v;
    }
    if let Some(v) = o.rolling {
        sim.rolling_seconds = v;
    }
    if let Some(v) = o.drying {
        sim.drying_seconds = v;
    }
    if let Some(name) = o.profile.as_deref() {
        let kind: ProfileKind = name.parse()?;
        sim.profile = kind.into();
    }
    if let Some(n) = o.batches {
        cfg.batches.count = n;
    }
    if let Some(path) = &o.csv {
        cfg.output.csv = path.clone();
    }
    if o.no_csv {
        cfg.output.csv_enabled = false;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tea_core::StageDurations;

    #[test]
    fn overrides_win_over_file() {
        let cfg = tea_config::load_toml("[simulation]\ndt_seconds = 2\nprofile = \"gentle\"\n")
            .unwrap();
        let o = Overrides {
            steaming: Some(10),
            rolling: Some(6),
            drying: Some(4),
            profile: Some("Aggressive".into()),
            no_csv: true,
            ..Overrides::default()
        };
        let s = Settings::resolve(cfg, &o).unwrap();
        assert_eq!(s.sim.dt_seconds, 2);
        assert_eq!(s.sim.durations, StageDurations::new(10, 6, 4));
        assert_eq!(s.sim.profile, ProfileKind::Aggressive);
        assert!(s.csv.is_none());
    }

    #[test]
    fn validation_failure_is_a_config_error() {
        let o = Overrides {
            dt: Some(40),
            ..Overrides::default()
        };
        let err = Settings::resolve(Config::default(), &o).unwrap_err();
        let ce = err.downcast_ref::<ConfigError>().unwrap();
        assert!(ce.0.contains("dt_seconds"));
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let o = Overrides {
            profile: Some("turbo".into()),
            ..Overrides::default()
        };
        let err = Settings::resolve(Config::default(), &o).unwrap_err();
        assert!(
            err.downcast_ref::<tea_core::ParseProfileError>()
                .is_some()
        );
    }

    #[test]
    fn prototype_uses_initial_table() {
        let cfg = tea_config::load_toml("[initial]\nmoisture = 0.5\n").unwrap();
        let s = Settings::resolve(cfg, &Overrides::default()).unwrap();
        let seq = s.prototype().unwrap();
        assert_eq!(seq.leaf().moisture, 0.5);
        assert_eq!(seq.leaf().aroma, 10.0);
    }
}
