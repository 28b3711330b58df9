#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the tea factory simulator.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Every table is optional; an empty document yields the stock
//!   30 s / 30 s / 60 s pipeline with a 1 s step and the default profile.
use serde::Deserialize;
use std::path::Path;

/// Longest accepted step or stage duration (one day).
pub const MAX_SECONDS: i64 = 24 * 60 * 60;
/// Upper bound on simultaneously simulated batches.
pub const MAX_BATCHES: u32 = 64;

/// Coefficient profile selector as written in the config file.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Default,
    Gentle,
    Aggressive,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationCfg {
    /// Step size used by the batch driver (s).
    pub dt_seconds: i64,
    pub steaming_seconds: i64,
    pub rolling_seconds: i64,
    pub drying_seconds: i64,
    pub profile: Profile,
}

impl Default for SimulationCfg {
    fn default() -> Self {
        Self {
            dt_seconds: 1,
            steaming_seconds: 30,
            rolling_seconds: 30,
            drying_seconds: 60,
            profile: Profile::Default,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BatchCfg {
    /// Number of independent batches driven together (1..=MAX_BATCHES).
    pub count: u32,
}

impl Default for BatchCfg {
    fn default() -> Self {
        Self { count: 1 }
    }
}

/// Optional starting state of every batch. Values are normalized by the
/// engine, so out-of-range numbers are accepted as long as they are finite.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct InitialLeaf {
    pub moisture: f64,
    pub temperature_c: f64,
    pub aroma: f64,
    pub color: f64,
}

impl Default for InitialLeaf {
    fn default() -> Self {
        Self {
            moisture: 0.75,
            temperature_c: 25.0,
            aroma: 10.0,
            color: 10.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputCfg {
    /// CSV path for per-step records.
    pub csv: String,
    pub csv_enabled: bool,
}

impl Default for OutputCfg {
    fn default() -> Self {
        Self {
            csv: "tea_factory_cli.csv".to_string(),
            csv_enabled: true,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationCfg,
    pub batches: BatchCfg,
    /// Starting leaf state; stock values when absent.
    pub initial: Option<InitialLeaf>,
    pub output: OutputCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a config file. A missing file is not an error: the
/// defaults are returned so the simulator runs out of the box.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("invalid configuration in {:?}: {}", path, e))
}

fn check_seconds(name: &str, v: i64) -> eyre::Result<()> {
    if v <= 0 {
        eyre::bail!("simulation.{name} must be > 0");
    }
    if v > MAX_SECONDS {
        eyre::bail!("simulation.{name} must be <= {MAX_SECONDS}");
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Simulation
        let sim = &self.simulation;
        check_seconds("dt_seconds", sim.dt_seconds)?;
        check_seconds("steaming_seconds", sim.steaming_seconds)?;
        check_seconds("rolling_seconds", sim.rolling_seconds)?;
        check_seconds("drying_seconds", sim.drying_seconds)?;
        let shortest = sim
            .steaming_seconds
            .min(sim.rolling_seconds)
            .min(sim.drying_seconds);
        if sim.dt_seconds > shortest {
            eyre::bail!("simulation.dt_seconds must be <= each stage duration");
        }

        // Batches
        if self.batches.count == 0 || self.batches.count > MAX_BATCHES {
            eyre::bail!("batches.count must be in [1, {MAX_BATCHES}]");
        }

        // Initial state
        if let Some(init) = &self.initial {
            let all_finite = [init.moisture, init.temperature_c, init.aroma, init.color]
                .iter()
                .all(|v| v.is_finite());
            if !all_finite {
                eyre::bail!("initial values must be finite numbers");
            }
        }

        // Output
        if self.output.csv_enabled && self.output.csv.trim().is_empty() {
            eyre::bail!("output.csv path is empty");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }

        Ok(())
    }

    /// Sum of the three stage durations in seconds, saturating at `i64::MAX`.
    pub fn total_seconds(&self) -> i64 {
        self.simulation
            .steaming_seconds
            .saturating_add(self.simulation.rolling_seconds)
            .saturating_add(self.simulation.drying_seconds)
    }
}
