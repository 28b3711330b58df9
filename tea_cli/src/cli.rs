//! CLI argument definitions and shared statics.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "tea_cli", version, about = "Tea leaf processing simulator")]
pub struct Cli {
    /// Path to config TOML (optional; stock values when the file is absent)
    #[arg(long, value_name = "FILE", default_value = "etc/tea_config.toml")]
    pub config: PathBuf,

    /// Log as JSON lines and print a JSON summary instead of step lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Do not print per-step lines
    #[arg(long, short, action = ArgAction::SetTrue)]
    pub quiet: bool,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Flags that override the `[simulation]`, `[batches]` and `[output]` tables.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Time step in seconds
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub dt: Option<i64>,
    /// Steaming duration in seconds
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub steaming: Option<i64>,
    /// Rolling duration in seconds
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub rolling: Option<i64>,
    /// Drying duration in seconds
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub drying: Option<i64>,
    /// Coefficient profile: default | gentle | aggressive
    #[arg(long, visible_alias = "model", value_name = "NAME")]
    pub profile: Option<String>,
    /// Number of batches simulated together
    #[arg(long, value_name = "N")]
    pub batches: Option<u32>,
    /// CSV output path
    #[arg(long, value_name = "FILE")]
    pub csv: Option<String>,
    /// Disable CSV output
    #[arg(long = "no-csv", action = ArgAction::SetTrue)]
    pub no_csv: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every batch to completion with a fixed time step
    Run {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Drive the batches from a wall clock, pausing on Ctrl-C
    Live {
        #[command(flatten)]
        overrides: Overrides,
        /// Wall-clock milliseconds between ticks
        #[arg(long = "tick-ms", value_name = "MS", default_value_t = 100)]
        tick_ms: u64,
        /// Simulated seconds per wall-clock second
        #[arg(long, value_name = "FACTOR", default_value_t = 1.0)]
        speed: f64,
    },
    /// Validate the effective configuration and print the stage plan
    SelfCheck {
        #[command(flatten)]
        overrides: Overrides,
    },
}
