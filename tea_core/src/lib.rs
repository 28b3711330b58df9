#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Tea leaf processing engine (I/O-free).
//!
//! This crate owns the physical state of a batch of leaves and advances it
//! through the fixed pipeline STEAMING → ROLLING → DRYING → FINISHED.
//! All output goes through `tea_traits::RecordSink`; nothing here touches
//! files or the console.
//!
//! ## Architecture
//!
//! - **State vector**: `TeaLeaf` plus `clamp`/`normalize` (`leaf` module)
//! - **Stages**: the linear stage enum (`stage` module)
//! - **Profiles**: per-stage coefficient sets scaled from a base (`profile` module)
//! - **Rules**: one update formula per working stage (`rule` module)
//! - **Sequencer**: stage timing, boundary carry-over, final score (`sequencer` module)
//! - **Controller**: start/pause/reset over one or more batches (`controller` module)
//! - **Quality**: score and GOOD/OK/BAD classification (`quality` module)
//!
//! ## Time
//!
//! Stage bookkeeping is in whole seconds (`u32`). `Sequencer::update` accepts
//! fractional wall-clock deltas, banks them, and only ever applies rules in
//! whole-second ticks, so the trajectory does not depend on how a total
//! duration is sliced across calls.

pub mod builder;
pub mod config;
pub mod controller;
pub mod conversions;
pub mod error;
pub mod leaf;
pub mod profile;
pub mod quality;
pub mod record;
pub mod rule;
pub mod runner;
pub mod sequencer;
pub mod stage;
pub mod util;

pub use builder::SequencerBuilder;
pub use config::{SimulationCfg, StageDurations};
pub use controller::RunController;
pub use error::{BuildError, ParseProfileError, Report, Result};
pub use leaf::{TeaLeaf, clamp, normalize};
pub use profile::{DryingCoeffs, ProfileCoeffs, ProfileKind, RollingCoeffs, SteamingCoeffs, make_profile};
pub use quality::{QualityStatus, quality_score, quality_status};
pub use record::StepRecord;
pub use rule::StageRule;
pub use runner::{RunSummary, run};
pub use sequencer::Sequencer;
pub use stage::Stage;
