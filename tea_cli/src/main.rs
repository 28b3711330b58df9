mod batch;
mod cli;
mod console;
mod csv_log;
mod error_fmt;
mod live;
mod logging;
mod settings;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use eyre::Result;
use tea_core::{RunController, Stage};
use tea_traits::MonotonicClock;

use crate::cli::{Cli, Commands, JSON_MODE};
use crate::console::ConsoleSink;
use crate::csv_log::CsvSink;
use crate::error_fmt::{ConfigError, exit_code_for_error, format_error_json, humanize};
use crate::settings::Settings;

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    let _ = color_eyre::install();

    if let Err(e) = real_main(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn real_main(cli: Cli) -> Result<()> {
    let loaded = tea_config::load_file(&cli.config);
    let logging_cfg = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    logging::init_tracing(cli.json, &cli.log_level, &logging_cfg);
    let cfg = loaded?;
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    match cli.cmd {
        Commands::Run { overrides } => {
            let settings = Settings::resolve(cfg, &overrides)?;
            cmd_run(&settings, cli.json, cli.quiet)
        }
        Commands::Live {
            overrides,
            tick_ms,
            speed,
        } => {
            let settings = Settings::resolve(cfg, &overrides)?;
            if tick_ms == 0 {
                return Err(eyre::Report::new(ConfigError(
                    "--tick-ms must be > 0".to_string(),
                )));
            }
            if !(speed.is_finite() && speed > 0.0) {
                return Err(eyre::Report::new(ConfigError(format!(
                    "--speed must be a positive number, got {speed}"
                ))));
            }
            cmd_live(&settings, tick_ms, speed, cli.json, cli.quiet)
        }
        Commands::SelfCheck { overrides } => {
            let settings = Settings::resolve(cfg, &overrides)?;
            cmd_self_check(&settings, cli.json)
        }
    }
}

/// CSV sink for the primary batch; an unopenable file disables CSV output.
fn open_csv(path: Option<&Path>) -> Option<CsvSink<std::fs::File>> {
    let path = path?;
    match CsvSink::create(path) {
        Ok(mut sink) => {
            sink.write_header();
            Some(sink)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot open CSV; continuing without it");
            None
        }
    }
}

fn console_sink(json: bool, quiet: bool) -> Option<ConsoleSink<std::io::Stdout>> {
    (!json && !quiet).then(|| ConsoleSink::new(std::io::stdout()))
}

fn cmd_run(settings: &Settings, json: bool, quiet: bool) -> Result<()> {
    let prototype = settings.prototype()?;
    let mut sink = (console_sink(json, quiet), open_csv(settings.csv.as_deref()));

    let summaries = batch::run_batches(
        &prototype,
        settings.sim.dt_seconds,
        settings.batch_count,
        &mut sink,
    );

    if json {
        println!("{}", batch::summary_json(&summaries));
    } else if let Some(primary) = summaries.first() {
        println!(
            "Finished in {}s: quality={:.2} ({})",
            primary.elapsed_seconds, primary.final_score, primary.final_status
        );
    }
    Ok(())
}

fn cmd_live(settings: &Settings, tick_ms: u64, speed: f64, json: bool, quiet: bool) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))
            .map_err(|e| eyre::eyre!("install Ctrl-C handler: {e}"))?;
    }

    let prototype = settings.prototype()?;
    let mut controller = RunController::from_prototype(&prototype, settings.batch_count);
    let mut sink = (console_sink(json, quiet), open_csv(settings.csv.as_deref()));
    let opts = live::LiveOptions {
        tick: Duration::from_millis(tick_ms),
        speed,
    };

    let outcome = live::drive(&mut controller, &MonotonicClock::new(), opts, &stop, &mut sink);

    let primary = controller.primary();
    if json {
        let line = serde_json::json!({
            "interrupted": outcome.interrupted,
            "ticks": outcome.ticks,
            "stage": primary.stage().as_str(),
            "elapsed_seconds": primary.elapsed_seconds(),
            "quality_score": primary.quality_score(),
            "quality_status": primary.quality_status().as_str(),
        });
        println!("{line}");
    } else {
        println!(
            "{} at {}s: quality={:.2} ({})",
            if outcome.interrupted { "Paused" } else { "Finished" },
            primary.elapsed_seconds(),
            primary.quality_score(),
            primary.quality_status()
        );
    }
    Ok(())
}

fn cmd_self_check(settings: &Settings, json: bool) -> Result<()> {
    // Surface builder errors the same way a run would
    let prototype = settings.prototype()?;
    let durations = prototype.durations();

    if json {
        let line = serde_json::json!({
            "ok": true,
            "profile": prototype.profile().as_str(),
            "dt_seconds": settings.sim.dt_seconds,
            "steaming_seconds": durations.steaming_s,
            "rolling_seconds": durations.rolling_s,
            "drying_seconds": durations.drying_s,
            "total_seconds": durations.total(),
            "batches": settings.batch_count,
            "csv": settings.csv.as_ref().map(|p| p.display().to_string()),
        });
        println!("{line}");
        return Ok(());
    }

    let mut out = std::io::stdout().lock();
    writeln!(out, "OK: configuration valid")?;
    writeln!(
        out,
        "profile={} dt={}s batches={}",
        prototype.profile(),
        settings.sim.dt_seconds,
        settings.batch_count
    )?;
    for stage in Stage::PROCESSING {
        writeln!(out, "  {:<9} {:>6}s", stage.as_str(), durations.for_stage(stage))?;
    }
    writeln!(out, "  {:<9} {:>6}s", "TOTAL", durations.total())?;
    match &settings.csv {
        Some(p) => writeln!(out, "csv={}", p.display())?,
        None => writeln!(out, "csv=disabled")?,
    }
    Ok(())
}
