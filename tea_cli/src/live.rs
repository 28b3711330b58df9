//! `live` subcommand: wall-clock driven run of a `RunController`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tea_core::{RunController, StepRecord};
use tea_traits::{Clock, RecordSink};

#[derive(Debug, Clone, Copy)]
pub struct LiveOptions {
    /// Wall-clock time between ticks.
    pub tick: Duration,
    /// Simulated seconds per wall-clock second.
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveOutcome {
    pub ticks: u64,
    /// True when the stop flag ended the run before every batch finished.
    pub interrupted: bool,
}

/// Tick the controller until it stops on its own or `stop` is raised.
///
/// Each tick sleeps on `clock`, scales the measured delta by `speed` and
/// forwards it. A record of the primary batch goes to `sink` whenever its
/// whole elapsed seconds change.
pub fn drive<C, S>(
    controller: &mut RunController,
    clock: &C,
    opts: LiveOptions,
    stop: &AtomicBool,
    sink: &mut S,
) -> LiveOutcome
where
    C: Clock + ?Sized,
    S: RecordSink<StepRecord> + ?Sized,
{
    controller.start();
    let mut outcome = LiveOutcome {
        ticks: 0,
        interrupted: false,
    };
    let mut last = clock.now();
    let mut last_seen = controller.primary().elapsed_seconds();

    while controller.is_running() {
        if stop.load(Ordering::SeqCst) {
            controller.pause();
            outcome.interrupted = true;
            tracing::info!(
                elapsed_s = controller.primary().elapsed_seconds(),
                "interrupted; controller paused"
            );
            break;
        }

        clock.sleep(opts.tick);
        let now = clock.now();
        let delta = now.saturating_duration_since(last).as_secs_f64() * opts.speed;
        last = now;
        controller.update(delta);
        outcome.ticks += 1;

        let primary = controller.primary();
        if primary.elapsed_seconds() != last_seen {
            last_seen = primary.elapsed_seconds();
            sink.record(&StepRecord::capture(primary));
        }
    }
    sink.flush();
    outcome
}
