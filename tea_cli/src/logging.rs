//! Tracing setup: console layer plus an optional JSON file layer.

use std::path::Path;

use tea_config::Logging;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::FILE_GUARD;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber. Console logs go to stderr so stdout stays
/// reserved for step lines and the JSON summary.
///
/// `RUST_LOG` wins over `console_level` for the console layer; the file layer
/// uses `[logging] level` (default `info`).
pub fn init_tracing(json: bool, console_level: &str, logging: &Logging) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_level));
    let console: BoxedLayer = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    };

    let mut layers = vec![console];
    let mut file_error = None;
    if let Some(path) = logging.file.as_deref() {
        match file_layer(Path::new(path), logging) {
            Ok(layer) => layers.push(layer),
            Err(e) => file_error = Some(e),
        }
    }

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(layers).try_init();

    if let Some(e) = file_error {
        tracing::warn!(error = %e, "file logging disabled");
    }
}

fn rotation(name: Option<&str>) -> Rotation {
    match name {
        Some("daily") => Rotation::DAILY,
        Some("hourly") => Rotation::HOURLY,
        _ => Rotation::NEVER,
    }
}

fn file_layer(path: &Path, logging: &Logging) -> eyre::Result<BoxedLayer> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| eyre::eyre!("logging.file {path:?} has no file name"))?;
    std::fs::create_dir_all(dir)
        .map_err(|e| eyre::eyre!("create log directory {dir:?}: {e}"))?;

    let appender = RollingFileAppender::builder()
        .rotation(rotation(logging.rotation.as_deref()))
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .map_err(|e| eyre::eyre!("open log file {path:?}: {e}"))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = FILE_GUARD.set(guard);

    let filter = EnvFilter::new(logging.level.as_deref().unwrap_or("info"));
    Ok(fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter)
        .boxed())
}
