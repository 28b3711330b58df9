//! Human-readable error descriptions and structured JSON error formatting.

use tea_core::error::{BuildError, ParseProfileError};
use thiserror::Error;

/// The effective configuration failed validation.
#[derive(Debug, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(pub String);

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(ce) = err.downcast_ref::<ConfigError>() {
        return format!(
            "What happened: Invalid configuration ({}).\nLikely causes: A value in the TOML or a command-line override is out of range.\nHow to fix: Durations and --dt must be in 1..=86400 with --dt no larger than any stage; batches must be in 1..=64.",
            ce.0
        );
    }

    if let Some(pe) = err.downcast_ref::<ParseProfileError>() {
        return format!(
            "What happened: Unknown profile {:?}.\nLikely causes: Typo in --profile/--model or simulation.profile.\nHow to fix: Use one of default, gentle, aggressive.",
            pe.0
        );
    }

    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingDurations => {
                "What happened: No stage durations were given to the sequencer.\nLikely causes: The simulation table was not mapped into the builder.\nHow to fix: Pass durations via with_durations(...) or with_config(...).".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See etc/tea_config.toml for a sample."
            ),
        };
    }

    // String-based heuristics for errors coming from config loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("invalid configuration in") {
        return format!(
            "What happened: The config file could not be parsed.\nLikely causes: TOML syntax error, a misspelled table, or a wrong value type.\nHow to fix: Compare the file with etc/tea_config.toml. Parser said: {msg}"
        );
    }

    if lower.contains("read config") {
        return format!(
            "What happened: The config file exists but could not be read.\nLikely causes: Missing permissions or the path is a directory.\nHow to fix: Check --config. Original: {msg}"
        );
    }

    if lower.contains("ctrl-c") {
        return format!(
            "What happened: Could not install the Ctrl-C handler.\nLikely causes: Another handler is already registered.\nHow to fix: Run `live` in a fresh process. Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Configuration and usage errors exit with 2 (same as clap); everything else with 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<ConfigError>().is_some()
        || err.downcast_ref::<ParseProfileError>().is_some()
        || err.downcast_ref::<BuildError>().is_some()
    {
        return 2;
    }
    if err
        .to_string()
        .to_ascii_lowercase()
        .contains("invalid configuration in")
    {
        return 2;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = if err.downcast_ref::<ConfigError>().is_some()
        || err.downcast_ref::<BuildError>().is_some()
    {
        "InvalidConfig"
    } else if err.downcast_ref::<ParseProfileError>().is_some() {
        "UnknownProfile"
    } else if exit_code_for_error(err) == 2 {
        "ConfigParse"
    } else {
        "Error"
    };
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_exit_with_two() {
        let e = eyre::Report::new(ConfigError("batches.count must be in [1, 64]".into()));
        assert_eq!(exit_code_for_error(&e), 2);
        assert!(humanize(&e).contains("batches.count"));

        let e = eyre::Report::new(ParseProfileError("turbo".into()));
        assert_eq!(exit_code_for_error(&e), 2);
        assert!(humanize(&e).contains("gentle"));
    }

    #[test]
    fn other_errors_exit_with_one() {
        let e = eyre::eyre!("disk on fire");
        assert_eq!(exit_code_for_error(&e), 1);
        assert!(humanize(&e).contains("disk on fire"));
    }

    #[test]
    fn json_error_has_reason_and_message() {
        let e = eyre::Report::new(ConfigError("simulation.dt_seconds must be > 0".into()));
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&e)).unwrap();
        assert_eq!(v["reason"], "InvalidConfig");
        assert!(v["message"].as_str().unwrap().contains("dt_seconds"));
    }
}
