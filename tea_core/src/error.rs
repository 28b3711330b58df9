use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing stage durations")]
    MissingDurations,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

/// A profile name that is not one of `default`, `gentle`, `aggressive`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown profile {0:?} (expected default|gentle|aggressive)")]
pub struct ParseProfileError(pub String);

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
