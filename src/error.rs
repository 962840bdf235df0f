use crate::types::Configuration;
use thiserror::Error;

/// Failures of the series engine.
///
/// Application code wraps these in [`anyhow::Error`] with context; tests match
/// on the variants directly.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("failed to read source")]
    Io(#[from] std::io::Error),

    #[error("no {configuration} source for run {run}")]
    SourceNotFound {
        configuration: Configuration,
        run: usize,
    },

    #[error("series is empty")]
    EmptySeries,

    #[error("distribution is degenerate (mean: {mean}, sigma: {sigma})")]
    DegenerateDistribution { mean: f64, sigma: f64 },

    #[error("window size must be at least 1")]
    InvalidWindow,

    #[error("resolution must be at least 1")]
    InvalidResolution,
}
