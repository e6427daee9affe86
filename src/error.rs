//! Error type of the stochastic-mean estimator.
//!
//! All checks run once, before any bin is computed, so an error always means
//! that no result was produced.

/// Failure of a stochastic-mean computation.
#[derive(Debug, Clone, PartialEq)]
pub enum StochMeanError {
    /// Time sequence or bin edges not sorted ascending, or `x` and `y`
    /// lengths differ.
    InvalidInput(String),

    /// The kernel cannot be applied to two equal-length numeric batches.
    InvalidKernel(String),
}

pub type StochMeanResult<T> = Result<T, StochMeanError>;

impl std::fmt::Display for StochMeanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StochMeanError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            StochMeanError::InvalidKernel(msg) => write!(f, "invalid kernel: {msg}"),
        }
    }
}

impl std::error::Error for StochMeanError {}
