//! Error types for the pursuit engine

use std::fmt;

/// Errors that can occur during dictionary construction or pursuit
#[derive(Debug, Clone)]
pub enum PursuitError {
    /// Invalid input signal or configuration parameters
    InvalidInput(String),

    /// No active candidate produced a strictly positive score when the
    /// epoch threshold had to be computed; the epoch cannot make progress
    EmptyActiveScoreSet(String),

    /// A worker fault occurred during candidate evaluation; the round's
    /// partial results were discarded
    WorkerFailure(String),

    /// Numerical error (non-finite norm, overflow, etc.)
    NumericalError(String),
}

impl fmt::Display for PursuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PursuitError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PursuitError::EmptyActiveScoreSet(msg) => {
                write!(f, "Empty active score set: {}", msg)
            }
            PursuitError::WorkerFailure(msg) => write!(f, "Worker failure: {}", msg),
            PursuitError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for PursuitError {}
