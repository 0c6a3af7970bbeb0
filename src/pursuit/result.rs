//! Pursuit result types

use serde::{Deserialize, Serialize};

use crate::dictionary::CandidateIndex;

/// Why the pursuit loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Normalized residual norm fell below the configured target
    Converged,
    /// The iteration cap was reached before convergence
    MaxIterationsReached,
}

/// One extracted atom: the projection of the residual onto the winning
/// subspace at a single iteration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedAtom {
    /// Full-length atom signal
    pub samples: Vec<f32>,
    /// Dictionary cell the atom was drawn from
    pub candidate: CandidateIndex,
    /// The winning score at selection time
    pub score: f32,
    /// Iteration the atom was extracted on (0-based)
    pub iteration: usize,
}

/// Run statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PursuitMetadata {
    /// Iterations actually run
    pub iterations: usize,
    /// Number of dictionary re-initializations (epoch resets)
    pub epoch_resets: usize,
    /// Active-set size at the start of each round
    pub evaluations_per_round: Vec<usize>,
    /// Number of harmonic families in the dictionary
    pub num_families: usize,
    /// Number of windows in the dictionary
    pub num_windows: usize,
    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f32,
}

/// Complete output of a pursuit run
///
/// `reconstruction + residual` equals the input signal to within
/// floating-point tolerance at every iteration boundary, including on both
/// terminal states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PursuitResult {
    /// Sum of all extracted atoms, same length as the input
    pub reconstruction: Vec<f32>,
    /// Unexplained remainder, same length as the input
    pub residual: Vec<f32>,
    /// Atoms in extraction order
    pub atoms: Vec<ExtractedAtom>,
    /// Normalized residual norm after each iteration
    pub residual_norms: Vec<f32>,
    /// Why the loop stopped
    pub termination: TerminationReason,
    /// Run statistics
    pub metadata: PursuitMetadata,
}
