//! Parallel candidate evaluation
//!
//! One scatter/gather round per pursuit iteration: the active candidate set
//! is partitioned across the run's worker pool, each worker projects and
//! scores its candidates against an immutable residual snapshot, and the
//! controller blocks until every result is in. Selection never sees a
//! partial result set.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::ThreadPool;

use super::subspace::{project, score};
use crate::dictionary::{CandidateIndex, Dictionary};
use crate::error::PursuitError;

/// Build the worker pool used for the lifetime of a run
///
/// # Errors
///
/// Returns `PursuitError::WorkerFailure` if the pool cannot be created.
pub fn build_pool(num_workers: usize) -> Result<ThreadPool, PursuitError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_workers)
        .build()
        .map_err(|e| PursuitError::WorkerFailure(format!("Failed to build worker pool: {}", e)))
}

/// Score every active candidate against the residual snapshot
///
/// Each evaluation is independent and side-effect-free: workers read only
/// the shared dictionary and the residual slice. Results come back in the
/// active set's enumeration order regardless of worker scheduling, which
/// keeps the controller's first-seen tie-break deterministic.
///
/// # Errors
///
/// Returns `PursuitError::WorkerFailure` if any worker panics; the round's
/// partial results are discarded.
pub fn evaluate_candidates(
    pool: &ThreadPool,
    dictionary: &Dictionary,
    active: &[CandidateIndex],
    residual: &[f32],
) -> Result<Vec<(CandidateIndex, f32)>, PursuitError> {
    log::debug!("Evaluating {} active candidates", active.len());

    let round = catch_unwind(AssertUnwindSafe(|| {
        pool.install(|| {
            active
                .par_iter()
                .map(|&idx| {
                    let subspace = project(
                        &dictionary.windows[idx.window],
                        &dictionary.families[idx.family],
                    );
                    (idx, score(&subspace, residual))
                })
                .collect::<Vec<_>>()
        })
    }));

    match round {
        Ok(scores) => Ok(scores),
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "worker panicked".to_string());
            Err(PursuitError::WorkerFailure(detail))
        }
    }
}
