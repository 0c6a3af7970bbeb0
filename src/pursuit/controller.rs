//! Pursuit controller: the greedy subspace selection loop
//!
//! # Algorithm
//!
//! Each round while running:
//!
//! 1. Collect the active candidate set from the rejection mask
//! 2. Score every active candidate in parallel against the residual
//! 3. Select the best score (ties: first seen in enumeration order wins)
//! 4. At epoch start (threshold unset), fix the epoch threshold at the
//!    configured quantile of strictly positive active scores
//! 5. Reject every active candidate scoring below the epoch threshold
//! 6. If the whole dictionary is now rejected, clear the mask and unset
//!    the threshold (new epoch) and keep going
//! 7. Project the residual onto the winner's subspace, move that atom from
//!    residual to reconstruction
//! 8. Record the normalized residual norm; stop on convergence or at the
//!    iteration cap
//!
//! The epoch threshold is deliberately computed once per epoch and reused
//! while scores evolve; recomputing it every round would defeat the
//! amortized pruning.

use std::time::Instant;

use rayon::ThreadPool;

use super::evaluator::evaluate_candidates;
use super::result::{ExtractedAtom, PursuitMetadata, PursuitResult, TerminationReason};
use super::subspace::{project, project_residual};
use crate::config::PursuitConfig;
use crate::dictionary::{CandidateIndex, Dictionary};
use crate::error::PursuitError;

/// Mutable run state, owned by the controller and mutated once per round
struct PursuitState {
    residual: Vec<f32>,
    reconstruction: Vec<f32>,
    atoms: Vec<ExtractedAtom>,
    rejected: Vec<bool>,
    /// Epoch rejection threshold; `None` until fixed at epoch start
    threshold: Option<f32>,
}

/// Run the pursuit loop to termination
///
/// # Errors
///
/// Returns `PursuitError::EmptyActiveScoreSet` if an epoch threshold has to
/// be computed and no active candidate scores strictly positive,
/// `PursuitError::WorkerFailure` if an evaluation round aborts, and
/// `PursuitError::NumericalError` if the residual norm turns non-finite.
pub fn run(
    dictionary: &Dictionary,
    samples: &[f32],
    config: &PursuitConfig,
    pool: &ThreadPool,
) -> Result<PursuitResult, PursuitError> {
    let start_time = Instant::now();
    let n = samples.len();

    let input_norm = l2_norm(samples);
    if !input_norm.is_finite() {
        return Err(PursuitError::NumericalError(
            "Input signal norm is not finite".to_string(),
        ));
    }

    let mut state = PursuitState {
        residual: samples.to_vec(),
        reconstruction: vec![0.0; n],
        atoms: Vec::new(),
        rejected: vec![false; dictionary.num_candidates()],
        threshold: None,
    };
    let mut residual_norms = Vec::new();
    let mut evaluations_per_round = Vec::new();
    let mut epoch_resets = 0usize;

    // An all-zero input is already explained; report convergence at
    // iteration zero rather than dividing by a zero norm.
    let initial_norm = if input_norm > 0.0 { 1.0 } else { 0.0 };
    if initial_norm < config.residual_target {
        log::info!("Input already below residual target, nothing to pursue");
        residual_norms.push(initial_norm);
        return Ok(finish(
            state,
            residual_norms,
            evaluations_per_round,
            epoch_resets,
            TerminationReason::Converged,
            dictionary,
            start_time,
        ));
    }

    log::info!(
        "Beginning pursuit: {} samples, {} candidates, target norm {}",
        n,
        dictionary.num_candidates(),
        config.residual_target
    );

    let mut termination = TerminationReason::MaxIterationsReached;

    for iteration in 0..config.max_iterations {
        // Step 1: active set, in fixed enumeration order
        let active: Vec<CandidateIndex> = (0..dictionary.num_candidates())
            .filter(|&flat| !state.rejected[flat])
            .map(|flat| dictionary.candidate_at(flat))
            .collect();
        evaluations_per_round.push(active.len());

        // Step 2: scatter/gather scoring round (hard barrier)
        let scores = evaluate_candidates(pool, dictionary, &active, &state.residual)?;

        // Step 3: first-seen-wins argmax
        let (best_candidate, best_score) = select_best(&scores);

        // Steps 4-5: epoch threshold and rejection
        let threshold = match state.threshold {
            Some(t) => t,
            None => {
                let t = epoch_threshold(&scores, config.rejection_quantile)?;
                log::debug!("Epoch threshold fixed at {:.6}", t);
                state.threshold = Some(t);
                t
            }
        };
        for &(idx, score) in &scores {
            if score < threshold {
                state.rejected[dictionary.flat_index(idx)] = true;
            }
        }

        // Step 6: dictionary exhaustion starts a new epoch, never terminates
        if state.rejected.iter().all(|&r| r) {
            log::info!("All candidates rejected, re-initializing dictionary");
            state.rejected.fill(false);
            state.threshold = None;
            epoch_resets += 1;
        }

        // Step 7: extract the winning atom and update the decomposition.
        // The same atom buffer is added to the reconstruction and
        // subtracted from the residual, so their sum stays exactly the
        // input.
        let subspace = project(
            &dictionary.windows[best_candidate.window],
            &dictionary.families[best_candidate.family],
        );
        let atom = project_residual(&subspace, &state.residual);
        for ((rec, res), &a) in state
            .reconstruction
            .iter_mut()
            .zip(state.residual.iter_mut())
            .zip(&atom)
        {
            *rec += a;
            *res -= a;
        }
        state.atoms.push(ExtractedAtom {
            samples: atom,
            candidate: best_candidate,
            score: best_score,
            iteration,
        });

        // Step 8: record progress
        let norm = l2_norm(&state.residual) / input_norm;
        if !norm.is_finite() {
            return Err(PursuitError::NumericalError(format!(
                "Residual norm became non-finite at iteration {}",
                iteration
            )));
        }
        residual_norms.push(norm);

        let num_rejected = state.rejected.iter().filter(|&&r| r).count();
        log::debug!(
            "iter {}, residual norm {:.4}, rejected {}",
            iteration,
            norm,
            num_rejected
        );

        // Step 9: termination
        if norm < config.residual_target {
            log::info!("Converged at iteration {}: residual norm {:.4}", iteration, norm);
            termination = TerminationReason::Converged;
            break;
        }
    }

    if termination == TerminationReason::MaxIterationsReached {
        log::info!(
            "Iteration cap {} reached, residual norm {:.4}",
            config.max_iterations,
            residual_norms.last().copied().unwrap_or(1.0)
        );
    }

    Ok(finish(
        state,
        residual_norms,
        evaluations_per_round,
        epoch_resets,
        termination,
        dictionary,
        start_time,
    ))
}

fn finish(
    state: PursuitState,
    residual_norms: Vec<f32>,
    evaluations_per_round: Vec<usize>,
    epoch_resets: usize,
    termination: TerminationReason,
    dictionary: &Dictionary,
    start_time: Instant,
) -> PursuitResult {
    let iterations = state.atoms.len();
    PursuitResult {
        reconstruction: state.reconstruction,
        residual: state.residual,
        atoms: state.atoms,
        residual_norms,
        termination,
        metadata: PursuitMetadata {
            iterations,
            epoch_resets,
            evaluations_per_round,
            num_families: dictionary.families.len(),
            num_windows: dictionary.windows.len(),
            processing_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
        },
    }
}

/// First-seen-wins argmax over a round's scores
///
/// Ties resolve to the earliest candidate in the round's enumeration order,
/// making selection deterministic.
fn select_best(scores: &[(CandidateIndex, f32)]) -> (CandidateIndex, f32) {
    let mut best = scores[0];
    for &entry in &scores[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }
    best
}

/// Epoch rejection threshold: quantile of strictly positive round scores
///
/// # Errors
///
/// Returns `PursuitError::EmptyActiveScoreSet` if no score is strictly
/// positive; re-initializing the epoch would loop forever against the same
/// unscored dictionary, so this is surfaced to the caller.
fn epoch_threshold(scores: &[(CandidateIndex, f32)], p: f32) -> Result<f32, PursuitError> {
    let mut positive: Vec<f32> = scores.iter().map(|&(_, s)| s).filter(|&s| s > 0.0).collect();
    if positive.is_empty() {
        return Err(PursuitError::EmptyActiveScoreSet(
            "No active candidate scored strictly positive at epoch start".to_string(),
        ));
    }
    positive.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Ok(quantile_sorted(&positive, p))
}

/// Linear-interpolation quantile of an ascending-sorted slice
///
/// `p = 0` gives the minimum, `p = 1` the maximum.
fn quantile_sorted(sorted: &[f32], p: f32) -> f32 {
    let m = sorted.len();
    if m == 1 {
        return sorted[0];
    }
    let h = p * (m - 1) as f32;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|&x| x * x).sum::<f32>().sqrt()
}
