//! Synthetic signal construction
//!
//! Builds test signals as known weighted sums of dictionary subspaces,
//! optionally with uniform noise. Used by tests and benchmarks to exercise
//! the engine against signals with a known sparse decomposition.

use rand::Rng;

use crate::dictionary::{CandidateIndex, Dictionary};
use crate::error::PursuitError;
use crate::pursuit::subspace::project;

/// Build a signal from explicit (candidate, per-harmonic coefficient) picks
///
/// The signal is the sum over picks of `sum_k coef[k] * member_k` for the
/// candidate's subspace. Degenerate members contribute nothing regardless
/// of their coefficient.
///
/// # Errors
///
/// Returns `PursuitError::InvalidInput` if a candidate index is out of
/// range or a coefficient vector does not match the harmonic count.
pub fn synthetic_signal_from(
    dictionary: &Dictionary,
    picks: &[(CandidateIndex, Vec<f32>)],
) -> Result<Vec<f32>, PursuitError> {
    let mut signal = vec![0.0f32; dictionary.domain_len];

    for (idx, coefficients) in picks {
        if idx.family >= dictionary.families.len() || idx.window >= dictionary.windows.len() {
            return Err(PursuitError::InvalidInput(format!(
                "Candidate {:?} outside dictionary {}x{}",
                idx,
                dictionary.families.len(),
                dictionary.windows.len()
            )));
        }
        let subspace = project(&dictionary.windows[idx.window], &dictionary.families[idx.family]);
        if coefficients.len() != subspace.num_members() {
            return Err(PursuitError::InvalidInput(format!(
                "Expected {} coefficients for {:?}, got {}",
                subspace.num_members(),
                idx,
                coefficients.len()
            )));
        }

        let start = subspace.support_start;
        for (member, &coef) in subspace.members.iter().zip(coefficients) {
            for (s, &m) in signal[start..start + member.len()].iter_mut().zip(member) {
                *s += coef * m;
            }
        }
    }

    Ok(signal)
}

/// Build a signal from randomly chosen atoms plus uniform noise
///
/// Picks `num_atoms` random dictionary cells with per-harmonic coefficients
/// uniform in `[0, 1)`, then adds uniform noise in `[-noise_amp, noise_amp]`
/// (skipped when `noise_amp` is zero).
pub fn synthetic_signal(
    dictionary: &Dictionary,
    num_atoms: usize,
    noise_amp: f32,
    rng: &mut impl Rng,
) -> Vec<f32> {
    let k = dictionary
        .families
        .first()
        .map(|f| f.harmonics.len())
        .unwrap_or(0);

    let picks: Vec<(CandidateIndex, Vec<f32>)> = (0..num_atoms)
        .map(|_| {
            let idx = CandidateIndex {
                family: rng.random_range(0..dictionary.families.len()),
                window: rng.random_range(0..dictionary.windows.len()),
            };
            let coefficients = (0..k).map(|_| rng.random_range(0.0..1.0)).collect();
            (idx, coefficients)
        })
        .collect();

    // Picks are in range by construction.
    let mut signal = synthetic_signal_from(dictionary, &picks)
        .unwrap_or_else(|_| vec![0.0; dictionary.domain_len]);

    if noise_amp > 0.0 {
        for s in &mut signal {
            *s += rng.random_range(-noise_amp..noise_amp);
        }
    }

    signal
}
