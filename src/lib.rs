//! # Harmonic Pursuit
//!
//! Greedy sparse decomposition of a sampled audio signal into windowed
//! harmonic atoms, a structured variant of matching pursuit that searches
//! over subspaces instead of single dictionary vectors.
//!
//! ## How it works
//!
//! The dictionary is the cross product of a window grid (truncated Gaussian
//! envelopes over centers × scales) and a harmonic-family grid (K cosine
//! harmonics per fundamental in a geometric frequency grid). Each iteration
//! scores every active (family, window) candidate by the energy of the
//! residual's projection onto the candidate's windowed, normalized subspace,
//! subtracts the full projection of the best candidate, and prunes
//! low-scoring candidates with an adaptive quantile threshold until the
//! residual is small enough or the iteration cap is hit.
//!
//! ## Quick Start
//!
//! ```no_run
//! use harmonic_pursuit::{pursue, PursuitConfig};
//!
//! // Load audio samples (mono, f32, normalized) with your own I/O
//! let samples: Vec<f32> = vec![]; // Your audio data
//!
//! let result = pursue(&samples, PursuitConfig::default())?;
//!
//! println!(
//!     "{} atoms, final residual norm {:.4} ({:?})",
//!     result.atoms.len(),
//!     result.residual_norms.last().unwrap_or(&1.0),
//!     result.termination
//! );
//! # Ok::<(), harmonic_pursuit::PursuitError>(())
//! ```
//!
//! Decoding the input waveform, resampling, playback, plotting, and
//! persisting results are the caller's responsibility; the engine consumes
//! a finite sample slice and a configuration, and returns a decomposition.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod pursuit;
pub mod synthesis;

// Re-export main types
pub use config::PursuitConfig;
pub use dictionary::{CandidateIndex, Dictionary};
pub use error::PursuitError;
pub use pursuit::{ExtractedAtom, PursuitMetadata, PursuitResult, TerminationReason};

/// Decompose a signal into windowed harmonic atoms
///
/// Builds the dictionary and worker pool for the run, then drives the
/// pursuit loop to termination. The worker pool lives for the duration of
/// the call and is released on every exit path.
///
/// # Arguments
///
/// * `samples` - Mono samples, pre-normalized and truncated by the caller
/// * `config` - Pursuit configuration parameters
///
/// # Returns
///
/// `PursuitResult` with the reconstruction, residual, extracted atoms,
/// per-iteration residual-norm trace, and termination reason
///
/// # Errors
///
/// Returns `PursuitError` if the input or configuration is invalid, a
/// worker round aborts, or an epoch cannot score any candidate.
///
/// # Example
///
/// ```no_run
/// use harmonic_pursuit::{pursue, PursuitConfig};
///
/// let samples = vec![0.0f32; 44100 * 2];
/// let result = pursue(&samples, PursuitConfig::default())?;
/// # Ok::<(), harmonic_pursuit::PursuitError>(())
/// ```
pub fn pursue(samples: &[f32], config: PursuitConfig) -> Result<PursuitResult, PursuitError> {
    log::debug!("Starting pursuit: {} samples", samples.len());

    if samples.is_empty() {
        return Err(PursuitError::InvalidInput("Empty input signal".to_string()));
    }
    if samples.iter().any(|s| !s.is_finite()) {
        return Err(PursuitError::InvalidInput(
            "Input signal contains non-finite samples".to_string(),
        ));
    }
    config.validate()?;

    let dictionary = Dictionary::build(samples.len(), &config)?;
    let pool = pursuit::evaluator::build_pool(config.num_workers)?;

    pursuit::controller::run(&dictionary, samples, &config, &pool)
}
