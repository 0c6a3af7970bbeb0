//! Harmonic family construction
//!
//! Builds the frequency axis of the dictionary: one family of K cosine
//! basis signals per fundamental in a geometric grid.
//!
//! # Algorithm
//!
//! 1. Lay a geometric fundamental grid from `base_hz` to
//!    `base_hz * 2^octaves` with `1 + octaves * points_per_octave` points
//! 2. Convert each fundamental to angular frequency per sample
//! 3. For harmonics `n = 1..=K`, evaluate `cos(f0 * n * (t - n/2))` over
//!    the domain, with phase centered at the domain midpoint

use super::window::geomspace;
use crate::error::PursuitError;

/// One harmonic family: K unwindowed cosine basis signals sharing a
/// fundamental angular frequency. Immutable once built.
#[derive(Debug, Clone)]
pub struct HarmonicFamily {
    /// Fundamental frequency in Hz
    pub fundamental_hz: f32,
    /// Fundamental angular frequency in radians per sample
    pub omega: f32,
    /// Basis signals, index `k` holding harmonic `k + 1`
    pub harmonics: Vec<Vec<f32>>,
}

/// Build one harmonic family per fundamental in the geometric grid
///
/// # Arguments
///
/// * `n` - Sample domain length
/// * `base_hz` - Base fundamental frequency in Hz
/// * `octaves` - Number of octaves the grid spans above `base_hz`
/// * `points_per_octave` - Grid resolution (12 in the reference config)
/// * `num_harmonics` - Harmonics per family, K
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
///
/// Returns `PursuitError::InvalidInput` if the top of the grid exceeds the
/// Nyquist frequency for the first harmonic (higher harmonics alias by
/// construction and are kept, matching the reference behavior; only a
/// fundamental above Nyquist is rejected outright).
pub fn build_families(
    n: usize,
    base_hz: f32,
    octaves: usize,
    points_per_octave: usize,
    num_harmonics: usize,
    sample_rate: u32,
) -> Result<Vec<HarmonicFamily>, PursuitError> {
    let top_hz = base_hz * (2.0f32).powi(octaves as i32);
    if top_hz > sample_rate as f32 / 2.0 {
        return Err(PursuitError::InvalidInput(format!(
            "Fundamental grid top {:.1} Hz exceeds Nyquist for {} Hz",
            top_hz, sample_rate
        )));
    }

    let num_points = 1 + octaves * points_per_octave;
    let grid = geomspace(base_hz, top_hz, num_points);

    log::debug!(
        "Building harmonic families: {} fundamentals in [{:.1}, {:.1}] Hz, K={}",
        grid.len(),
        base_hz,
        top_hz,
        num_harmonics
    );

    let rad_per_sample = 2.0 * std::f32::consts::PI / sample_rate as f32;
    let mid = (n / 2) as f32;

    let families = grid
        .iter()
        .map(|&hz| {
            let omega = hz * rad_per_sample;
            let harmonics = (1..=num_harmonics)
                .map(|h| {
                    let w = omega * h as f32;
                    (0..n).map(|t| (w * (t as f32 - mid)).cos()).collect()
                })
                .collect();
            HarmonicFamily {
                fundamental_hz: hz,
                omega,
                harmonics,
            }
        })
        .collect();

    Ok(families)
}
