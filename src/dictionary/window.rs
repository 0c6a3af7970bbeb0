//! Window grid construction
//!
//! Builds the time-localization axis of the dictionary: truncated Gaussian
//! envelopes at a cross product of center positions and scales.
//!
//! # Algorithm
//!
//! 1. Spread `num_centers` center positions evenly over `[0, n]`
//! 2. Build a geometric scale grid from `spacing / 2` to `spacing * 2`,
//!    where `spacing` is the center-grid step
//! 3. For each scale, evaluate a centered Gaussian of length `n` and zero
//!    every value below the truncation epsilon
//! 4. For each (center, scale) pair, integer-shift the truncated envelope so
//!    its peak sits at the center position, zero-filling at the edges

use std::ops::Range;

use crate::error::PursuitError;

/// A time-localized envelope over the sample domain
///
/// Values below the truncation epsilon are exactly zero; `support` is the
/// contiguous index range of nonzero values. Immutable once built.
#[derive(Debug, Clone)]
pub struct Window {
    /// Envelope values over the full sample domain
    pub values: Vec<f32>,
    /// Contiguous range of indices with nonzero envelope value
    pub support: Range<usize>,
    /// Center position in samples (peak location)
    pub center: f32,
    /// Gaussian scale (standard deviation) in samples
    pub scale: f32,
}

impl Window {
    /// Number of samples in the window's support
    pub fn support_len(&self) -> usize {
        self.support.end - self.support.start
    }
}

/// Geometric sequence from `start` to `end` with `num` points
///
/// With `num == 1` the sequence is just `[start]`.
pub(crate) fn geomspace(start: f32, end: f32, num: usize) -> Vec<f32> {
    if num == 1 {
        return vec![start];
    }
    let ratio = (end / start).powf(1.0 / (num - 1) as f32);
    (0..num).map(|i| start * ratio.powi(i as i32)).collect()
}

/// Build the window grid
///
/// Produces `num_centers * num_scales` windows in center-major order: all
/// scales for center 0, then all scales for center 1, and so on. The order
/// defines each window's index in the dictionary and is fixed for the run.
///
/// # Arguments
///
/// * `n` - Sample domain length
/// * `num_centers` - Number of center positions over `[0, n]` (at least 2)
/// * `num_scales` - Number of scales in the geometric scale grid
/// * `gauss_eps` - Truncation epsilon; envelope values below this are zeroed
///
/// # Errors
///
/// Returns `PursuitError::InvalidInput` if the domain is too short or any
/// window's truncated support is empty (epsilon too large for the scale).
pub fn build_windows(
    n: usize,
    num_centers: usize,
    num_scales: usize,
    gauss_eps: f32,
) -> Result<Vec<Window>, PursuitError> {
    if n < 2 {
        return Err(PursuitError::InvalidInput(format!(
            "Domain too short for window grid: {} samples",
            n
        )));
    }

    let spacing = n as f32 / (num_centers - 1) as f32;
    let scales = geomspace(spacing / 2.0, spacing * 2.0, num_scales);

    log::debug!(
        "Building window grid: {} centers (spacing {:.1}), scales {:?}",
        num_centers,
        spacing,
        scales
    );

    // One truncated base envelope per scale, shifted per center below.
    let mut base_envelopes = Vec::with_capacity(num_scales);
    for &scale in &scales {
        let envelope = truncated_gaussian(n, scale, gauss_eps)?;
        base_envelopes.push(envelope);
    }

    let mut windows = Vec::with_capacity(num_centers * num_scales);
    for c in 0..num_centers {
        let center = c as f32 * spacing;
        for (s, envelope) in base_envelopes.iter().enumerate() {
            windows.push(shift_to_center(envelope, center, scales[s])?);
        }
    }

    Ok(windows)
}

/// Evaluate a centered Gaussian of length `n` and zero values below `eps`
///
/// The peak sits at `(n - 1) / 2`. Returns the envelope together with its
/// contiguous support range.
fn truncated_gaussian(n: usize, scale: f32, eps: f32) -> Result<(Vec<f32>, Range<usize>), PursuitError> {
    let mid = (n - 1) as f32 / 2.0;
    let mut values = vec![0.0f32; n];
    let mut first = n;
    let mut last = 0usize;

    for (i, v) in values.iter_mut().enumerate() {
        let z = (i as f32 - mid) / scale;
        let g = (-0.5 * z * z).exp();
        if g >= eps {
            *v = g;
            if i < first {
                first = i;
            }
            last = i;
        }
    }

    if first > last {
        return Err(PursuitError::InvalidInput(format!(
            "Gaussian with scale {:.3} has empty support at eps {}",
            scale, eps
        )));
    }

    Ok((values, first..last + 1))
}

/// Shift a truncated envelope so its peak sits at `center`
///
/// Integer shift with zero fill; the shifted support is clipped to the
/// domain, so windows centered near an edge lose the part that falls
/// outside.
fn shift_to_center(
    envelope: &(Vec<f32>, Range<usize>),
    center: f32,
    scale: f32,
) -> Result<Window, PursuitError> {
    let (base, base_support) = envelope;
    let n = base.len();
    let mid = (n / 2) as i64;
    let shift = center.round() as i64 - mid;

    let mut values = vec![0.0f32; n];
    let start = (base_support.start as i64 + shift).clamp(0, n as i64) as usize;
    let end = (base_support.end as i64 + shift).clamp(0, n as i64) as usize;
    for i in start..end {
        values[i] = base[(i as i64 - shift) as usize];
    }

    if start >= end {
        return Err(PursuitError::InvalidInput(format!(
            "Window centered at {:.1} has no support inside the domain",
            center
        )));
    }

    Ok(Window {
        values,
        support: start..end,
        center,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geomspace_endpoints() {
        let g = geomspace(2.0, 8.0, 3);
        assert_eq!(g.len(), 3);
        assert!((g[0] - 2.0).abs() < 1e-6);
        assert!((g[1] - 4.0).abs() < 1e-5);
        assert!((g[2] - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_geomspace_single_point() {
        let g = geomspace(3.0, 12.0, 1);
        assert_eq!(g, vec![3.0]);
    }

    #[test]
    fn test_truncation_zeroes_tails() {
        let (values, support) = truncated_gaussian(101, 5.0, 1e-3).unwrap();
        // Peak at the midpoint
        assert!((values[50] - 1.0).abs() < 1e-6);
        // Everything outside the support is exactly zero
        for (i, &v) in values.iter().enumerate() {
            if support.contains(&i) {
                assert!(v >= 1e-3, "in-support value at {} below eps: {}", i, v);
            } else {
                assert_eq!(v, 0.0, "out-of-support value at {} not zeroed", i);
            }
        }
    }

    #[test]
    fn test_window_peak_at_center() {
        let windows = build_windows(200, 5, 2, 1e-3).unwrap();
        assert_eq!(windows.len(), 10);
        for w in &windows {
            let peak = w
                .values
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .map(|(i, _)| i)
                .unwrap();
            // Edge windows get clipped, so only check interior centers.
            let c = w.center.round() as usize;
            if c > 0 && c < 199 {
                assert!(
                    (peak as i64 - c as i64).abs() <= 1,
                    "peak {} far from center {}",
                    peak,
                    c
                );
            }
        }
    }

    #[test]
    fn test_window_support_matches_nonzero_values() {
        let windows = build_windows(400, 9, 3, 1e-3).unwrap();
        for w in &windows {
            for (i, &v) in w.values.iter().enumerate() {
                assert_eq!(
                    v != 0.0,
                    w.support.contains(&i),
                    "support mismatch at index {}",
                    i
                );
            }
        }
    }

    #[test]
    fn test_domain_too_short() {
        assert!(build_windows(1, 5, 3, 1e-3).is_err());
    }
}
