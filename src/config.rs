//! Configuration parameters for harmonic matching pursuit

use crate::error::PursuitError;

/// Pursuit configuration parameters
///
/// The defaults reproduce the reference configuration: a two-second working
/// signal at 44.1 kHz, a fundamental grid spanning one octave above C2 at
/// 12 points per octave, 25 harmonics per family, and a 50 × 3 window grid.
#[derive(Debug, Clone)]
pub struct PursuitConfig {
    // Dictionary: harmonic axis
    /// Sample rate in Hz used to convert fundamentals to radians/sample
    /// (default: 44100)
    pub sample_rate: u32,

    /// Base fundamental frequency in Hz (default: 65.4, C2)
    pub base_hz: f32,

    /// Number of octaves above the base fundamental to cover (default: 1)
    pub octaves: usize,

    /// Fundamental grid resolution in points per octave (default: 12)
    pub points_per_octave: usize,

    /// Number of harmonics per family, K (default: 25)
    pub num_harmonics: usize,

    // Dictionary: window axis
    /// Number of window center positions spread over the domain (default: 50)
    pub num_centers: usize,

    /// Number of window scales in the geometric scale grid (default: 3)
    pub num_scales: usize,

    /// Gaussian truncation epsilon; envelope values below this are zeroed,
    /// defining each window's support (default: 1e-3)
    pub gauss_eps: f32,

    // Pursuit control
    /// Quantile of strictly positive scores used as the epoch rejection
    /// threshold, in [0, 1] (default: 0.90)
    pub rejection_quantile: f32,

    /// Stop once the residual norm divided by the input norm falls below
    /// this value (default: 0.05)
    pub residual_target: f32,

    /// Worker pool size for parallel candidate evaluation (default: 3)
    pub num_workers: usize,

    /// Maximum number of pursuit iterations (default: 50)
    pub max_iterations: usize,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            base_hz: 65.4,
            octaves: 1,
            points_per_octave: 12,
            num_harmonics: 25,
            num_centers: 50,
            num_scales: 3,
            gauss_eps: 1e-3,
            rejection_quantile: 0.90,
            residual_target: 0.05,
            num_workers: 3,
            max_iterations: 50,
        }
    }
}

impl PursuitConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `PursuitError::InvalidInput` if any parameter is outside its
    /// valid range.
    pub fn validate(&self) -> Result<(), PursuitError> {
        if self.sample_rate == 0 {
            return Err(PursuitError::InvalidInput("Invalid sample rate: 0".to_string()));
        }
        if !(self.base_hz > 0.0) || !self.base_hz.is_finite() {
            return Err(PursuitError::InvalidInput(format!(
                "Invalid base frequency: {}",
                self.base_hz
            )));
        }
        if self.points_per_octave == 0 {
            return Err(PursuitError::InvalidInput(
                "Invalid fundamental grid resolution: 0 points per octave".to_string(),
            ));
        }
        if self.num_harmonics == 0 {
            return Err(PursuitError::InvalidInput(
                "Invalid harmonic count: 0".to_string(),
            ));
        }
        // The center grid spacing defines the scale grid, so at least two
        // centers are required.
        if self.num_centers < 2 {
            return Err(PursuitError::InvalidInput(format!(
                "Invalid window center count: {} (need at least 2)",
                self.num_centers
            )));
        }
        if self.num_scales == 0 {
            return Err(PursuitError::InvalidInput(
                "Invalid window scale count: 0".to_string(),
            ));
        }
        if !(self.gauss_eps > 0.0) || self.gauss_eps >= 1.0 {
            return Err(PursuitError::InvalidInput(format!(
                "Invalid Gaussian truncation epsilon: {} (need 0 < eps < 1)",
                self.gauss_eps
            )));
        }
        if !(0.0..=1.0).contains(&self.rejection_quantile) {
            return Err(PursuitError::InvalidInput(format!(
                "Invalid rejection quantile: {} (need [0, 1])",
                self.rejection_quantile
            )));
        }
        if !(self.residual_target > 0.0) || !self.residual_target.is_finite() {
            return Err(PursuitError::InvalidInput(format!(
                "Invalid residual target: {}",
                self.residual_target
            )));
        }
        if self.num_workers == 0 {
            return Err(PursuitError::InvalidInput(
                "Invalid worker count: 0".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(PursuitError::InvalidInput(
                "Invalid iteration cap: 0".to_string(),
            ));
        }
        Ok(())
    }
}
