//! Static dictionary: harmonic families crossed with windows
//!
//! The dictionary is built once per run and shared read-only by every
//! candidate evaluation. A candidate is one (family, window) cell; its
//! subspace is derived on demand by the projector.

pub mod harmonic;
pub mod window;

use serde::{Deserialize, Serialize};

use crate::config::PursuitConfig;
use crate::error::PursuitError;
pub use harmonic::HarmonicFamily;
pub use window::Window;

/// Identifies one dictionary cell: a (harmonic family, window) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateIndex {
    /// Index into the dictionary's harmonic families
    pub family: usize,
    /// Index into the dictionary's windows
    pub window: usize,
}

/// The full candidate dictionary for a run: every harmonic family crossed
/// with every window. Static once built.
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Harmonic families (frequency axis)
    pub families: Vec<HarmonicFamily>,
    /// Windows (time-localization axis)
    pub windows: Vec<Window>,
    /// Sample domain length
    pub domain_len: usize,
}

impl Dictionary {
    /// Build the dictionary for a domain of `n` samples
    ///
    /// # Errors
    ///
    /// Returns `PursuitError::InvalidInput` if either axis cannot be built
    /// for the given configuration.
    pub fn build(n: usize, config: &PursuitConfig) -> Result<Self, PursuitError> {
        let windows =
            window::build_windows(n, config.num_centers, config.num_scales, config.gauss_eps)?;
        let families = harmonic::build_families(
            n,
            config.base_hz,
            config.octaves,
            config.points_per_octave,
            config.num_harmonics,
            config.sample_rate,
        )?;

        log::info!(
            "Dictionary built: {} families x {} windows = {} candidates",
            families.len(),
            windows.len(),
            families.len() * windows.len()
        );

        Ok(Self {
            families,
            windows,
            domain_len: n,
        })
    }

    /// Total number of candidates (families × windows)
    pub fn num_candidates(&self) -> usize {
        self.families.len() * self.windows.len()
    }

    /// Flat position of a candidate in the fixed family-major enumeration
    ///
    /// This order defines the deterministic first-seen tie-break during
    /// selection and the layout of the rejection mask.
    pub fn flat_index(&self, idx: CandidateIndex) -> usize {
        idx.family * self.windows.len() + idx.window
    }

    /// Candidate at a flat enumeration position
    pub fn candidate_at(&self, flat: usize) -> CandidateIndex {
        CandidateIndex {
            family: flat / self.windows.len(),
            window: flat % self.windows.len(),
        }
    }

    /// All candidates in the fixed family-major enumeration order
    pub fn candidates(&self) -> impl Iterator<Item = CandidateIndex> + '_ {
        (0..self.num_candidates()).map(|flat| self.candidate_at(flat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> PursuitConfig {
        PursuitConfig {
            num_centers: 4,
            num_scales: 2,
            octaves: 1,
            points_per_octave: 2,
            num_harmonics: 3,
            base_hz: 440.0,
            ..PursuitConfig::default()
        }
    }

    #[test]
    fn test_dictionary_dimensions() {
        let dict = Dictionary::build(500, &small_config()).unwrap();
        assert_eq!(dict.windows.len(), 8);
        assert_eq!(dict.families.len(), 3);
        assert_eq!(dict.num_candidates(), 24);
        assert_eq!(dict.domain_len, 500);
    }

    #[test]
    fn test_flat_index_round_trip() {
        let dict = Dictionary::build(500, &small_config()).unwrap();
        for flat in 0..dict.num_candidates() {
            let idx = dict.candidate_at(flat);
            assert_eq!(dict.flat_index(idx), flat);
        }
    }

    #[test]
    fn test_enumeration_is_family_major() {
        let dict = Dictionary::build(500, &small_config()).unwrap();
        let all: Vec<CandidateIndex> = dict.candidates().collect();
        assert_eq!(all[0], CandidateIndex { family: 0, window: 0 });
        assert_eq!(all[1], CandidateIndex { family: 0, window: 1 });
        assert_eq!(
            all[dict.windows.len()],
            CandidateIndex { family: 1, window: 0 }
        );
        assert_eq!(all.len(), dict.num_candidates());
    }
}
