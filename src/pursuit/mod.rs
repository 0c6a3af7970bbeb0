//! Greedy subspace matching pursuit
//!
//! The controller drives iterations; each iteration scores the active
//! dictionary candidates in parallel, selects the best subspace, and moves
//! its projection from the residual to the reconstruction.

pub mod controller;
pub mod evaluator;
pub mod result;
pub mod subspace;

pub use result::{ExtractedAtom, PursuitMetadata, PursuitResult, TerminationReason};
pub use subspace::Subspace;
