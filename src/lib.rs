#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Beamline-Errors models synthetic error perturbations injected into a
//! particle-accelerator beamline simulation.
//!
//! The crate provides a catalog of zero-length error nodes (misalignments,
//! field-strength drifts, rotations, oscillating kicks) that can be spliced
//! into an element-by-element tracking pipeline without altering path-length
//! bookkeeping, together with the pure phase-space transform kernels each
//! node dispatches to.

// Module for shared tag enums (RotationMode, ElementShape).
pub mod types;

// Module for core data structures (Particle, Bunch, TrackContext).
pub mod primitives;

// Re-export the core data structures at the crate root.
pub use primitives::*;

// Module for tracking error types.
pub mod error;

// Module for the pure phase-space transform kernels.
pub mod kernels;

// Module for the error-node catalog and its dispatch contract.
pub mod node;

// Module for the minimal lattice seam used to exercise the insertion
// contract (ordered element walk, path-length accounting).
pub mod lattice;

pub use error::TrackError;
pub use node::{ErrorKind, ErrorNode};
