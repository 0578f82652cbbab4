//!
//! Defines error types for the tracking layer.

/// Represents faults raised while tracking a bunch through an error node.
///
/// The node layer performs no validation of its own; these originate in the
/// transform kernels and are propagated unchanged through `track` /
/// `track_bunch`. A kernel fault aborts the enclosing lattice walk — there
/// is no retry, since silently skipping a perturbation would corrupt the
/// simulated physics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
    /// An oscillating kicker was given a zero phase length; the oscillation
    /// factor `sin(2*pi*z / phase_length + phase)` is undefined.
    #[error("oscillating kicker phase length must be nonzero")]
    ZeroPhaseLength,
    /// A serialized rotation-mode tag did not match a known convention.
    #[error("unknown rotation mode tag: {0}")]
    UnknownRotationMode(u8),
    /// A general, otherwise unspecified tracking fault.
    #[error("tracking error: {0}")]
    Other(String),
}
