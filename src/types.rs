// Shared tag enums used across the node catalog and the kernels.
//
// Core data structures (Particle, Bunch, TrackContext) live in
// `src/primitives.rs`. This file holds the small selector types that appear
// inside node parameter records and are forwarded to the kernels.

/// Rotation treatment selected by the general RotationI/RotationF nodes.
///
/// Two conventions exist: a thin-lens treatment that rotates the
/// phase-space coordinates in place, and a finite-length treatment that
/// additionally displaces the bunch using the geometric lever arm of the
/// element the node brackets. The `mode: u8` tags in serialized lattice
/// configs correspond to these variants via `TryFrom<u8>`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RotationMode {
    /// Rotate phase-space coordinates only; no geometric displacement.
    ThinLens = 0,
    /// Rotate and displace using the element's lever arm.
    FiniteLength = 1,
}

impl TryFrom<u8> for RotationMode {
    type Error = crate::error::TrackError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RotationMode::ThinLens),
            1 => Ok(RotationMode::FiniteLength),
            _ => Err(crate::error::TrackError::UnknownRotationMode(value)),
        }
    }
}

/// Geometry of the element an entrance/exit error node brackets.
///
/// Selects the lever arm used by the finite-length rotation treatment:
/// half the element length for a straight element, the half-chord
/// `rho * sin(theta / 2)` for a bent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ElementShape {
    Straight,
    Bent,
}

/// Index of a sub-slice ("part") of a lattice element during tracking.
pub type PartIndex = usize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_mode_tags_round_trip() {
        assert_eq!(RotationMode::try_from(0).unwrap(), RotationMode::ThinLens);
        assert_eq!(RotationMode::try_from(1).unwrap(), RotationMode::FiniteLength);
        assert!(RotationMode::try_from(7).is_err());
    }
}
