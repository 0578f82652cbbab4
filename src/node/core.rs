//!
//! The error-node catalog and its dispatch contract.
//!
//! Each catalog entry is a zero-length lattice element that, on invocation,
//! delegates to exactly one phase-space transform kernel with a fixed set of
//! bound parameters. The per-kind parameter records live in [`ErrorKind`];
//! [`ErrorNode`] pairs a kind with the shared zero-length element
//! bookkeeping. Nodes are immutable after construction: tracking is a pure
//! function of (bunch, fixed parameters), so a node may be invoked
//! repeatedly and for independent bunches without any per-bunch state.

use crate::error::TrackError;
use crate::kernels;
use crate::node::element::ZeroLengthElement;
use crate::primitives::{Bunch, TrackContext};
use crate::types::{ElementShape, RotationMode};

/// Tagged variant over the error-transform catalog.
///
/// Entrance/exit (`I`/`F`) pairs let the same physical rotation or
/// displacement be applied with an orientation-dependent sign and frame
/// convention at each end of a finite-length element; the node only carries
/// the element's nominal geometry as parameters, bound at lattice assembly.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Additive rigid shift of all six phase-space coordinates.
    CoordDisplacement {
        dx: f64,
        dxp: f64,
        dy: f64,
        dyp: f64,
        dz: f64,
        de: f64,
    },
    /// Static quadrupole focusing-error kick.
    QuadKicker { k: f64 },
    /// Oscillating quadrupole kick, modulated along the bunch.
    QuadKickerOsc {
        k: f64,
        phase_length: f64,
        phase: f64,
    },
    /// Oscillating dipole kick, modulated along the bunch.
    DipoleKickerOsc {
        k: f64,
        phase_length: f64,
        phase: f64,
    },
    /// Shift along the longitudinal coordinate.
    LongDisplacement { ds: f64 },
    /// Rotation of the transverse plane about the beam axis.
    StraightRotationXY { angle: f64 },
    /// Entrance tilt coupling the x–s plane of a straight element.
    StraightRotationXSI { angle: f64, elt_length: f64 },
    /// Exit tilt coupling the x–s plane of a straight element.
    StraightRotationXSF { angle: f64, elt_length: f64 },
    /// Entrance tilt coupling the y–s plane of a straight element.
    StraightRotationYSI { angle: f64, elt_length: f64 },
    /// Exit tilt coupling the y–s plane of a straight element.
    StraightRotationYSF { angle: f64, elt_length: f64 },
    /// Bending-field-strength error at the entrance face.
    BendFieldI { drho: f64 },
    /// Bending-field-strength error at the exit face.
    BendFieldF { drho: f64 },
    /// Horizontal misalignment at a bend's entrance face.
    BendDisplacementXI { angle: f64, disp: f64 },
    /// Horizontal misalignment at a bend's exit face.
    BendDisplacementXF { angle: f64, disp: f64 },
    /// Vertical misalignment at a bend's entrance face.
    BendDisplacementYI { disp: f64 },
    /// Vertical misalignment at a bend's exit face.
    BendDisplacementYF { disp: f64 },
    /// Longitudinal misalignment at a bend's entrance face.
    BendDisplacementLI { angle: f64, disp: f64 },
    /// Longitudinal misalignment at a bend's exit face.
    BendDisplacementLF { angle: f64, disp: f64 },
    /// General entrance rotation error with selectable treatment.
    RotationI {
        angle: f64,
        rho: f64,
        theta: f64,
        elt_length: f64,
        shape: ElementShape,
        mode: RotationMode,
    },
    /// General exit rotation error with selectable treatment.
    RotationF {
        angle: f64,
        rho: f64,
        theta: f64,
        elt_length: f64,
        shape: ElementShape,
        mode: RotationMode,
    },
}

impl ErrorKind {
    /// Default human-readable node name for this kind.
    pub fn default_name(&self) -> &'static str {
        match self {
            ErrorKind::CoordDisplacement { .. } => "Coordinate Displacement",
            ErrorKind::QuadKicker { .. } => "Quad Kicker",
            ErrorKind::QuadKickerOsc { .. } => "Quad Kicker Osc",
            ErrorKind::DipoleKickerOsc { .. } => "Dipole Kicker Osc",
            ErrorKind::LongDisplacement { .. } => "Longitudinal Displacement",
            ErrorKind::StraightRotationXY { .. } => "XY Rotation",
            ErrorKind::StraightRotationXSI { .. } => "XSI Rotation",
            ErrorKind::StraightRotationXSF { .. } => "XSF Rotation",
            ErrorKind::StraightRotationYSI { .. } => "YSI Rotation",
            ErrorKind::StraightRotationYSF { .. } => "YSF Rotation",
            ErrorKind::BendFieldI { .. } => "BendI Field",
            ErrorKind::BendFieldF { .. } => "BendF Field",
            ErrorKind::BendDisplacementXI { .. } => "BendXI Displacement",
            ErrorKind::BendDisplacementXF { .. } => "BendXF Displacement",
            ErrorKind::BendDisplacementYI { .. } => "BendYI Displacement",
            ErrorKind::BendDisplacementYF { .. } => "BendYF Displacement",
            ErrorKind::BendDisplacementLI { .. } => "BendLI Displacement",
            ErrorKind::BendDisplacementLF { .. } => "BendLF Displacement",
            ErrorKind::RotationI { .. } => "RotationI General",
            ErrorKind::RotationF { .. } => "RotationF General",
        }
    }

    /// Element type label for this kind.
    pub fn type_label(&self) -> &'static str {
        match self {
            ErrorKind::CoordDisplacement { .. } => "coordinate displacement node",
            ErrorKind::QuadKicker { .. } => "quadrupole kicker node",
            ErrorKind::QuadKickerOsc { .. } => "oscillating quadrupole kicker node",
            ErrorKind::DipoleKickerOsc { .. } => "oscillating dipole kicker node",
            ErrorKind::LongDisplacement { .. } => "longitudinal displacement node",
            ErrorKind::StraightRotationXY { .. } => "xy rotation node",
            ErrorKind::StraightRotationXSI { .. } => "xsi rotation node",
            ErrorKind::StraightRotationXSF { .. } => "xsf rotation node",
            ErrorKind::StraightRotationYSI { .. } => "ysi rotation node",
            ErrorKind::StraightRotationYSF { .. } => "ysf rotation node",
            ErrorKind::BendFieldI { .. } => "bendi field node",
            ErrorKind::BendFieldF { .. } => "bendf field node",
            ErrorKind::BendDisplacementXI { .. } => "xi bend displacement node",
            ErrorKind::BendDisplacementXF { .. } => "xf bend displacement node",
            ErrorKind::BendDisplacementYI { .. } => "yi bend displacement node",
            ErrorKind::BendDisplacementYF { .. } => "yf bend displacement node",
            ErrorKind::BendDisplacementLI { .. } => "li bend displacement node",
            ErrorKind::BendDisplacementLF { .. } => "lf bend displacement node",
            ErrorKind::RotationI { .. } => "generali rotation node",
            ErrorKind::RotationF { .. } => "generalf rotation node",
        }
    }

    /// Dispatches to the kernel bound to this kind, forwarding the fixed
    /// parameters unchanged. This match is the kernel lookup table: every
    /// catalog entry maps to exactly one kernel call.
    pub fn apply(&self, bunch: &mut Bunch) -> Result<(), TrackError> {
        match *self {
            ErrorKind::CoordDisplacement {
                dx,
                dxp,
                dy,
                dyp,
                dz,
                de,
            } => {
                kernels::coord_displacement(bunch, dx, dxp, dy, dyp, dz, de);
                Ok(())
            }
            ErrorKind::QuadKicker { k } => {
                kernels::quad_kicker(bunch, k);
                Ok(())
            }
            ErrorKind::QuadKickerOsc {
                k,
                phase_length,
                phase,
            } => kernels::quad_kicker_osc(bunch, k, phase_length, phase),
            ErrorKind::DipoleKickerOsc {
                k,
                phase_length,
                phase,
            } => kernels::dipole_kicker_osc(bunch, k, phase_length, phase),
            ErrorKind::LongDisplacement { ds } => {
                kernels::long_displacement(bunch, ds);
                Ok(())
            }
            ErrorKind::StraightRotationXY { angle } => {
                kernels::straight_rotation_xy(bunch, angle);
                Ok(())
            }
            ErrorKind::StraightRotationXSI { angle, elt_length } => {
                kernels::straight_rotation_xsi(bunch, angle, elt_length);
                Ok(())
            }
            ErrorKind::StraightRotationXSF { angle, elt_length } => {
                kernels::straight_rotation_xsf(bunch, angle, elt_length);
                Ok(())
            }
            ErrorKind::StraightRotationYSI { angle, elt_length } => {
                kernels::straight_rotation_ysi(bunch, angle, elt_length);
                Ok(())
            }
            ErrorKind::StraightRotationYSF { angle, elt_length } => {
                kernels::straight_rotation_ysf(bunch, angle, elt_length);
                Ok(())
            }
            ErrorKind::BendFieldI { drho } => {
                kernels::bend_field_i(bunch, drho);
                Ok(())
            }
            ErrorKind::BendFieldF { drho } => {
                kernels::bend_field_f(bunch, drho);
                Ok(())
            }
            ErrorKind::BendDisplacementXI { angle, disp } => {
                kernels::bend_displacement_xi(bunch, angle, disp);
                Ok(())
            }
            ErrorKind::BendDisplacementXF { angle, disp } => {
                kernels::bend_displacement_xf(bunch, angle, disp);
                Ok(())
            }
            ErrorKind::BendDisplacementYI { disp } => {
                kernels::bend_displacement_yi(bunch, disp);
                Ok(())
            }
            ErrorKind::BendDisplacementYF { disp } => {
                kernels::bend_displacement_yf(bunch, disp);
                Ok(())
            }
            ErrorKind::BendDisplacementLI { angle, disp } => {
                kernels::bend_displacement_li(bunch, angle, disp);
                Ok(())
            }
            ErrorKind::BendDisplacementLF { angle, disp } => {
                kernels::bend_displacement_lf(bunch, angle, disp);
                Ok(())
            }
            ErrorKind::RotationI {
                angle,
                rho,
                theta,
                elt_length,
                shape,
                mode,
            } => {
                kernels::rotation_i(bunch, angle, rho, theta, elt_length, shape, mode);
                Ok(())
            }
            ErrorKind::RotationF {
                angle,
                rho,
                theta,
                elt_length,
                shape,
                mode,
            } => {
                kernels::rotation_f(bunch, angle, rho, theta, elt_length, shape, mode);
                Ok(())
            }
        }
    }
}

/// A zero-length error element: one catalog entry plus the shared element
/// bookkeeping that keeps it invisible to path-length accounting.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ErrorNode {
    element: ZeroLengthElement,
    kind: ErrorKind,
}

impl ErrorNode {
    /// Creates a node with the kind's default name.
    pub fn new(kind: ErrorKind) -> Self {
        ErrorNode {
            element: ZeroLengthElement::new(kind.default_name(), kind.type_label()),
            kind,
        }
    }

    /// Creates a node with an overriding name.
    pub fn with_name(kind: ErrorKind, name: impl Into<String>) -> Self {
        let mut node = ErrorNode::new(kind);
        node.element.set_name(name);
        node
    }

    // Per-kind constructors mirroring the catalog, for lattice-assembly
    // call sites that know the parameters but should not care about the
    // enum's field names.

    pub fn coord_displacement(dx: f64, dxp: f64, dy: f64, dyp: f64, dz: f64, de: f64) -> Self {
        ErrorNode::new(ErrorKind::CoordDisplacement {
            dx,
            dxp,
            dy,
            dyp,
            dz,
            de,
        })
    }

    pub fn quad_kicker(k: f64) -> Self {
        ErrorNode::new(ErrorKind::QuadKicker { k })
    }

    pub fn quad_kicker_osc(k: f64, phase_length: f64, phase: f64) -> Self {
        ErrorNode::new(ErrorKind::QuadKickerOsc {
            k,
            phase_length,
            phase,
        })
    }

    pub fn dipole_kicker_osc(k: f64, phase_length: f64, phase: f64) -> Self {
        ErrorNode::new(ErrorKind::DipoleKickerOsc {
            k,
            phase_length,
            phase,
        })
    }

    pub fn long_displacement(ds: f64) -> Self {
        ErrorNode::new(ErrorKind::LongDisplacement { ds })
    }

    pub fn straight_rotation_xy(angle: f64) -> Self {
        ErrorNode::new(ErrorKind::StraightRotationXY { angle })
    }

    pub fn straight_rotation_xsi(angle: f64, elt_length: f64) -> Self {
        ErrorNode::new(ErrorKind::StraightRotationXSI { angle, elt_length })
    }

    pub fn straight_rotation_xsf(angle: f64, elt_length: f64) -> Self {
        ErrorNode::new(ErrorKind::StraightRotationXSF { angle, elt_length })
    }

    pub fn straight_rotation_ysi(angle: f64, elt_length: f64) -> Self {
        ErrorNode::new(ErrorKind::StraightRotationYSI { angle, elt_length })
    }

    pub fn straight_rotation_ysf(angle: f64, elt_length: f64) -> Self {
        ErrorNode::new(ErrorKind::StraightRotationYSF { angle, elt_length })
    }

    pub fn bend_field_i(drho: f64) -> Self {
        ErrorNode::new(ErrorKind::BendFieldI { drho })
    }

    pub fn bend_field_f(drho: f64) -> Self {
        ErrorNode::new(ErrorKind::BendFieldF { drho })
    }

    pub fn bend_displacement_xi(angle: f64, disp: f64) -> Self {
        ErrorNode::new(ErrorKind::BendDisplacementXI { angle, disp })
    }

    pub fn bend_displacement_xf(angle: f64, disp: f64) -> Self {
        ErrorNode::new(ErrorKind::BendDisplacementXF { angle, disp })
    }

    pub fn bend_displacement_yi(disp: f64) -> Self {
        ErrorNode::new(ErrorKind::BendDisplacementYI { disp })
    }

    pub fn bend_displacement_yf(disp: f64) -> Self {
        ErrorNode::new(ErrorKind::BendDisplacementYF { disp })
    }

    pub fn bend_displacement_li(angle: f64, disp: f64) -> Self {
        ErrorNode::new(ErrorKind::BendDisplacementLI { angle, disp })
    }

    pub fn bend_displacement_lf(angle: f64, disp: f64) -> Self {
        ErrorNode::new(ErrorKind::BendDisplacementLF { angle, disp })
    }

    pub fn rotation_i(
        angle: f64,
        rho: f64,
        theta: f64,
        elt_length: f64,
        shape: ElementShape,
        mode: RotationMode,
    ) -> Self {
        ErrorNode::new(ErrorKind::RotationI {
            angle,
            rho,
            theta,
            elt_length,
            shape,
            mode,
        })
    }

    pub fn rotation_f(
        angle: f64,
        rho: f64,
        theta: f64,
        elt_length: f64,
        shape: ElementShape,
        mode: RotationMode,
    ) -> Self {
        ErrorNode::new(ErrorKind::RotationF {
            angle,
            rho,
            theta,
            elt_length,
            shape,
            mode,
        })
    }

    pub fn name(&self) -> &str {
        self.element.name()
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn element(&self) -> &ZeroLengthElement {
        &self.element
    }

    /// Path length of the requested part, for harness bookkeeping. Always
    /// 0.0, whatever the active-part index.
    pub fn part_length(&self, part: usize) -> f64 {
        self.element.part_length(part)
    }

    /// Direct tracking entry point: applies this node's transform to the
    /// bunch. The active-part length is read first, as the harness would;
    /// for these nodes it is zero by construction.
    pub fn track_bunch(&self, bunch: &mut Bunch) -> Result<(), TrackError> {
        let length = self.element.part_length(0);
        debug_assert_eq!(length, 0.0);
        self.kind.apply(bunch)
    }

    /// Harness-facing tracking entry point: extracts the bunch from the
    /// per-step context, then behaves exactly like [`Self::track_bunch`].
    pub fn track(&self, ctx: &mut TrackContext<'_>) -> Result<(), TrackError> {
        tracing::trace!(
            node = self.element.name(),
            label = self.element.type_label(),
            particles = ctx.bunch.len(),
            "tracking bunch through error node"
        );
        self.track_bunch(ctx.bunch)
    }
}
