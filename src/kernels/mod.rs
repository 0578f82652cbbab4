//!
//! Pure phase-space transform kernels.
//!
//! Each kernel mutates a bunch's per-particle 6D state in place given the
//! transform's fixed parameters, and is a no-op on an empty bunch. Kernels
//! hold no state between calls; everything a kernel needs arrives through
//! its argument list. The node catalog in `crate::node` binds one kernel per
//! catalog entry and forwards parameters unchanged.
//!
//! Sign and frame conventions:
//! - entrance (`*_i`) kernels transform the bunch into the errant element's
//!   frame, exit (`*_f`) kernels transform back toward the lab frame;
//! - straight-element tilts use the element midpoint as pivot, so applying a
//!   tilt with angle `theta` and then `-theta` is an exact round trip;
//! - bend-face displacements project a lab-frame offset onto beam
//!   coordinates at the face, using the face's entry/exit angle.

pub mod sample;

use crate::error::TrackError;
use crate::primitives::Bunch;
use crate::types::{ElementShape, RotationMode};

use std::f64::consts::PI;

/// Additive rigid shift of all six phase-space coordinates.
pub fn coord_displacement(
    bunch: &mut Bunch,
    dx: f64,
    dxp: f64,
    dy: f64,
    dyp: f64,
    dz: f64,
    de: f64,
) {
    bunch.for_each_mut(|p| {
        p.x += dx;
        p.xp += dxp;
        p.y += dy;
        p.yp += dyp;
        p.z += dz;
        p.de += de;
    });
}

/// Static quadrupole focusing-error kick: `xp += k*x`, `yp -= k*y`.
/// `k = 0` is the identity.
pub fn quad_kicker(bunch: &mut Bunch, k: f64) {
    bunch.for_each_mut(|p| {
        p.xp += k * p.x;
        p.yp -= k * p.y;
    });
}

/// Oscillation factor shared by the oscillating kickers.
///
/// The kick strength is modulated by `sin(2*pi*z / phase_length + phase)`,
/// so particles at different longitudinal positions see different kicks.
#[inline]
fn osc_factor(z: f64, phase_length: f64, phase: f64) -> f64 {
    (2.0 * PI * z / phase_length + phase).sin()
}

/// Oscillating quadrupole kick. The quad kick is scaled per particle by the
/// longitudinal oscillation factor.
pub fn quad_kicker_osc(
    bunch: &mut Bunch,
    k: f64,
    phase_length: f64,
    phase: f64,
) -> Result<(), TrackError> {
    if phase_length == 0.0 {
        return Err(TrackError::ZeroPhaseLength);
    }
    bunch.for_each_mut(|p| {
        let factor = osc_factor(p.z, phase_length, phase);
        p.xp += k * factor * p.x;
        p.yp -= k * factor * p.y;
    });
    Ok(())
}

/// Oscillating dipole kick: a uniform horizontal kick scaled per particle by
/// the longitudinal oscillation factor.
pub fn dipole_kicker_osc(
    bunch: &mut Bunch,
    k: f64,
    phase_length: f64,
    phase: f64,
) -> Result<(), TrackError> {
    if phase_length == 0.0 {
        return Err(TrackError::ZeroPhaseLength);
    }
    bunch.for_each_mut(|p| {
        p.xp += k * osc_factor(p.z, phase_length, phase);
    });
    Ok(())
}

/// Paraxial drift through length `ds`. This is the free-propagation map of
/// the zero-perturbation base element; the longitudinal-displacement error
/// reuses it with the displacement as the drift length.
pub fn drift(bunch: &mut Bunch, ds: f64) {
    bunch.for_each_mut(|p| {
        p.x += ds * p.xp;
        p.y += ds * p.yp;
    });
}

/// Shift along the longitudinal coordinate: the bunch sees the downstream
/// lattice `ds` early or late, which at this order is a drift through `ds`.
pub fn long_displacement(bunch: &mut Bunch, ds: f64) {
    drift(bunch, ds);
}

/// Rotation of the transverse plane about the beam axis: rotates the
/// position pair `(x, y)` and the angle pair `(xp, yp)` by `angle`.
pub fn straight_rotation_xy(bunch: &mut Bunch, angle: f64) {
    let cs = angle.cos();
    let sn = angle.sin();
    bunch.for_each_mut(|p| {
        let (x, y) = (p.x, p.y);
        p.x = cs * x + sn * y;
        p.y = -sn * x + cs * y;
        let (xp, yp) = (p.xp, p.yp);
        p.xp = cs * xp + sn * yp;
        p.yp = -sn * xp + cs * yp;
    });
}

// A tilt of a straight element in a transverse-longitudinal plane, seen from
// one face. The pivot is the element midpoint, a lever arm of half the
// nominal element length: the face offset is `(l/2)*sin(angle)` and the
// trajectory angle changes by `tan(angle)`. Entrance and exit faces apply
// the angular term with opposite signs, so an entrance/exit pair with equal
// parameters nets out to a pure transverse offset `l*sin(angle)`, and every
// term is odd in `angle`, making `angle` then `-angle` an exact round trip.
#[inline]
fn straight_tilt(pos: &mut f64, ang: &mut f64, angle: f64, elt_length: f64, ang_sign: f64) {
    *pos += 0.5 * elt_length * angle.sin();
    *ang += ang_sign * angle.tan();
}

/// Entrance tilt in the x–s plane of a straight element of nominal length
/// `elt_length`.
pub fn straight_rotation_xsi(bunch: &mut Bunch, angle: f64, elt_length: f64) {
    bunch.for_each_mut(|p| straight_tilt(&mut p.x, &mut p.xp, angle, elt_length, 1.0));
}

/// Exit tilt in the x–s plane.
pub fn straight_rotation_xsf(bunch: &mut Bunch, angle: f64, elt_length: f64) {
    bunch.for_each_mut(|p| straight_tilt(&mut p.x, &mut p.xp, angle, elt_length, -1.0));
}

/// Entrance tilt in the y–s plane.
pub fn straight_rotation_ysi(bunch: &mut Bunch, angle: f64, elt_length: f64) {
    bunch.for_each_mut(|p| straight_tilt(&mut p.y, &mut p.yp, angle, elt_length, 1.0));
}

/// Exit tilt in the y–s plane.
pub fn straight_rotation_ysf(bunch: &mut Bunch, angle: f64, elt_length: f64) {
    bunch.for_each_mut(|p| straight_tilt(&mut p.y, &mut p.yp, angle, elt_length, -1.0));
}

/// Bending-field-strength error at the entrance face: the errant curvature
/// `drho` deflects the reference trajectory into the element.
pub fn bend_field_i(bunch: &mut Bunch, drho: f64) {
    bunch.for_each_mut(|p| p.xp -= drho);
}

/// Bending-field-strength error at the exit face: the deflection acquired at
/// the entrance is taken back out when leaving the errant field region.
pub fn bend_field_f(bunch: &mut Bunch, drho: f64) {
    bunch.for_each_mut(|p| p.xp += drho);
}

/// Horizontal bend misalignment seen at the entrance face, whose reference
/// trajectory makes `angle` with the lab axis: the lab-frame offset `disp`
/// projects onto the beam coordinates.
pub fn bend_displacement_xi(bunch: &mut Bunch, angle: f64, disp: f64) {
    let (sn, cs) = angle.sin_cos();
    bunch.for_each_mut(|p| {
        p.x -= disp * cs;
        p.z -= disp * sn;
    });
}

/// Horizontal bend misalignment taken back out at the exit face.
pub fn bend_displacement_xf(bunch: &mut Bunch, angle: f64, disp: f64) {
    let (sn, cs) = angle.sin_cos();
    bunch.for_each_mut(|p| {
        p.x += disp * cs;
        p.z += disp * sn;
    });
}

/// Vertical bend misalignment at the entrance face. The vertical offset is
/// unaffected by the bend angle, so no projection is needed.
pub fn bend_displacement_yi(bunch: &mut Bunch, disp: f64) {
    bunch.for_each_mut(|p| p.y -= disp);
}

/// Vertical bend misalignment taken back out at the exit face.
pub fn bend_displacement_yf(bunch: &mut Bunch, disp: f64) {
    bunch.for_each_mut(|p| p.y += disp);
}

/// Longitudinal bend misalignment at the entrance face: a shift of the bend
/// along the reference trajectory projects onto both the horizontal and the
/// longitudinal beam coordinates at the face.
pub fn bend_displacement_li(bunch: &mut Bunch, angle: f64, disp: f64) {
    let (sn, cs) = angle.sin_cos();
    bunch.for_each_mut(|p| {
        p.x += disp * sn;
        p.z -= disp * cs;
    });
}

/// Longitudinal bend misalignment taken back out at the exit face.
pub fn bend_displacement_lf(bunch: &mut Bunch, angle: f64, disp: f64) {
    let (sn, cs) = angle.sin_cos();
    bunch.for_each_mut(|p| {
        p.x -= disp * sn;
        p.z += disp * cs;
    });
}

// Lever arm of the general rotation's finite-length treatment: half the
// element length for a straight element, the half-chord for a bent one.
#[inline]
fn rotation_arm(rho: f64, theta: f64, elt_length: f64, shape: ElementShape) -> f64 {
    match shape {
        ElementShape::Straight => 0.5 * elt_length,
        ElementShape::Bent => rho * (0.5 * theta).sin(),
    }
}

/// General rotation error at the entrance face of an element.
///
/// `mode` selects the treatment: thin-lens rotates the transverse
/// phase-space coordinates in place; finite-length additionally displaces
/// the bunch by the lever arm of the bracketed element (`rho` and `theta`
/// describe the bend geometry when `shape` is `Bent`, `elt_length` the
/// straight geometry otherwise).
pub fn rotation_i(
    bunch: &mut Bunch,
    angle: f64,
    rho: f64,
    theta: f64,
    elt_length: f64,
    shape: ElementShape,
    mode: RotationMode,
) {
    straight_rotation_xy(bunch, angle);
    if mode == RotationMode::FiniteLength {
        let arm = rotation_arm(rho, theta, elt_length, shape);
        bunch.for_each_mut(|p| {
            p.x += arm * angle.sin();
            p.xp += angle.tan();
        });
    }
}

/// General rotation error at the exit face, undoing the entrance-frame
/// rotation and applying the exit-face geometric terms.
pub fn rotation_f(
    bunch: &mut Bunch,
    angle: f64,
    rho: f64,
    theta: f64,
    elt_length: f64,
    shape: ElementShape,
    mode: RotationMode,
) {
    straight_rotation_xy(bunch, -angle);
    if mode == RotationMode::FiniteLength {
        let arm = rotation_arm(rho, theta, elt_length, shape);
        bunch.for_each_mut(|p| {
            p.x += arm * angle.sin();
            p.xp -= angle.tan();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Particle;

    fn one_particle(x: f64, xp: f64, y: f64, yp: f64, z: f64, de: f64) -> Bunch {
        Bunch::with_particles(vec![Particle::new(x, xp, y, yp, z, de)])
    }

    #[test]
    fn coord_displacement_is_additive() {
        let mut b = one_particle(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        coord_displacement(&mut b, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6);
        let p = b.particles()[0];
        assert_eq!(p, Particle::new(1.1, 2.2, 3.3, 4.4, 5.5, 6.6));
    }

    #[test]
    fn quad_kicker_focuses_and_defocuses() {
        let mut b = one_particle(1.0e-3, 0.0, 2.0e-3, 0.0, 0.0, 0.0);
        quad_kicker(&mut b, 0.5);
        let p = b.particles()[0];
        assert!((p.xp - 0.5e-3).abs() < 1e-15);
        assert!((p.yp + 1.0e-3).abs() < 1e-15);
    }

    #[test]
    fn oscillating_kickers_reject_zero_phase_length() {
        let mut b = one_particle(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            quad_kicker_osc(&mut b, 0.1, 0.0, 0.0),
            Err(TrackError::ZeroPhaseLength)
        );
        assert_eq!(
            dipole_kicker_osc(&mut b, 0.1, 0.0, 0.0),
            Err(TrackError::ZeroPhaseLength)
        );
    }

    #[test]
    fn dipole_kicker_osc_kick_depends_on_z() {
        // At z = phase_length/4 with zero phase the factor is sin(pi/2) = 1.
        let mut b = one_particle(0.0, 0.0, 0.0, 0.0, 2.5, 0.0);
        dipole_kicker_osc(&mut b, 0.02, 10.0, 0.0).unwrap();
        assert!((b.particles()[0].xp - 0.02).abs() < 1e-12);
    }

    #[test]
    fn xy_rotation_by_quarter_turn_swaps_planes() {
        let mut b = one_particle(1.0, 0.5, 0.0, 0.0, 0.0, 0.0);
        straight_rotation_xy(&mut b, std::f64::consts::FRAC_PI_2);
        let p = b.particles()[0];
        assert!(p.x.abs() < 1e-12 && (p.y + 1.0).abs() < 1e-12);
        assert!(p.xp.abs() < 1e-12 && (p.yp + 0.5).abs() < 1e-12);
    }

    #[test]
    fn xs_tilt_entrance_exit_pair_nets_pure_offset() {
        let (angle, l) = (3.0e-3, 2.0);
        let mut b = one_particle(1.0e-3, 2.0e-4, 0.0, 0.0, 0.0, 0.0);
        let before = b.particles()[0];
        straight_rotation_xsi(&mut b, angle, l);
        straight_rotation_xsf(&mut b, angle, l);
        let after = b.particles()[0];
        assert!((after.x - before.x - l * angle.sin()).abs() < 1e-15);
        assert!((after.xp - before.xp).abs() < 1e-15);
    }

    #[test]
    fn bend_field_faces_cancel_back_to_back() {
        let mut b = one_particle(0.0, 1.0e-3, 0.0, 0.0, 0.0, 0.0);
        bend_field_i(&mut b, 2.0e-4);
        bend_field_f(&mut b, 2.0e-4);
        assert!((b.particles()[0].xp - 1.0e-3).abs() < 1e-15);
    }

    #[test]
    fn rotation_thin_lens_matches_xy_rotation() {
        let angle = 0.1;
        let mut a = one_particle(1.0e-3, 2.0e-4, -3.0e-4, 1.0e-5, 0.1, 0.0);
        let mut b = a.clone();
        rotation_i(
            &mut a,
            angle,
            10.0,
            0.2,
            1.5,
            ElementShape::Bent,
            RotationMode::ThinLens,
        );
        straight_rotation_xy(&mut b, angle);
        assert_eq!(a, b);
    }

    #[test]
    fn rotation_arm_uses_half_chord_for_bends() {
        let arm = rotation_arm(10.0, 0.3, 0.0, ElementShape::Bent);
        assert!((arm - 10.0 * 0.15f64.sin()).abs() < 1e-15);
        assert_eq!(rotation_arm(0.0, 0.0, 3.0, ElementShape::Straight), 1.5);
    }
}
