//! Property tests for the transform catalog: count preservation, exact
//! linearity of the rigid displacement, rotation round trips, and the
//! zero-length contract under arbitrary part indices.

use beamline_errors::node::{ErrorKind, ErrorNode};
use beamline_errors::primitives::{Bunch, Particle, TrackContext};
use beamline_errors::types::{ElementShape, RotationMode};

use proptest::prelude::*;

fn arb_particle() -> impl Strategy<Value = Particle> {
    (
        -1e-2..1e-2f64,
        -1e-3..1e-3f64,
        -1e-2..1e-2f64,
        -1e-3..1e-3f64,
        -1.0..1.0f64,
        -1e-3..1e-3f64,
    )
        .prop_map(|(x, xp, y, yp, z, de)| Particle::new(x, xp, y, yp, z, de))
}

fn arb_bunch() -> impl Strategy<Value = Bunch> {
    prop::collection::vec(arb_particle(), 0..128).prop_map(Bunch::with_particles)
}

fn arb_shape() -> impl Strategy<Value = ElementShape> {
    prop_oneof![Just(ElementShape::Straight), Just(ElementShape::Bent)]
}

fn arb_mode() -> impl Strategy<Value = RotationMode> {
    prop_oneof![Just(RotationMode::ThinLens), Just(RotationMode::FiniteLength)]
}

/// Any catalog entry with tracking-safe parameters.
fn arb_node() -> impl Strategy<Value = ErrorNode> {
    let angle = || -0.1..0.1f64;
    let small = || -1e-2..1e-2f64;
    let length = || 0.0..5.0f64;
    let strategies: Vec<BoxedStrategy<ErrorNode>> = vec![
        (small(), small(), small(), small(), small(), small())
            .prop_map(|(dx, dxp, dy, dyp, dz, de)| {
                ErrorNode::coord_displacement(dx, dxp, dy, dyp, dz, de)
            })
            .boxed(),
        small().prop_map(ErrorNode::quad_kicker).boxed(),
        (small(), 0.1..100.0f64, angle())
            .prop_map(|(k, pl, ph)| ErrorNode::quad_kicker_osc(k, pl, ph))
            .boxed(),
        (small(), 0.1..100.0f64, angle())
            .prop_map(|(k, pl, ph)| ErrorNode::dipole_kicker_osc(k, pl, ph))
            .boxed(),
        small().prop_map(ErrorNode::long_displacement).boxed(),
        angle().prop_map(ErrorNode::straight_rotation_xy).boxed(),
        (angle(), length())
            .prop_map(|(a, l)| ErrorNode::straight_rotation_xsi(a, l))
            .boxed(),
        (angle(), length())
            .prop_map(|(a, l)| ErrorNode::straight_rotation_xsf(a, l))
            .boxed(),
        (angle(), length())
            .prop_map(|(a, l)| ErrorNode::straight_rotation_ysi(a, l))
            .boxed(),
        (angle(), length())
            .prop_map(|(a, l)| ErrorNode::straight_rotation_ysf(a, l))
            .boxed(),
        small().prop_map(ErrorNode::bend_field_i).boxed(),
        small().prop_map(ErrorNode::bend_field_f).boxed(),
        (angle(), small())
            .prop_map(|(a, d)| ErrorNode::bend_displacement_xi(a, d))
            .boxed(),
        (angle(), small())
            .prop_map(|(a, d)| ErrorNode::bend_displacement_xf(a, d))
            .boxed(),
        small().prop_map(ErrorNode::bend_displacement_yi).boxed(),
        small().prop_map(ErrorNode::bend_displacement_yf).boxed(),
        (angle(), small())
            .prop_map(|(a, d)| ErrorNode::bend_displacement_li(a, d))
            .boxed(),
        (angle(), small())
            .prop_map(|(a, d)| ErrorNode::bend_displacement_lf(a, d))
            .boxed(),
        (angle(), 1.0..50.0f64, angle(), length(), arb_shape(), arb_mode())
            .prop_map(|(a, rho, th, l, shape, mode)| {
                ErrorNode::rotation_i(a, rho, th, l, shape, mode)
            })
            .boxed(),
        (angle(), 1.0..50.0f64, angle(), length(), arb_shape(), arb_mode())
            .prop_map(|(a, rho, th, l, shape, mode)| {
                ErrorNode::rotation_f(a, rho, th, l, shape, mode)
            })
            .boxed(),
    ];
    prop::strategy::Union::new(strategies)
}

proptest! {
    /// No transform adds or removes particles.
    #[test]
    fn prop_particle_count_preserved(node in arb_node(), mut bunch in arb_bunch()) {
        let before = bunch.len();
        node.track_bunch(&mut bunch).unwrap();
        prop_assert_eq!(bunch.len(), before);
    }

    /// The declared length is 0.0 for every part index asked for.
    #[test]
    fn prop_zero_length_for_any_part(node in arb_node(), part in 0usize..10_000) {
        prop_assert_eq!(node.part_length(part), 0.0);
        prop_assert_eq!(node.element().length(), 0.0);
    }

    /// An empty bunch stays empty and raises no error.
    #[test]
    fn prop_empty_bunch_is_a_noop(node in arb_node()) {
        let mut bunch = Bunch::new();
        let mut ctx = TrackContext::new(&mut bunch);
        prop_assert!(node.track(&mut ctx).is_ok());
        prop_assert!(bunch.is_empty());
    }

    /// Applying a rigid displacement twice equals one displacement of twice
    /// the amplitude, exactly.
    #[test]
    fn prop_coord_displacement_is_linear(
        mut bunch in arb_bunch(),
        dx in -1e-2..1e-2f64,
        dyp in -1e-3..1e-3f64,
        de in -1e-3..1e-3f64,
    ) {
        let mut doubled = bunch.clone();
        let node = ErrorNode::coord_displacement(dx, 0.0, 0.0, dyp, 0.0, de);
        node.track_bunch(&mut bunch).unwrap();
        node.track_bunch(&mut bunch).unwrap();
        ErrorNode::coord_displacement(2.0 * dx, 0.0, 0.0, 2.0 * dyp, 0.0, 2.0 * de)
            .track_bunch(&mut doubled)
            .unwrap();
        prop_assert_eq!(bunch, doubled);
    }

    /// x–s and y–s tilts undo exactly under sign reversal, for any nominal
    /// element length.
    #[test]
    fn prop_straight_tilts_round_trip(
        bunch0 in arb_bunch(),
        angle in -0.1..0.1f64,
        elt_length in 0.0..10.0f64,
    ) {
        let pairs: [(fn(f64, f64) -> ErrorNode, &str); 4] = [
            (ErrorNode::straight_rotation_xsi, "xsi"),
            (ErrorNode::straight_rotation_xsf, "xsf"),
            (ErrorNode::straight_rotation_ysi, "ysi"),
            (ErrorNode::straight_rotation_ysf, "ysf"),
        ];
        for (make, tag) in pairs {
            let mut bunch = bunch0.clone();
            make(angle, elt_length).track_bunch(&mut bunch).unwrap();
            make(-angle, elt_length).track_bunch(&mut bunch).unwrap();
            for (p, q) in bunch.particles().iter().zip(bunch0.particles()) {
                prop_assert!((p.x - q.x).abs() < 1e-10, "{} x drift", tag);
                prop_assert!((p.xp - q.xp).abs() < 1e-10, "{} xp drift", tag);
                prop_assert!((p.y - q.y).abs() < 1e-10, "{} y drift", tag);
                prop_assert!((p.yp - q.yp).abs() < 1e-10, "{} yp drift", tag);
            }
        }
    }

    /// A transverse-plane rotation by theta then -theta is the identity
    /// within tolerance.
    #[test]
    fn prop_xy_rotation_round_trips(bunch0 in arb_bunch(), angle in -3.0..3.0f64) {
        let mut bunch = bunch0.clone();
        ErrorNode::straight_rotation_xy(angle).track_bunch(&mut bunch).unwrap();
        ErrorNode::straight_rotation_xy(-angle).track_bunch(&mut bunch).unwrap();
        for (p, q) in bunch.particles().iter().zip(bunch0.particles()) {
            prop_assert!((p.x - q.x).abs() < 1e-12);
            prop_assert!((p.y - q.y).abs() < 1e-12);
            prop_assert!((p.xp - q.xp).abs() < 1e-12);
            prop_assert!((p.yp - q.yp).abs() < 1e-12);
        }
    }

    /// Longitudinal coordinates are untouched by purely transverse kicks.
    #[test]
    fn prop_quad_kicker_leaves_longitudinal_plane(mut bunch in arb_bunch(), k in -0.1..0.1f64) {
        let before: Vec<(f64, f64)> = bunch.particles().iter().map(|p| (p.z, p.de)).collect();
        ErrorNode::quad_kicker(k).track_bunch(&mut bunch).unwrap();
        let after: Vec<(f64, f64)> = bunch.particles().iter().map(|p| (p.z, p.de)).collect();
        prop_assert_eq!(before, after);
    }

    /// Serde round trip for any catalog entry.
    #[test]
    fn prop_catalog_serde_round_trip(node in arb_node()) {
        let json = serde_json::to_string(&node).unwrap();
        let back: ErrorNode = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(node, back);
    }
}

#[test]
fn kind_accessor_reflects_construction() {
    let node = ErrorNode::quad_kicker(0.25);
    match node.kind() {
        ErrorKind::QuadKicker { k } => assert_eq!(*k, 0.25),
        other => panic!("unexpected kind {other:?}"),
    }
}
