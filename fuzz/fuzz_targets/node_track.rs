#![no_main]

use libfuzzer_sys::fuzz_target;

use beamline_errors::node::ErrorNode;
use beamline_errors::primitives::{Bunch, Particle, TrackContext};
use beamline_errors::types::{ElementShape, RotationMode};

// Raw inputs for one node-tracking invocation. Parameters are arbitrary
// floats (NaN and infinities included): tracking must never panic, never
// change the particle count, and never report a nonzero length.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzTrackInput {
    selector: u8,
    params: [f64; 6],
    particles: Vec<(f64, f64, f64, f64, f64, f64)>,
    part_index: usize,
}

fn build_node(selector: u8, p: &[f64; 6]) -> ErrorNode {
    match selector % 20 {
        0 => ErrorNode::coord_displacement(p[0], p[1], p[2], p[3], p[4], p[5]),
        1 => ErrorNode::quad_kicker(p[0]),
        2 => ErrorNode::quad_kicker_osc(p[0], p[1], p[2]),
        3 => ErrorNode::dipole_kicker_osc(p[0], p[1], p[2]),
        4 => ErrorNode::long_displacement(p[0]),
        5 => ErrorNode::straight_rotation_xy(p[0]),
        6 => ErrorNode::straight_rotation_xsi(p[0], p[1]),
        7 => ErrorNode::straight_rotation_xsf(p[0], p[1]),
        8 => ErrorNode::straight_rotation_ysi(p[0], p[1]),
        9 => ErrorNode::straight_rotation_ysf(p[0], p[1]),
        10 => ErrorNode::bend_field_i(p[0]),
        11 => ErrorNode::bend_field_f(p[0]),
        12 => ErrorNode::bend_displacement_xi(p[0], p[1]),
        13 => ErrorNode::bend_displacement_xf(p[0], p[1]),
        14 => ErrorNode::bend_displacement_yi(p[0]),
        15 => ErrorNode::bend_displacement_yf(p[0]),
        16 => ErrorNode::bend_displacement_li(p[0], p[1]),
        17 => ErrorNode::bend_displacement_lf(p[0], p[1]),
        18 => ErrorNode::rotation_i(
            p[0],
            p[1],
            p[2],
            p[3],
            ElementShape::Straight,
            RotationMode::FiniteLength,
        ),
        _ => ErrorNode::rotation_f(
            p[0],
            p[1],
            p[2],
            p[3],
            ElementShape::Bent,
            RotationMode::ThinLens,
        ),
    }
}

fuzz_target!(|input: FuzzTrackInput| {
    let node = build_node(input.selector, &input.params);

    let mut bunch = Bunch::with_particles(
        input
            .particles
            .iter()
            .map(|&(x, xp, y, yp, z, de)| Particle::new(x, xp, y, yp, z, de))
            .collect(),
    );
    let count = bunch.len();

    // Zero-length contract holds for any part index.
    assert_eq!(node.part_length(input.part_index), 0.0);

    let mut ctx = TrackContext::new(&mut bunch);
    let _ = node.track(&mut ctx);

    assert_eq!(bunch.len(), count);
});
