#![no_main]

use libfuzzer_sys::fuzz_target;

use beamline_errors::node::ErrorNode;
use beamline_errors::primitives::{Bunch, Particle};

// A tilt by angle then -angle must restore the bunch within tolerance, for
// bounded, finite inputs.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzRoundtrip {
    angle_millis: i16,
    elt_length_millis: u16,
    particles: Vec<(i16, i16, i16, i16)>,
}

fuzz_target!(|input: FuzzRoundtrip| {
    // Map integer fuzz inputs onto bounded, finite floats.
    let angle = f64::from(input.angle_millis) * 1e-5;
    let elt_length = f64::from(input.elt_length_millis) * 1e-3;

    let original = Bunch::with_particles(
        input
            .particles
            .iter()
            .map(|&(x, xp, y, yp)| {
                Particle::new(
                    f64::from(x) * 1e-6,
                    f64::from(xp) * 1e-7,
                    f64::from(y) * 1e-6,
                    f64::from(yp) * 1e-7,
                    0.0,
                    0.0,
                )
            })
            .collect(),
    );

    for make in [
        ErrorNode::straight_rotation_xsi as fn(f64, f64) -> ErrorNode,
        ErrorNode::straight_rotation_xsf,
        ErrorNode::straight_rotation_ysi,
        ErrorNode::straight_rotation_ysf,
    ] {
        let mut bunch = original.clone();
        make(angle, elt_length).track_bunch(&mut bunch).unwrap();
        make(-angle, elt_length).track_bunch(&mut bunch).unwrap();

        for (p, q) in bunch.particles().iter().zip(original.particles()) {
            assert!((p.x - q.x).abs() < 1e-9);
            assert!((p.xp - q.xp).abs() < 1e-9);
            assert!((p.y - q.y).abs() < 1e-9);
            assert!((p.yp - q.yp).abs() < 1e-9);
        }
    }
});
