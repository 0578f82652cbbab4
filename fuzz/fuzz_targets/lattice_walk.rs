#![no_main]

use libfuzzer_sys::fuzz_target;

use beamline_errors::lattice::{Drift, Lattice};
use beamline_errors::node::ErrorNode;
use beamline_errors::primitives::{Bunch, Particle};

// An arbitrary interleaving of drifts and error nodes: the total path
// length must equal the sum of the drift lengths alone, and a walk must
// preserve the particle count whatever the parameters.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzLattice {
    elements: Vec<(bool, f64, f64)>,
    particles: Vec<(f64, f64)>,
}

fuzz_target!(|input: FuzzLattice| {
    let mut lattice = Lattice::new();
    let mut drift_sum = 0.0;
    for (i, &(is_drift, a, b)) in input.elements.iter().take(64).enumerate() {
        if is_drift {
            let len = if a.is_finite() { a.abs().min(1e3) } else { 1.0 };
            drift_sum += len;
            lattice.add_node(Drift::new(format!("d{i}"), len));
        } else {
            lattice.add_node(ErrorNode::coord_displacement(a, b, 0.0, 0.0, 0.0, 0.0));
        }
    }

    assert!((lattice.total_length() - drift_sum).abs() <= 1e-9 * drift_sum.abs().max(1.0));

    let mut bunch = Bunch::with_particles(
        input
            .particles
            .iter()
            .take(128)
            .map(|&(x, xp)| Particle::new(x, xp, 0.0, 0.0, 0.0, 0.0))
            .collect(),
    );
    let count = bunch.len();
    lattice.track_bunch(&mut bunch).unwrap();
    assert_eq!(bunch.len(), count);
});
