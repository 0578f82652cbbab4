//!
//! Minimal tracking-harness seam.
//!
//! The full lattice engine (parsing, slicing, actions) lives elsewhere; this
//! module carries just enough of its interface to exercise the error-node
//! insertion contract: an ordered element walk that invokes each node's
//! harness-facing entry point and sums declared lengths for path-length
//! accounting. The walk is strictly sequential and aborts on the first
//! kernel fault.

use crate::error::TrackError;
use crate::kernels;
use crate::primitives::{Bunch, TrackContext};
use crate::types::PartIndex;

/// An element the harness can track a bunch through.
///
/// Implementors must be stateless with respect to the bunch: `track` takes
/// `&self`, so one element instance may serve repeated passes and
/// independent bunches.
pub trait BunchTracker: Send + Sync {
    fn name(&self) -> &str;

    /// Declared element length used for path-length accounting.
    fn length(&self) -> f64;

    /// Length of the requested sub-slice during a tracking pass.
    fn part_length(&self, part: PartIndex) -> f64;

    /// Advances the bunch in the per-step context through this element.
    fn track(&self, ctx: &mut TrackContext<'_>) -> Result<(), TrackError>;
}

impl BunchTracker for crate::node::ErrorNode {
    fn name(&self) -> &str {
        self.element().name()
    }

    fn length(&self) -> f64 {
        self.element().length()
    }

    fn part_length(&self, part: PartIndex) -> f64 {
        crate::node::ErrorNode::part_length(self, part)
    }

    fn track(&self, ctx: &mut TrackContext<'_>) -> Result<(), TrackError> {
        crate::node::ErrorNode::track(self, ctx)
    }
}

/// Free propagation over a finite length: the zero-perturbation base
/// element. Included so path-length invariance is observable against a
/// lattice that actually has length.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Drift {
    name: String,
    length: f64,
}

impl Drift {
    pub fn new(name: impl Into<String>, length: f64) -> Self {
        Drift {
            name: name.into(),
            length,
        }
    }
}

impl BunchTracker for Drift {
    fn name(&self) -> &str {
        &self.name
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn part_length(&self, part: PartIndex) -> f64 {
        // A drift is a single part carrying the whole length.
        if part == 0 {
            self.length
        } else {
            0.0
        }
    }

    fn track(&self, ctx: &mut TrackContext<'_>) -> Result<(), TrackError> {
        kernels::drift(ctx.bunch, self.length);
        Ok(())
    }
}

/// An ordered element sequence.
#[derive(Default)]
pub struct Lattice {
    nodes: Vec<Box<dyn BunchTracker>>,
}

impl Lattice {
    pub fn new() -> Self {
        Lattice::default()
    }

    /// Appends an element to the sequence.
    pub fn add_node(&mut self, node: impl BunchTracker + 'static) {
        tracing::debug!(
            node = node.name(),
            length = node.length(),
            position = self.nodes.len(),
            "adding node to lattice"
        );
        self.nodes.push(Box::new(node));
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total path length of the sequence. Error nodes contribute 0.0
    /// wherever they are spliced in.
    pub fn total_length(&self) -> f64 {
        self.nodes.iter().map(|n| n.length()).sum()
    }

    /// Tracks a bunch through every element in order. The first kernel
    /// fault aborts the walk; accelerator-tracking correctness cannot
    /// tolerate silently skipping a perturbation.
    pub fn track_bunch(&self, bunch: &mut Bunch) -> Result<(), TrackError> {
        for node in &self.nodes {
            let mut ctx = TrackContext::new(bunch);
            node.track(&mut ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ErrorNode;
    use crate::primitives::Particle;

    #[test]
    fn error_nodes_do_not_change_total_length() {
        let mut lattice = Lattice::new();
        lattice.add_node(Drift::new("d1", 1.5));
        lattice.add_node(ErrorNode::quad_kicker(0.01));
        lattice.add_node(Drift::new("d2", 2.5));
        lattice.add_node(ErrorNode::coord_displacement(1e-3, 0.0, 0.0, 0.0, 0.0, 0.0));

        assert_eq!(lattice.node_count(), 4);
        assert!((lattice.total_length() - 4.0).abs() < 1e-15);
    }

    #[test]
    fn walk_is_ordered_and_aborts_on_fault() {
        let mut lattice = Lattice::new();
        lattice.add_node(ErrorNode::coord_displacement(1.0, 0.0, 0.0, 0.0, 0.0, 0.0));
        // Degenerate phase length faults during the walk.
        lattice.add_node(ErrorNode::quad_kicker_osc(0.01, 0.0, 0.0));
        lattice.add_node(ErrorNode::coord_displacement(10.0, 0.0, 0.0, 0.0, 0.0, 0.0));

        let mut bunch = Bunch::with_particles(vec![Particle::default()]);
        let err = lattice.track_bunch(&mut bunch).unwrap_err();
        assert_eq!(err, TrackError::ZeroPhaseLength);
        // The first node ran, the third never did.
        assert_eq!(bunch.particles()[0].x, 1.0);
    }

    #[test]
    fn drift_advances_by_its_length() {
        let drift = Drift::new("d", 2.0);
        let mut bunch = Bunch::with_particles(vec![Particle::new(0.0, 1e-3, 0.0, -1e-3, 0.0, 0.0)]);
        let mut ctx = TrackContext::new(&mut bunch);
        drift.track(&mut ctx).unwrap();
        let p = bunch.particles()[0];
        assert!((p.x - 2e-3).abs() < 1e-15);
        assert!((p.y + 2e-3).abs() < 1e-15);
        assert_eq!(drift.part_length(0), 2.0);
        assert_eq!(drift.part_length(3), 0.0);
    }
}
