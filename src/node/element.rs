//!
//! Zero-length lattice-element bookkeeping shared by every error node.
//!
//! A lattice element has a name, a type label, a declared length, and an
//! ordered list of parts (sub-slices) with their own lengths; the active
//! part selects which sub-length tracking bookkeeping reads. Error nodes
//! compose this helper instead of inheriting a deep element hierarchy, and
//! pin it to length 0.0 with a single trivial part: the lattice's total path
//! length and slicing logic are untouched by splicing a node in anywhere.

use crate::types::PartIndex;

/// Element bookkeeping pinned to zero length.
///
/// This is a structural invariant, not an optimization: a nonzero declared
/// length would corrupt path-length-dependent physics elsewhere in the
/// lattice.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZeroLengthElement {
    name: String,
    type_label: String,
    length: f64,
    part_lengths: Vec<f64>,
}

impl ZeroLengthElement {
    /// Creates the bookkeeping for a node with the given name and type
    /// label: declared length 0.0, one trivial part.
    pub fn new(name: impl Into<String>, type_label: impl Into<String>) -> Self {
        ZeroLengthElement {
            name: name.into(),
            type_label: type_label.into(),
            length: 0.0,
            part_lengths: vec![0.0],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Human-readable element type, e.g. "quadrupole kicker node".
    pub fn type_label(&self) -> &str {
        &self.type_label
    }

    pub fn set_type_label(&mut self, label: impl Into<String>) {
        self.type_label = label.into();
    }

    /// Declared element length. Always 0.0 for error nodes.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn part_count(&self) -> usize {
        self.part_lengths.len()
    }

    /// Length of the requested part. Error nodes have a single trivial
    /// part, so this returns 0.0 for every index, in range or not — the
    /// harness may ask for any active-part index without special-casing
    /// zero-length nodes.
    pub fn part_length(&self, index: PartIndex) -> f64 {
        self.part_lengths.get(index).copied().unwrap_or(0.0)
    }
}
