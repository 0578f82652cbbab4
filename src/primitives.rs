// --- Phase-space state ------------------------------------------------------

/// A single particle's 6D phase-space state.
///
/// Coordinates follow the accelerator convention: transverse position and
/// angle in the horizontal plane (`x`, `xp`), the same in the vertical plane
/// (`y`, `yp`), longitudinal position within the bunch (`z`), and energy
/// deviation from the synchronous particle (`de`).
#[derive(Debug, Copy, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Particle {
    pub x: f64,
    pub xp: f64,
    pub y: f64,
    pub yp: f64,
    pub z: f64,
    pub de: f64,
}

impl Particle {
    pub fn new(x: f64, xp: f64, y: f64, yp: f64, z: f64, de: f64) -> Self {
        Particle { x, xp, y, yp, z, de }
    }
}

// --- Bunch ------------------------------------------------------------------

/// An ordered collection of particles tracked through a lattice.
///
/// The bunch is owned by the tracking harness; nodes receive a `&mut Bunch`
/// and mutate particle states in place. No error transform may add or remove
/// particles — errors perturb, never create.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bunch(pub Vec<Particle>);

impl Bunch {
    pub fn new() -> Self {
        Bunch(Vec::new())
    }

    pub fn with_particles(particles: Vec<Particle>) -> Self {
        Bunch(particles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, p: Particle) {
        self.0.push(p);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.0
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.0
    }

    /// Mutate every particle in place. The transform kernels are all built
    /// on this; an empty bunch is trivially a no-op.
    #[inline]
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut Particle)) {
        for p in &mut self.0 {
            f(p);
        }
    }

    /// Root-mean-square of the horizontal angle over the bunch. Used by
    /// diagnostics and tests to observe whether a kick had a transverse
    /// effect. Returns 0.0 for an empty bunch.
    pub fn rms_xp(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.0.iter().map(|p| p.xp * p.xp).sum();
        (sum_sq / self.0.len() as f64).sqrt()
    }
}

// --- Tracking context -------------------------------------------------------

/// Per-step context handed to each node by the tracking harness.
///
/// The only datum the error-node layer ever reads from the harness's
/// per-step state is the bunch currently being tracked, so the context is a
/// typed structure exposing exactly that handle. A missing bunch is thereby
/// a compile-time impossibility rather than a runtime contract violation.
#[derive(Debug)]
pub struct TrackContext<'a> {
    /// The bunch currently being tracked through the lattice.
    pub bunch: &'a mut Bunch,
}

impl<'a> TrackContext<'a> {
    pub fn new(bunch: &'a mut Bunch) -> Self {
        TrackContext { bunch }
    }
}
