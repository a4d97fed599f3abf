use crate::core::data::complex::Complex;

/// Terminal points closer than this belong to the same root.
pub const CLUSTER_RADIUS: f64 = 1e-3;

/// Where a pixel's iteration ended up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BasinClass {
    /// Index of the matching entry in the registry.
    Root(usize),
    /// The iteration left the finite plane.
    Diverged,
}

/// Roots discovered during one render, in order of discovery.
///
/// Indices only mean something within the render that built the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootRegistry {
    roots: Vec<Complex>,
}

impl RootRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches `terminal` against the known roots, registering it as a new
    /// root when none is within [`CLUSTER_RADIUS`].
    pub fn classify(&mut self, terminal: Complex) -> BasinClass {
        if !terminal.is_finite() {
            return BasinClass::Diverged;
        }

        if let Some(index) = self
            .roots
            .iter()
            .position(|root| root.distance(terminal) < CLUSTER_RADIUS)
        {
            return BasinClass::Root(index);
        }

        self.roots.push(terminal);
        BasinClass::Root(self.roots.len() - 1)
    }

    #[must_use]
    pub fn roots(&self) -> &[Complex] {
        &self.roots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
