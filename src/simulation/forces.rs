//! Acceleration contributors for the simulation
//!
//! Defines the `Acceleration` trait, the `AccelSet` that sums terms, and
//! direct pairwise Newtonian gravity with a near-field cutoff

use crate::simulation::states::{Body, NVec3};

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all `bodies`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, bodies: &[Body], out: &mut [NVec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, bodies, out);
        }
    }
}

/// Acceleration source; implementations add their contribution into `out[i]`
pub trait Acceleration {
    fn acceleration(&self, t: f64, bodies: &[Body], out: &mut [NVec3]);
}

/// Direct O(n^2) Newtonian gravity
///
/// Every ordered pair (a, b) is evaluated independently, so each body sums
/// its own force from every other body. Pairs whose squared separation is
/// below `min_distance_sq` contribute nothing, and coincident bodies never
/// do; there is no softening.
#[allow(non_snake_case)]
pub struct PairwiseGravity {
    pub G: f64,
    pub min_distance_sq: f64,
}

impl PairwiseGravity {
    /// Net force on body `a` from every other body
    pub fn total_force(&self, a: usize, bodies: &[Body]) -> NVec3 {
        let ba = &bodies[a];
        let mut total = NVec3::zeros();

        for (b, bb) in bodies.iter().enumerate() {
            if b == a {
                continue;
            }

            let diff = bb.x - ba.x;
            let dist_sq = diff.norm_squared();

            // Too close (or coincident): skip the pair instead of blowing up
            if dist_sq < self.min_distance_sq || dist_sq == 0.0 {
                continue;
            }

            let magnitude = self.G * ba.mass() * bb.mass() / dist_sq;
            let direction = diff / dist_sq.sqrt();
            total += direction * magnitude;
        }

        total
    }
}

impl Acceleration for PairwiseGravity {
    fn acceleration(&self, _t: f64, bodies: &[Body], out: &mut [NVec3]) {
        for a in 0..bodies.len() {
            // a = F / m
            out[a] += self.total_force(a, bodies) / bodies[a].mass();
        }
    }
}
