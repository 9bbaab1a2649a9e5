//! Conserved-quantity readouts used for logging and tests.
//!
//! None of these feed back into the integration; they only observe it.

use crate::simulation::params::Parameters;
use crate::simulation::states::{System, NVec3};

/// Σ m·v over all bodies
pub fn total_momentum(sys: &System) -> NVec3 {
    sys.bodies
        .iter()
        .fold(NVec3::zeros(), |p, b| p + b.v * b.mass())
}

/// Σ ½ m |v|²
pub fn kinetic_energy(sys: &System) -> f64 {
    sys.bodies
        .iter()
        .map(|b| 0.5 * b.mass() * b.v.norm_squared())
        .sum()
}

/// Σ over unordered pairs of -G m_i m_j / r
///
/// Pairs inside the force cutoff are left out, matching what the
/// integrator actually applies.
pub fn potential_energy(sys: &System, params: &Parameters) -> f64 {
    let bodies = &sys.bodies;
    let mut u = 0.0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let dist_sq = (bodies[j].x - bodies[i].x).norm_squared();
            if dist_sq < params.min_distance_sq || dist_sq == 0.0 {
                continue;
            }
            u -= params.G * bodies[i].mass() * bodies[j].mass() / dist_sq.sqrt();
        }
    }
    u
}
