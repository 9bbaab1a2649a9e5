//! Fixed-step time integrator for the body system
//!
//! Semi-implicit Euler driven by `AccelSet` and `Parameters`: every
//! velocity is kicked from the same position snapshot, then every position
//! drifts with its new velocity, then each body's trail records the result.

use super::states::{System, NVec3};
use super::forces::AccelSet;
use super::params::Parameters;

/// Advance the system by one step of `params.dt`
/// Updates velocities, positions, trails, `sys.t` and `sys.steps` in place
pub fn semi_implicit_euler(sys: &mut System, forces: &AccelSet, params: &Parameters) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let dt = params.dt;

    // a_n from x_n, all bodies read the same snapshot
    let mut acc = vec![NVec3::zeros(); n];
    forces.accumulate_accels(sys.t, &sys.bodies, &mut acc);

    // Kick: v_n+1 = v_n + dt * a_n
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += *a * dt;
    }

    // Drift with the new velocity: x_n+1 = x_n + dt * v_n+1
    for b in sys.bodies.iter_mut() {
        b.x += b.v * dt;
        b.record_position();
    }

    sys.t += dt;
    sys.steps += 1;

    log::trace!("step {} (t = {:.3}) advanced {} bodies", sys.steps, sys.t, n);
}
