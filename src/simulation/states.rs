//! Core state types for the simulation.
//!
//! - `BodySpec` is the initial condition handed in by the UI layer
//! - `Body` is the live state (position, velocity, mass, trail)
//! - `System` holds the ordered bodies plus the simulation clock

use nalgebra::Vector3;

use crate::error::{Result, SimError};
use crate::simulation::trail::TrailBuffer;

pub type NVec3 = Vector3<f64>;

/// Initial condition for one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub x: NVec3, // initial position
    pub v: NVec3, // initial velocity
    pub m: f64,   // mass
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    m: f64,       // mass, fixed for the body's lifetime
    trail: TrailBuffer,
}

impl Body {
    /// Build a body with an empty trail. `index` is only used for the error.
    pub fn new(index: usize, spec: &BodySpec, trail_capacity: usize) -> Result<Self> {
        if !(spec.m.is_finite() && spec.m > 0.0) {
            return Err(SimError::InvalidMass { index, mass: spec.m });
        }
        Ok(Self {
            x: spec.x,
            v: spec.v,
            m: spec.m,
            trail: TrailBuffer::new(trail_capacity)?,
        })
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Append the current position to the trail.
    pub(crate) fn record_position(&mut self) {
        self.trail.push(self.x);
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // ordered bodies of the current run
    pub t: f64,            // simulation time
    pub steps: u64,        // completed integrator steps
}
