//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `G` (tuned for visual stability, not SI)
//! - fixed step size `dt`
//! - trail capacity per body
//! - squared separation below which a pair's force is skipped

use crate::error::{Result, SimError};

pub const DEFAULT_G: f64 = 9.8;
pub const DEFAULT_DT: f64 = 0.1;
pub const DEFAULT_TRAIL_CAPACITY: usize = 800;
pub const DEFAULT_MIN_DISTANCE_SQ: f64 = 1.0;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64,                // gravitational constant
    pub dt: f64,               // step size
    pub trail_capacity: usize, // points kept per trail
    pub min_distance_sq: f64,  // pairs closer than this exert no force
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: DEFAULT_G,
            dt: DEFAULT_DT,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            min_distance_sq: DEFAULT_MIN_DISTANCE_SQ,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<()> {
        if !self.G.is_finite() {
            return Err(SimError::InvalidParameter(format!("G must be finite, got {}", self.G)));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidParameter(format!("dt must be > 0, got {}", self.dt)));
        }
        if self.trail_capacity == 0 {
            return Err(SimError::InvalidParameter("trail_capacity must be at least 1".to_string()));
        }
        if !(self.min_distance_sq.is_finite() && self.min_distance_sq > 0.0) {
            return Err(SimError::InvalidParameter(format!(
                "min_distance_sq must be > 0, got {}",
                self.min_distance_sq
            )));
        }
        Ok(())
    }
}
