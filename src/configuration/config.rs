//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constants and numerical settings
//! - [`RandomizeConfig`]  – how unspecified initial conditions are filled in
//! - [`BodyConfig`]       – initial state for each body, every field optional
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! Every field has a default, so an empty file is a valid scenario (three
//! fully random bodies).
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   G: 9.8                  # gravitational constant
//!   dt: 0.1                 # fixed step size
//!   trail_capacity: 800     # points kept per trail
//!   min_distance_sq: 1.0    # pairs closer than this exert no force
//!   seed: 7                 # optional, makes random fields reproducible
//!
//! randomize:
//!   position_range: 100.0   # random positions in [-r, r] per axis
//!   velocity_range: 1.0     # random velocities in [-r, r] per axis
//!   default_mass: 300.0     # used when m is missing or not > 0
//!
//! bodies:
//!   - x: [-50.0, 0.0, 0.0]
//!     v: [0.0, 1.0, 0.0]
//!     m: 300.0
//!   - x: [50.0, 0.0, 0.0]   # random velocity, default mass
//!   - {}                    # fully random
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;

use crate::error::Result;
use crate::simulation::params::{
    Parameters, DEFAULT_DT, DEFAULT_G, DEFAULT_MIN_DISTANCE_SQ, DEFAULT_TRAIL_CAPACITY,
};
use crate::simulation::states::{BodySpec, NVec3};

pub const DEFAULT_BODY_COUNT: usize = 3;
pub const DEFAULT_MASS: f64 = 300.0;
pub const DEFAULT_POSITION_RANGE: f64 = 100.0;
pub const DEFAULT_VELOCITY_RANGE: f64 = 1.0;

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64,                // gravitational constant
    pub dt: f64,               // time step size
    pub trail_capacity: usize, // trail length per body
    pub min_distance_sq: f64,  // near-field force cutoff
    pub seed: Option<u64>,     // deterministic seed for random fields
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: DEFAULT_G,
            dt: DEFAULT_DT,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            min_distance_sq: DEFAULT_MIN_DISTANCE_SQ,
            seed: None,
        }
    }
}

impl ParametersConfig {
    pub fn to_parameters(&self) -> Parameters {
        Parameters {
            G: self.G,
            dt: self.dt,
            trail_capacity: self.trail_capacity,
            min_distance_sq: self.min_distance_sq,
        }
    }
}

/// Ranges used to fill in fields a body config leaves out
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RandomizeConfig {
    pub position_range: f64,
    pub velocity_range: f64,
    pub default_mass: f64,
}

impl Default for RandomizeConfig {
    fn default() -> Self {
        Self {
            position_range: DEFAULT_POSITION_RANGE,
            velocity_range: DEFAULT_VELOCITY_RANGE,
            default_mass: DEFAULT_MASS,
        }
    }
}

/// Operator-entered initial state for one body; `None` means "pick for me"
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    pub x: Option<[f64; 3]>, // position
    pub v: Option<[f64; 3]>, // velocity
    pub m: Option<f64>,      // mass
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub randomize: RandomizeConfig,
    pub bodies: Vec<BodyConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::randomized(DEFAULT_BODY_COUNT)
    }
}

impl ScenarioConfig {
    /// Scenario of `n` bodies with every field left to the randomizer
    pub fn randomized(n: usize) -> Self {
        Self {
            parameters: ParametersConfig::default(),
            randomize: RandomizeConfig::default(),
            bodies: vec![BodyConfig::default(); n],
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Resolve every body config into a concrete spec, drawing missing
    /// positions/velocities from `rng` and substituting the default mass
    /// for missing or non-positive masses
    pub fn body_specs<R: Rng>(&self, rng: &mut R) -> Vec<BodySpec> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| self.resolve_body(i, bc, rng))
            .collect()
    }

    fn resolve_body<R: Rng>(&self, index: usize, bc: &BodyConfig, rng: &mut R) -> BodySpec {
        let r = &self.randomize;
        let x = match bc.x {
            Some(x) => NVec3::from(x),
            None => random_vec(rng, r.position_range),
        };
        let v = match bc.v {
            Some(v) => NVec3::from(v),
            None => random_vec(rng, r.velocity_range),
        };
        let m = match bc.m {
            Some(m) if m.is_finite() && m > 0.0 => m,
            Some(m) => {
                log::warn!("body {index}: mass {m} is not > 0, using {}", r.default_mass);
                r.default_mass
            }
            None => r.default_mass,
        };
        BodySpec { x, v, m }
    }
}

/// Uniform vector in [-range, range]^3; a non-positive range yields zero
fn random_vec<R: Rng>(rng: &mut R, range: f64) -> NVec3 {
    if !(range.is_finite() && range > 0.0) {
        return NVec3::zeros();
    }
    NVec3::new(
        rng.gen_range(-range..=range),
        rng.gen_range(-range..=range),
        rng.gen_range(-range..=range),
    )
}
