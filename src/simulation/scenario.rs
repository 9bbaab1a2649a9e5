//! The simulation context and the scenario it was built from
//!
//! `Simulation` is the runtime bundle the render loop drives:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies, trails and clock)
//! - active force set (`AccelSet`)
//!
//! `ScenarioSource` remembers the `ScenarioConfig` and the resolved initial
//! conditions so the viewer can restart the same run or roll a new one.
//!
//! Both are inserted into Bevy as `Resource`s.

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::ScenarioConfig;
use crate::error::Result;
use crate::simulation::diagnostics;
use crate::simulation::forces::{AccelSet, PairwiseGravity};
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodySpec, NVec3, System};

#[derive(Resource)]
pub struct Simulation {
    parameters: Parameters,
    system: System,
    forces: AccelSet,
}

impl Simulation {
    /// Empty simulation with pairwise gravity registered
    pub fn new(parameters: Parameters) -> Result<Self> {
        parameters.validate()?;

        let forces = AccelSet::new().with(PairwiseGravity {
            G: parameters.G,
            min_distance_sq: parameters.min_distance_sq,
        });

        Ok(Self {
            parameters,
            system: System::default(),
            forces,
        })
    }

    /// Build the simulation from a scenario config and initial specs
    pub fn from_specs(parameters: Parameters, specs: &[BodySpec]) -> Result<Self> {
        let mut sim = Self::new(parameters)?;
        sim.initialize(specs)?;
        Ok(sim)
    }

    /// Replace every body with fresh ones built from `specs`
    ///
    /// Trails start empty and the clock restarts at zero. If any mass is
    /// invalid nothing is replaced and the error names the offending body.
    pub fn initialize(&mut self, specs: &[BodySpec]) -> Result<()> {
        let bodies = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Body::new(i, spec, self.parameters.trail_capacity))
            .collect::<Result<Vec<Body>>>()?;

        log::info!("initialized {} bodies", bodies.len());
        for (i, b) in bodies.iter().enumerate() {
            log::debug!("  body {i}: x = {:?}, v = {:?}, m = {}", b.x.as_slice(), b.v.as_slice(), b.mass());
        }

        self.system = System {
            bodies,
            t: 0.0,
            steps: 0,
        };
        Ok(())
    }

    /// Advance one fixed step
    pub fn step(&mut self) {
        semi_implicit_euler(&mut self.system, &self.forces, &self.parameters);
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn time(&self) -> f64 {
        self.system.t
    }

    pub fn steps(&self) -> u64 {
        self.system.steps
    }

    pub fn total_momentum(&self) -> NVec3 {
        diagnostics::total_momentum(&self.system)
    }

    pub fn kinetic_energy(&self) -> f64 {
        diagnostics::kinetic_energy(&self.system)
    }

    pub fn potential_energy(&self) -> f64 {
        diagnostics::potential_energy(&self.system, &self.parameters)
    }
}

/// Scenario config plus the initial conditions last resolved from it
#[derive(Resource)]
pub struct ScenarioSource {
    pub config: ScenarioConfig,
    initial: Vec<BodySpec>,
    rng: StdRng,
}

impl ScenarioSource {
    /// Resolve `config` once; `seed` overrides `parameters.seed`
    pub fn new(config: ScenarioConfig, seed: Option<u64>) -> Self {
        let mut rng = match seed.or(config.parameters.seed) {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let initial = config.body_specs(&mut rng);
        Self { config, initial, rng }
    }

    pub fn parameters(&self) -> Parameters {
        self.config.parameters.to_parameters()
    }

    /// Initial conditions of the current run
    pub fn initial(&self) -> &[BodySpec] {
        &self.initial
    }

    /// Re-roll every field the config leaves unspecified
    pub fn reroll(&mut self) -> &[BodySpec] {
        self.initial = self.config.body_specs(&mut self.rng);
        &self.initial
    }

    pub fn build(&self) -> Result<Simulation> {
        Simulation::from_specs(self.parameters(), &self.initial)
    }
}
