pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;

pub use error::{Result, SimError};

pub use simulation::states::{Body, BodySpec, System, NVec3};
pub use simulation::trail::{TrailBuffer, TrailIter};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, AccelSet, PairwiseGravity};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::scenario::{ScenarioSource, Simulation};

pub use configuration::config::{BodyConfig, ParametersConfig, RandomizeConfig, ScenarioConfig};

pub use visualization::viewer::run_3d;
