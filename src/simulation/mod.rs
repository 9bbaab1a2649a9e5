pub mod states;
pub mod trail;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod diagnostics;
pub mod scenario;
