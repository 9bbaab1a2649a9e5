//! Error types for the simulation core and scenario loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("body {index} has invalid mass {mass} (must be finite and > 0)")]
    InvalidMass { index: usize, mass: f64 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
