//! Error types for configuring a simulation.
//!
//! Numerical divergence is not represented here: it is a run outcome,
//! see [`crate::RunOutcome::Diverged`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("nx must be >= 2, got {nx}")]
    TooFewPoints { nx: usize },

    #[error("nt must be >= 1")]
    NoTimeSteps,

    #[error("{name} must be finite and positive, got {value}")]
    InvalidExtent { name: &'static str, value: f64 },

    #[error("cannot reconfigure while a run is in progress")]
    RunInProgress,

    #[error("unknown initial profile: {0}")]
    UnknownProfile(String),

    #[error("unknown scheme: {0}")]
    UnknownScheme(String),
}
