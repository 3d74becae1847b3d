//! Finite-difference solvers for the 1-D heat equation `u_t = u_xx` on a
//! bounded interval with clamped ends, plus the von Neumann analysis used to
//! compare each scheme with the exact diffusion operator.

pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod profile;
pub mod scheme;
pub mod stability;
pub mod stepper;

pub use config::{LENGTH_T, LENGTH_X, SimConfig, snap_cells};
pub use controller::{Phase, RunOutcome, Simulation, Snapshot, SnapshotKind};
pub use error::ConfigError;
pub use grid::GridParameters;
pub use profile::Profile;
pub use scheme::Scheme;
pub use stability::{StabilityCurves, amplification_factor, dispersion_dissipation};
pub use stepper::{Stepper, ThomasSolver, TimeStep};
