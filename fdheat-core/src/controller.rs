//! Run loop: owns the state vector and drives a [`Stepper`] one tick at a time.
//!
//! The controller is a small state machine (`Idle -> Running -> Finished`).
//! Pacing is left to the driver, which calls [`Simulation::tick`] as often as
//! it likes and draws whatever snapshots come back.

use log::{debug, info, warn};

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::grid::GridParameters;
use crate::scheme::Scheme;
use crate::stability::StabilityCurves;
use crate::stepper::{Stepper, TimeStep};

/// A run diverges once any value in the scanned region exceeds this magnitude.
pub const DIVERGENCE_LIMIT: f64 = 3.0;
/// Fraction of the domain, counted from the left boundary, that is scanned.
pub const DIVERGENCE_SCAN_FRACTION: f64 = 0.4;
/// Number of equal sub-intervals of the horizon that each produce a snapshot.
pub const SNAPSHOT_INTERVALS: u32 = 5;

/// Tolerance on the horizon, in units of `dt`.
const HORIZON_EPS: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Diverged,
    Cancelled,
}

impl RunOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunOutcome::Completed => "completed",
            RunOutcome::Diverged => "diverged",
            RunOutcome::Cancelled => "cancelled",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished(RunOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotKind {
    /// State at `t = 0`, emitted by [`Simulation::start`].
    Initial,
    /// A 1/5-horizon boundary was crossed.
    Progress,
    /// Last state of a run that reached the horizon.
    Completed,
    /// Last state of a run that blew up.
    Diverged,
}

impl SnapshotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKind::Initial => "initial",
            SnapshotKind::Progress => "progress",
            SnapshotKind::Completed => "completed",
            SnapshotKind::Diverged => "diverged",
        }
    }
}

/// A copy of the state vector at simulated time `time`.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub time: f64,
    pub kind: SnapshotKind,
    pub values: Vec<f64>,
}

impl Snapshot {
    pub fn is_final(&self) -> bool {
        matches!(self.kind, SnapshotKind::Completed | SnapshotKind::Diverged)
    }
}

pub struct Simulation {
    config: SimConfig,
    grid: GridParameters,
    stepper: Stepper,
    state: Vec<f64>,
    next: Vec<f64>,
    phase: Phase,
    elapsed: f64,
    steps_taken: usize,
    snapshots_emitted: u32,
}

impl Simulation {
    pub fn new(config: SimConfig, scheme: Scheme) -> Result<Self, ConfigError> {
        let grid = config.grid()?;
        let nx = grid.nx();
        let mut sim = Simulation {
            stepper: Stepper::new(scheme, nx),
            state: Vec::new(),
            next: vec![0.0; nx],
            config,
            grid,
            phase: Phase::Idle,
            elapsed: 0.0,
            steps_taken: 0,
            snapshots_emitted: 0,
        };
        sim.reset_state();
        Ok(sim)
    }

    /// Rebuild grid, state and scratch for a new configuration.
    ///
    /// Rejected while a run is in progress; on error nothing changes.
    pub fn configure(&mut self, config: SimConfig) -> Result<&GridParameters, ConfigError> {
        if self.is_running() {
            return Err(ConfigError::RunInProgress);
        }
        let grid = config.grid()?;
        debug!(
            "configured nx={} nt={} dx={:.4} dt={:.4} alpha={:.4}",
            grid.nx(),
            grid.nt(),
            grid.dx(),
            grid.dt(),
            grid.alpha()
        );

        let scheme = self.stepper.scheme();
        self.stepper = Stepper::new(scheme, grid.nx());
        self.next = vec![0.0; grid.nx()];
        self.config = config;
        self.grid = grid;
        self.phase = Phase::Idle;
        self.reset_state();
        Ok(&self.grid)
    }

    pub fn set_scheme(&mut self, scheme: Scheme) -> Result<(), ConfigError> {
        if self.is_running() {
            return Err(ConfigError::RunInProgress);
        }
        if scheme != self.stepper.scheme() {
            self.stepper = Stepper::new(scheme, self.grid.nx());
        }
        Ok(())
    }

    /// Begin a run from a freshly sampled initial state.
    ///
    /// Returns the initial snapshot. Calling this during a run restarts it.
    pub fn start(&mut self) -> Snapshot {
        self.reset_state();
        self.phase = Phase::Running;

        let alpha = self.grid.alpha();
        let scheme = self.stepper.scheme();
        info!(
            "starting {} run: nx={} nt={} alpha={:.4} profile={}",
            scheme,
            self.grid.nx(),
            self.grid.nt(),
            alpha,
            self.config.profile
        );
        if scheme == Scheme::Explicit && alpha > 0.5 {
            warn!("alpha={alpha:.4} exceeds the explicit stability bound 0.5");
        }

        self.snapshot(SnapshotKind::Initial)
    }

    /// Advance one time step.
    ///
    /// Returns a snapshot when a 1/5-horizon boundary is crossed and on the
    /// tick that ends the run. Does nothing unless the run is in progress.
    pub fn tick(&mut self) -> Option<Snapshot> {
        if !self.is_running() {
            return None;
        }

        let dt = self.grid.dt();
        let horizon = self.grid.length_t();

        self.stepper.advance(&self.state, &mut self.next, self.grid.alpha());
        std::mem::swap(&mut self.state, &mut self.next);
        self.elapsed += dt;
        self.steps_taken += 1;

        if let Some(index) = self.find_divergence() {
            warn!(
                "run diverged at t={:.4} (step {}): |u[{}]| = {}",
                self.elapsed, self.steps_taken, index, self.state[index]
            );
            return Some(self.finish(RunOutcome::Diverged));
        }

        // The horizon check guards against accumulated drift in `elapsed`.
        if self.steps_taken >= self.grid.nt() || self.elapsed + dt > horizon + HORIZON_EPS * dt {
            return Some(self.finish(RunOutcome::Completed));
        }

        let boundary = horizon / SNAPSHOT_INTERVALS as f64 * (self.snapshots_emitted + 1) as f64;
        if self.elapsed >= boundary - HORIZON_EPS * dt {
            self.snapshots_emitted += 1;
            return Some(self.snapshot(SnapshotKind::Progress));
        }
        None
    }

    /// Stop a run between ticks, keeping the last computed state.
    pub fn cancel(&mut self) {
        if self.is_running() {
            info!("run cancelled at t={:.4}", self.elapsed);
            self.phase = Phase::Finished(RunOutcome::Cancelled);
        }
    }

    /// Start a run and tick it to the end, handing every snapshot to `sink`.
    pub fn run<F: FnMut(&Snapshot)>(&mut self, mut sink: F) -> RunOutcome {
        let initial = self.start();
        sink(&initial);
        while self.is_running() {
            if let Some(snapshot) = self.tick() {
                sink(&snapshot);
            }
        }
        self.outcome().unwrap_or(RunOutcome::Cancelled)
    }

    /// Curves for the current scheme and alpha, at the resolution the grid
    /// can represent.
    pub fn stability_curves(&self) -> StabilityCurves {
        StabilityCurves::compute(self.scheme(), self.grid.alpha(), self.grid.nx() / 2 + 1)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.stepper.scheme()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridParameters {
        &self.grid
    }

    pub fn state(&self) -> &[f64] {
        &self.state
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    fn reset_state(&mut self) {
        self.state = self.config.profile.initial_state(&self.grid);
        self.elapsed = 0.0;
        self.steps_taken = 0;
        self.snapshots_emitted = 0;
    }

    fn find_divergence(&self) -> Option<usize> {
        let end = (self.state.len() as f64 * DIVERGENCE_SCAN_FRACTION) as usize;
        self.state[..end]
            .iter()
            .position(|v| !v.is_finite() || v.abs() > DIVERGENCE_LIMIT)
    }

    fn finish(&mut self, outcome: RunOutcome) -> Snapshot {
        self.phase = Phase::Finished(outcome);
        if outcome == RunOutcome::Completed {
            info!(
                "run completed at t={:.4} after {} steps",
                self.elapsed, self.steps_taken
            );
        }
        let kind = match outcome {
            RunOutcome::Diverged => SnapshotKind::Diverged,
            _ => SnapshotKind::Completed,
        };
        self.snapshot(kind)
    }

    fn snapshot(&self, kind: SnapshotKind) -> Snapshot {
        Snapshot {
            time: self.elapsed,
            kind,
            values: self.state.clone(),
        }
    }
}
