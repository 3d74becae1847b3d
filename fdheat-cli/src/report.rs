//! JSON-lines records written to stdout.

use fdheat_core::{GridParameters, RunOutcome, Snapshot, StabilityCurves};
use serde::Serialize;

#[derive(Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record<'a> {
    Grid {
        scheme: &'static str,
        profile: &'static str,
        nx: usize,
        nt: usize,
        length_x: f64,
        length_t: f64,
        dx: f64,
        dt: f64,
        alpha: f64,
    },
    Curves {
        scheme: &'static str,
        alpha: f64,
        xi: &'a [f64],
        ideal: &'a [f64],
        dispersion: &'a [f64],
        dissipation: &'a [f64],
    },
    Snapshot {
        kind: &'static str,
        time: f64,
        x: &'a [f64],
        u: &'a [f64],
    },
    Finished {
        outcome: &'static str,
        steps: usize,
        time: f64,
    },
}

impl<'a> Record<'a> {
    pub fn grid(grid: &GridParameters, scheme: &'static str, profile: &'static str) -> Self {
        Record::Grid {
            scheme,
            profile,
            nx: grid.nx(),
            nt: grid.nt(),
            length_x: grid.length_x(),
            length_t: grid.length_t(),
            dx: grid.dx(),
            dt: grid.dt(),
            alpha: grid.alpha(),
        }
    }

    pub fn curves(curves: &'a StabilityCurves) -> Self {
        Record::Curves {
            scheme: curves.scheme.as_str(),
            alpha: curves.alpha,
            xi: &curves.xi,
            ideal: &curves.ideal,
            dispersion: &curves.dispersion,
            dissipation: &curves.dissipation,
        }
    }

    pub fn snapshot(snapshot: &'a Snapshot, x: &'a [f64]) -> Self {
        Record::Snapshot {
            kind: snapshot.kind.as_str(),
            time: snapshot.time,
            x,
            u: &snapshot.values,
        }
    }

    pub fn finished(outcome: RunOutcome, steps: usize, time: f64) -> Self {
        Record::Finished {
            outcome: outcome.as_str(),
            steps,
            time,
        }
    }
}
