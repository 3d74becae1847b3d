//! One-step update rules for the three schemes.
//!
//! Every stepper reads the current state and writes into a separate `next`
//! buffer of the same length; the first and last entries are boundary values
//! and come out unchanged.

use crate::scheme::Scheme;

/// Advance a state vector by one time step.
pub trait TimeStep {
    /// `state` and `next` have the same length (at least 2). `alpha` is the
    /// diffusion number `dt / dx^2`.
    fn advance(&mut self, state: &[f64], next: &mut [f64], alpha: f64);
}

/// Forward-time central-space update. Stable only for `alpha <= 0.5`.
#[derive(Clone, Debug, Default)]
pub struct ExplicitStep;

impl TimeStep for ExplicitStep {
    fn advance(&mut self, state: &[f64], next: &mut [f64], alpha: f64) {
        let n = state.len();
        next[0] = state[0];
        next[n - 1] = state[n - 1];
        for i in 1..(n - 1) {
            next[i] = state[i] + alpha * (state[i + 1] - 2.0 * state[i] + state[i - 1]);
        }
    }
}

/// Forward-elimination coefficients for the Thomas algorithm.
///
/// Solves `diag * x[i] - off * (x[i + 1] + x[i - 1]) = rhs[i]` for the
/// interior points with `x[0] = rhs[0]` and `x[n - 1] = rhs[n - 1]` held
/// fixed. Both passes run strictly in index order.
#[derive(Clone, Debug)]
pub struct ThomasSolver {
    u: Vec<f64>,
    v: Vec<f64>,
}

impl ThomasSolver {
    /// Scratch for a system of `n` unknowns.
    pub fn new(n: usize) -> Self {
        let len = n.saturating_sub(1);
        ThomasSolver {
            u: vec![0.0; len],
            v: vec![0.0; len],
        }
    }

    /// `rhs` and `x` must have the same length, at least 2.
    pub fn solve(&mut self, off: f64, diag: f64, rhs: &[f64], x: &mut [f64]) {
        let n = rhs.len();
        assert!(n >= 2, "tridiagonal system needs at least two points, got {n}");
        assert_eq!(x.len(), n, "solution and right-hand side lengths differ");
        if self.u.len() != n - 1 {
            self.u.resize(n - 1, 0.0);
            self.v.resize(n - 1, 0.0);
        }

        self.u[0] = 0.0;
        self.v[0] = rhs[0];
        for i in 1..(n - 1) {
            let denom = off * self.u[i - 1] - diag;
            self.u[i] = -off / denom;
            self.v[i] = (-rhs[i] - off * self.v[i - 1]) / denom;
        }

        x[n - 1] = rhs[n - 1];
        for i in (0..(n - 1)).rev() {
            x[i] = self.u[i] * x[i + 1] + self.v[i];
        }
    }
}

/// Backward-time central-space update:
/// `(1 + 2 alpha) next[i] - alpha (next[i + 1] + next[i - 1]) = state[i]`.
#[derive(Clone, Debug)]
pub struct ImplicitStep {
    solver: ThomasSolver,
}

impl ImplicitStep {
    pub fn new(n: usize) -> Self {
        ImplicitStep {
            solver: ThomasSolver::new(n),
        }
    }
}

impl TimeStep for ImplicitStep {
    fn advance(&mut self, state: &[f64], next: &mut [f64], alpha: f64) {
        self.solver.solve(alpha, 1.0 + 2.0 * alpha, state, next);
    }
}

/// Trapezoidal-in-time update:
/// `(1 + alpha) next[i] - alpha/2 (next[i + 1] + next[i - 1])
///   = (1 - alpha) state[i] + alpha/2 (state[i + 1] + state[i - 1])`.
#[derive(Clone, Debug)]
pub struct CrankNicolsonStep {
    solver: ThomasSolver,
    rhs: Vec<f64>,
}

impl CrankNicolsonStep {
    pub fn new(n: usize) -> Self {
        CrankNicolsonStep {
            solver: ThomasSolver::new(n),
            rhs: vec![0.0; n],
        }
    }
}

impl TimeStep for CrankNicolsonStep {
    fn advance(&mut self, state: &[f64], next: &mut [f64], alpha: f64) {
        let n = state.len();
        self.rhs.resize(n, 0.0);
        self.rhs[0] = state[0];
        self.rhs[n - 1] = state[n - 1];
        for i in 1..(n - 1) {
            self.rhs[i] = (1.0 - alpha) * state[i] + 0.5 * alpha * (state[i + 1] + state[i - 1]);
        }
        self.solver.solve(0.5 * alpha, 1.0 + alpha, &self.rhs, next);
    }
}

/// The stepper for a run, chosen once from a [`Scheme`].
#[derive(Clone, Debug)]
pub enum Stepper {
    Explicit(ExplicitStep),
    Implicit(ImplicitStep),
    CrankNicolson(CrankNicolsonStep),
}

impl Stepper {
    /// Stepper with scratch sized for `n` grid points.
    pub fn new(scheme: Scheme, n: usize) -> Self {
        match scheme {
            Scheme::Explicit => Stepper::Explicit(ExplicitStep),
            Scheme::Implicit => Stepper::Implicit(ImplicitStep::new(n)),
            Scheme::CrankNicolson => Stepper::CrankNicolson(CrankNicolsonStep::new(n)),
        }
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Stepper::Explicit(_) => Scheme::Explicit,
            Stepper::Implicit(_) => Scheme::Implicit,
            Stepper::CrankNicolson(_) => Scheme::CrankNicolson,
        }
    }
}

impl TimeStep for Stepper {
    fn advance(&mut self, state: &[f64], next: &mut [f64], alpha: f64) {
        match self {
            Stepper::Explicit(s) => s.advance(state, next, alpha),
            Stepper::Implicit(s) => s.advance(state, next, alpha),
            Stepper::CrankNicolson(s) => s.advance(state, next, alpha),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(scheme: Scheme, state: &[f64], alpha: f64) -> Vec<f64> {
        let mut next = vec![0.0; state.len()];
        Stepper::new(scheme, state.len()).advance(state, &mut next, alpha);
        next
    }

    #[test]
    fn explicit_matches_stencil() {
        let state = [0.0, 1.0, 4.0, 9.0, 16.0];
        let next = step(Scheme::Explicit, &state, 0.1);
        // Second difference of i^2 is 2 everywhere
        assert_eq!(next[0], 0.0);
        assert_eq!(next[4], 16.0);
        for i in 1..4 {
            assert!((next[i] - (state[i] + 0.2)).abs() < 1e-12);
        }
    }

    #[test]
    fn boundaries_are_held_by_every_scheme() {
        let state = [2.0, 0.0, 5.0, 0.0, -1.0, 0.5, 3.0];
        for scheme in Scheme::ALL {
            let next = step(scheme, &state, 0.8);
            assert_eq!(next[0], 2.0, "{scheme}");
            assert_eq!(next[6], 3.0, "{scheme}");
        }
    }

    #[test]
    fn linear_profiles_are_steady() {
        let state: Vec<f64> = (0..9).map(|i| 1.0 + 0.5 * i as f64).collect();
        for scheme in Scheme::ALL {
            let next = step(scheme, &state, 0.37);
            for (a, b) in state.iter().zip(&next) {
                assert!((a - b).abs() < 1e-12, "{scheme}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn two_point_grid_is_pure_boundary() {
        for scheme in Scheme::ALL {
            assert_eq!(step(scheme, &[1.5, -2.0], 0.3), vec![1.5, -2.0]);
        }
    }

    #[test]
    fn implicit_satisfies_its_system() {
        let state = [0.0, 0.3, 1.0, 0.7, 0.2, 0.0];
        let alpha = 2.5;
        let next = step(Scheme::Implicit, &state, alpha);
        for i in 1..5 {
            let lhs = (1.0 + 2.0 * alpha) * next[i] - alpha * (next[i + 1] + next[i - 1]);
            assert!((lhs - state[i]).abs() < 1e-12, "row {i}: {lhs} vs {}", state[i]);
        }
    }

    #[test]
    fn crank_nicolson_satisfies_its_system() {
        let state = [0.1, 0.3, 1.0, 0.7, 0.2, 0.0, 0.4];
        let alpha = 1.3;
        let next = step(Scheme::CrankNicolson, &state, alpha);
        for i in 1..6 {
            let lhs = (1.0 + alpha) * next[i] - 0.5 * alpha * (next[i + 1] + next[i - 1]);
            let rhs = (1.0 - alpha) * state[i] + 0.5 * alpha * (state[i + 1] + state[i - 1]);
            assert!((lhs - rhs).abs() < 1e-12, "row {i}");
        }
    }

    #[test]
    fn solver_resizes_scratch() {
        let mut solver = ThomasSolver::new(3);
        let rhs = [1.0, 0.0, 0.0, 0.0, 1.0];
        let mut x = [0.0; 5];
        solver.solve(1.0, 2.0, &rhs, &mut x);
        // Discrete Laplace equation with both ends at 1 is flat
        for xi in x {
            assert!((xi - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    #[should_panic(expected = "at least two points")]
    fn solver_rejects_single_point_system() {
        ThomasSolver::new(1).solve(1.0, 3.0, &[1.0], &mut [0.0]);
    }

    #[test]
    #[should_panic(expected = "lengths differ")]
    fn solver_rejects_short_output() {
        ThomasSolver::new(4).solve(1.0, 3.0, &[1.0, 2.0, 3.0, 4.0], &mut [0.0; 3]);
    }

    #[test]
    fn stepper_reports_scheme() {
        for scheme in Scheme::ALL {
            assert_eq!(Stepper::new(scheme, 8).scheme(), scheme);
        }
    }
}
