use fdheat_core::{Profile, Scheme, SimConfig, Simulation, StabilityCurves, ThomasSolver};
use proptest::prelude::*;

/// Right-hand side of `diag * x[i] - off * (x[i + 1] + x[i - 1])` with the
/// end values passed through.
fn apply_system(off: f64, diag: f64, x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut rhs = x.to_vec();
    for i in 1..n - 1 {
        rhs[i] = diag * x[i] - off * (x[i + 1] + x[i - 1]);
    }
    rhs
}

fn arb_scheme() -> impl Strategy<Value = Scheme> {
    prop_oneof![
        Just(Scheme::Explicit),
        Just(Scheme::Implicit),
        Just(Scheme::CrankNicolson),
    ]
}

fn arb_profile() -> impl Strategy<Value = Profile> {
    prop_oneof![
        Just(Profile::Gauss),
        Just(Profile::SuperGauss),
        Just(Profile::Rectangle),
        Just(Profile::Delta),
    ]
}

proptest! {
    #[test]
    fn thomas_recovers_known_solution(
        x in prop::collection::vec(-10.0f64..10.0, 2..200),
        alpha in 1e-4f64..1e3,
    ) {
        // The implicit system, and the Crank-Nicolson one
        for (off, diag) in [(alpha, 1.0 + 2.0 * alpha), (0.5 * alpha, 1.0 + alpha)] {
            let rhs = apply_system(off, diag, &x);
            let mut solved = vec![0.0; x.len()];
            ThomasSolver::new(x.len()).solve(off, diag, &rhs, &mut solved);
            for (a, b) in x.iter().zip(&solved) {
                prop_assert!((a - b).abs() < 1e-8 * (1.0 + alpha), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn implicit_never_diverges(
        cells in 2usize..300,
        nt in 1usize..50,
        profile in arb_profile(),
    ) {
        let config = SimConfig { nx: cells + 1, nt, profile, ..SimConfig::default() };
        let mut sim = Simulation::new(config, Scheme::Implicit).unwrap();
        let peak = sim.state().iter().cloned().fold(0.0, f64::max);
        sim.run(|_| {});
        prop_assert_eq!(sim.steps_taken(), nt);
        // Discrete maximum principle
        prop_assert!(sim.state().iter().all(|v| v.abs() <= peak + 1e-12));
    }

    #[test]
    fn curves_have_matching_lengths(
        scheme in arb_scheme(),
        alpha in 1e-3f64..10.0,
        samples in 1usize..200,
    ) {
        let c = StabilityCurves::compute(scheme, alpha, samples);
        prop_assert_eq!(c.len(), samples);
        prop_assert_eq!(c.ideal.len(), samples);
        prop_assert_eq!(c.dispersion.len(), samples);
        prop_assert_eq!(c.dissipation.len(), samples);
        prop_assert!(c.xi.iter().all(|&xi| (0.0..=0.5).contains(&xi)));
    }
}
