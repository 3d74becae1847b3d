//! Von Neumann analysis of the three schemes.
//!
//! For a Fourier mode with normalized wavenumber `xi` (fraction of the
//! sampling wavenumber, so `xi = 0.5` is Nyquist) each scheme multiplies the
//! amplitude by `lambda(xi, alpha)` per step. `ln(lambda)` splits into a
//! phase error (imaginary part) and a damping rate (negated real part).

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::scheme::Scheme;

/// One-step amplification factor of `scheme` for wavenumber fraction `xi`.
pub fn amplification_factor(scheme: Scheme, xi: f64, alpha: f64) -> Complex64 {
    let kappa = 2.0 * PI * xi;
    let s = 1.0 - kappa.cos();
    let lambda = match scheme {
        Scheme::Explicit => 1.0 - 2.0 * alpha * s,
        Scheme::Implicit => 1.0 / (1.0 + 2.0 * alpha * s),
        Scheme::CrankNicolson => (1.0 - alpha * s) / (1.0 + alpha * s),
    };
    Complex64::new(lambda, 0.0)
}

/// Unscaled `(dispersion, dissipation)` per step, i.e. `(Im ln λ, -Re ln λ)`.
///
/// A zero amplification factor (explicit, `alpha = 0.25` at Nyquist) gives
/// an infinite dissipation.
pub fn dispersion_dissipation(scheme: Scheme, xi: f64, alpha: f64) -> (f64, f64) {
    let log = amplification_factor(scheme, xi, alpha).ln();
    (log.im, -log.re)
}

/// Display-ready curves over `xi` in `[0, 0.5]`.
///
/// `dispersion` is divided by `pi` and `dissipation` by `4 pi^2 alpha`, which
/// puts the exact continuous operator on `ideal = xi^2`.
#[derive(Clone, Debug, PartialEq)]
pub struct StabilityCurves {
    pub scheme: Scheme,
    pub alpha: f64,
    pub xi: Vec<f64>,
    pub ideal: Vec<f64>,
    pub dispersion: Vec<f64>,
    pub dissipation: Vec<f64>,
}

impl StabilityCurves {
    /// Sample `samples` evenly spaced wavenumbers from 0 to Nyquist.
    /// A grid of `nx` points resolves `nx / 2 + 1` of them. A single sample
    /// sits at `xi = 0`; zero samples give empty curves.
    pub fn compute(scheme: Scheme, alpha: f64, samples: usize) -> Self {
        let last = samples.saturating_sub(1).max(1) as f64;
        let dissipation_scale = 4.0 * PI * PI * alpha;

        let mut curves = StabilityCurves {
            scheme,
            alpha,
            xi: Vec::with_capacity(samples),
            ideal: Vec::with_capacity(samples),
            dispersion: Vec::with_capacity(samples),
            dissipation: Vec::with_capacity(samples),
        };

        for i in 0..samples {
            let xi = 0.5 * i as f64 / last;
            let (disp, diss) = dispersion_dissipation(scheme, xi, alpha);
            curves.xi.push(xi);
            curves.ideal.push(xi * xi);
            curves.dispersion.push(disp / PI);
            curves.dissipation.push(diss / dissipation_scale);
        }
        curves
    }

    pub fn len(&self) -> usize {
        self.xi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xi.is_empty()
    }
}
