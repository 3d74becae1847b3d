use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::grid::GridParameters;

/// Shape of the initial temperature pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Profile {
    Gauss,
    SuperGauss,
    Rectangle,
    Delta,
}

impl Profile {
    pub const ALL: [Profile; 4] = [
        Profile::Gauss,
        Profile::SuperGauss,
        Profile::Rectangle,
        Profile::Delta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Gauss => "gauss",
            Profile::SuperGauss => "super-gauss",
            Profile::Rectangle => "rectangle",
            Profile::Delta => "delta",
        }
    }

    /// Value at `x` (measured from the domain center) on a domain of length
    /// `length_x`. The pulse width is a tenth of the domain.
    pub fn sample(&self, x: f64, length_x: f64, amplitude: f64) -> f64 {
        let width = 0.1 * length_x;
        match self {
            Profile::Gauss => amplitude * (-(x / width).powi(2)).exp(),
            Profile::SuperGauss => amplitude * (-(x / width).powi(8)).exp(),
            Profile::Rectangle => {
                if x.abs() < width {
                    amplitude
                } else {
                    0.0
                }
            }
            Profile::Delta => {
                if x.abs() < 1e-10 * length_x {
                    amplitude
                } else {
                    0.0
                }
            }
        }
    }

    /// The delta spike lands on a single point, so its height is scaled by
    /// `0.1 * L / dx` to carry the same discrete mass at every resolution.
    pub fn amplitude(&self, grid: &GridParameters) -> f64 {
        match self {
            Profile::Delta => 0.1 * grid.length_x() / grid.dx(),
            _ => 1.0,
        }
    }

    /// Evaluate the profile at every grid point.
    pub fn initial_state(&self, grid: &GridParameters) -> Vec<f64> {
        let amplitude = self.amplitude(grid);
        (0..grid.nx())
            .map(|i| self.sample(grid.coordinate(i), grid.length_x(), amplitude))
            .collect()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownProfile(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(nx: usize) -> GridParameters {
        GridParameters::new(nx, 100, 10.0, 1.0).unwrap()
    }

    #[test]
    fn gauss_shapes() {
        assert_eq!(Profile::Gauss.sample(0.0, 10.0, 1.0), 1.0);
        let e = (-1.0f64).exp();
        assert!((Profile::Gauss.sample(1.0, 10.0, 1.0) - e).abs() < 1e-15);
        assert!((Profile::SuperGauss.sample(-1.0, 10.0, 2.0) - 2.0 * e).abs() < 1e-15);
        // Flatter top than the plain gaussian
        assert!(Profile::SuperGauss.sample(0.5, 10.0, 1.0) > Profile::Gauss.sample(0.5, 10.0, 1.0));
    }

    #[test]
    fn rectangle_edges_are_exclusive() {
        assert_eq!(Profile::Rectangle.sample(0.99, 10.0, 1.0), 1.0);
        assert_eq!(Profile::Rectangle.sample(1.0, 10.0, 1.0), 0.0);
        assert_eq!(Profile::Rectangle.sample(-1.0, 10.0, 1.0), 0.0);
    }

    #[test]
    fn delta_occupies_only_the_center_point() {
        let g = grid(65);
        let state = Profile::Delta.initial_state(&g);
        let nonzero: Vec<usize> = (0..state.len()).filter(|&i| state[i] != 0.0).collect();
        assert_eq!(nonzero, vec![32]);
        assert!((state[32] - 0.1 * 10.0 / g.dx()).abs() < 1e-12);
    }

    #[test]
    fn delta_mass_is_resolution_independent() {
        for nx in [33, 65, 129, 257] {
            let g = grid(nx);
            let mass: f64 = Profile::Delta.initial_state(&g).iter().sum::<f64>() * g.dx();
            assert!((mass - 1.0).abs() < 1e-12, "nx={nx}: mass={mass}");
        }
    }

    #[test]
    fn parses_names() {
        for p in Profile::ALL {
            assert_eq!(p.to_string().parse::<Profile>().unwrap(), p);
        }
        assert_eq!("Super-Gauss".parse::<Profile>().unwrap(), Profile::SuperGauss);
        assert_eq!(
            "box".parse::<Profile>(),
            Err(ConfigError::UnknownProfile("box".into()))
        );
    }
}
