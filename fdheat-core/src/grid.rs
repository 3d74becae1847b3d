use crate::error::ConfigError;

/// Discretization of the domain `[-length_x/2, length_x/2] x [0, length_t]`.
///
/// Immutable once built; a new value is derived on every reconfiguration so
/// `alpha` can never go stale with respect to `nx` or `nt`.
#[derive(Clone, Debug, PartialEq)]
pub struct GridParameters {
    nx: usize,
    nt: usize,
    length_x: f64,
    length_t: f64,
    dx: f64,
    dt: f64,
    alpha: f64,
}

impl GridParameters {
    /// No stability bound is enforced on `alpha`: unstable explicit runs are
    /// a legitimate thing to look at.
    pub fn new(nx: usize, nt: usize, length_x: f64, length_t: f64) -> Result<Self, ConfigError> {
        if nx < 2 {
            return Err(ConfigError::TooFewPoints { nx });
        }
        if nt < 1 {
            return Err(ConfigError::NoTimeSteps);
        }
        check_extent("length_x", length_x)?;
        check_extent("length_t", length_t)?;

        let dx = length_x / ((nx - 1) as f64);
        let dt = length_t / (nt as f64);

        Ok(GridParameters {
            nx,
            nt,
            length_x,
            length_t,
            dx,
            dt,
            alpha: dt / (dx * dx),
        })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn nt(&self) -> usize {
        self.nt
    }

    pub fn length_x(&self) -> f64 {
        self.length_x
    }

    pub fn length_t(&self) -> f64 {
        self.length_t
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Diffusion number `dt / dx^2`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Coordinate of grid index `i`, measured from the domain center.
    pub fn coordinate(&self, i: usize) -> f64 {
        (i as f64 - (self.nx / 2) as f64) * self.dx
    }

    pub fn coordinates(&self) -> Vec<f64> {
        (0..self.nx).map(|i| self.coordinate(i)).collect()
    }
}

fn check_extent(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidExtent { name, value })
    }
}
