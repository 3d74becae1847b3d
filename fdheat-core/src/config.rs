use crate::error::ConfigError;
use crate::grid::GridParameters;
use crate::profile::Profile;

/// Default physical length of the spatial domain.
pub const LENGTH_X: f64 = 10.0;
/// Default integration horizon.
pub const LENGTH_T: f64 = 1.0;

pub const CELLS_MIN: usize = 32;
pub const CELLS_MAX: usize = 256;
pub const NT_MIN: usize = 1;
pub const NT_MAX: usize = 1000;

/// Everything needed to rebuild the grid and the initial state.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub nx: usize,
    pub nt: usize,
    pub profile: Profile,
    pub length_x: f64,
    pub length_t: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            nx: CELLS_MIN + 1,
            nt: 100,
            profile: Profile::Gauss,
            length_x: LENGTH_X,
            length_t: LENGTH_T,
        }
    }
}

impl SimConfig {
    /// Build a configuration the way an interactive driver does: the cell
    /// count is snapped to a power of two and `nt` is clamped to its range.
    /// The point count is `cells + 1` so the domain center is a grid point.
    pub fn from_cells(cells: usize, nt: usize, profile: Profile) -> Self {
        SimConfig {
            nx: snap_cells(cells) + 1,
            nt: nt.clamp(NT_MIN, NT_MAX),
            profile,
            ..SimConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid().map(|_| ())
    }

    pub fn grid(&self) -> Result<GridParameters, ConfigError> {
        GridParameters::new(self.nx, self.nt, self.length_x, self.length_t)
    }
}

/// Round `cells` to the nearest power of two (in log2 space) within
/// `[CELLS_MIN, CELLS_MAX]`.
pub fn snap_cells(cells: usize) -> usize {
    let cells = cells.clamp(CELLS_MIN, CELLS_MAX);
    let exponent = (cells as f64).log2().round() as u32;
    (1usize << exponent).clamp(CELLS_MIN, CELLS_MAX)
}
