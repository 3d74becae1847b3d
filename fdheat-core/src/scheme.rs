use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Time-integration scheme, fixed for the duration of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Forward time, central space.
    #[default]
    Explicit,
    /// Backward time, central space.
    Implicit,
    CrankNicolson,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Explicit, Scheme::Implicit, Scheme::CrankNicolson];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Explicit => "explicit",
            Scheme::Implicit => "implicit",
            Scheme::CrankNicolson => "crank-nicolson",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownScheme(s.to_string()))
    }
}
