use clap::ValueEnum;
use fdheat_core::{Profile, Scheme};

/// Initial temperature profile, as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IcType {
    Gauss,
    SuperGauss,
    Rectangle,
    Delta,
}

impl From<IcType> for Profile {
    fn from(ic: IcType) -> Profile {
        match ic {
            IcType::Gauss => Profile::Gauss,
            IcType::SuperGauss => Profile::SuperGauss,
            IcType::Rectangle => Profile::Rectangle,
            IcType::Delta => Profile::Delta,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodType {
    Explicit,
    Implicit,
    CrankNicolson,
}

impl From<MethodType> for Scheme {
    fn from(m: MethodType) -> Scheme {
        match m {
            MethodType::Explicit => Scheme::Explicit,
            MethodType::Implicit => Scheme::Implicit,
            MethodType::CrankNicolson => Scheme::CrankNicolson,
        }
    }
}
