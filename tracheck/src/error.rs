use core::fmt::{self, Display};
use std::io;
use std::path::PathBuf;

/// Central error type.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Traduko(traduko::Error),
    /// Lean must be called, but no command was given
    NoLean,
    /// proof files that do not check
    Invalid(Vec<PathBuf>),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<traduko::Error> for Error {
    fn from(err: traduko::Error) -> Self {
        Self::Traduko(err)
    }
}

macro_rules! from_traduko {
    ($($err:path),*) => {$(
        impl From<$err> for Error {
            fn from(err: $err) -> Self {
                Self::Traduko(err.into())
            }
        }
    )*};
}

from_traduko!(
    traduko::language::Error,
    traduko::lean::Error,
    traduko::proof::Error,
    traduko::xml::Error
);

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Traduko(e) => e.fmt(f),
            Self::NoLean => write!(f, "no Lean command given (use --lean or TRADUKO_LEAN)"),
            Self::Invalid(files) => {
                write!(f, "invalid proofs:")?;
                files.iter().try_for_each(|p| write!(f, " {}", p.display()))
            }
        }
    }
}
