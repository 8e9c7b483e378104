//! Interface to a Lean process that reports proof states.

use core::fmt::{self, Display};
use core::time::Duration;

/// Time that a Lean process may take to check a whole theorem.
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Proof states at requested lines, and the first error message, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub states: Vec<String>,
    pub error: Option<String>,
}

/// A Lean process.
pub trait LeanServer {
    /// Check the theorem `text` and return the proof states after
    /// each of the given 1-based `lines`, in the same order.
    fn states(&mut self, text: &str, lines: &[usize]) -> Result<Response, Error>;
}

#[derive(Debug)]
pub enum Error {
    Timeout(Duration),
    Io(std::io::Error),
    /// the process answered something that could not be understood
    Protocol(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Timeout(d) => write!(f, "Lean did not answer within {} seconds", d.as_secs()),
            Self::Io(e) => write!(f, "Lean process failed: {}", e),
            Self::Protocol(s) => write!(f, "unexpected answer from Lean: {}", s),
        }
    }
}

impl std::error::Error for Error {}
