//! Error types for building and running simulations
//!
//! All validation happens when a run is constructed. Once a `Simulation`
//! exists, stepping is total and has no error path; only the output side
//! (renderer / frame sink) can fail afterwards.

use std::fmt;
use std::io;

/// Coarse classification of a [`SimError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Run configuration rejected before any computation began
    InvalidConfig,
    /// Filesystem failure while reading config or writing frames
    Io,
    /// Malformed YAML / frame data
    Parse,
}

/// Error type for simulation setup and output
#[derive(Debug)]
pub enum SimError {
    /// Invalid run configuration (N < 1, dt <= 0, length <= 0, ...)
    InvalidConfig(String),
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid YAML, bad frame file)
    Parse(String),
}

impl SimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            SimError::Io(_) => ErrorKind::Io,
            SimError::Parse(_) => ErrorKind::Parse,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfig(msg.into())
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfig(msg) => write!(f, "invalid run configuration: {}", msg),
            SimError::Io(err) => write!(f, "io error: {}", err),
            SimError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(err) => Some(err),
            SimError::InvalidConfig(_) | SimError::Parse(_) => None,
        }
    }
}

impl From<io::Error> for SimError {
    fn from(err: io::Error) -> Self {
        SimError::Io(err)
    }
}

impl From<serde_yaml::Error> for SimError {
    fn from(err: serde_yaml::Error) -> Self {
        SimError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(SimError::invalid("n = 0").kind(), ErrorKind::InvalidConfig);
        assert_eq!(SimError::Parse("x".into()).kind(), ErrorKind::Parse);

        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: SimError = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn display_includes_message() {
        let err = SimError::invalid("timestep must be > 0");
        assert_eq!(err.to_string(), "invalid run configuration: timestep must be > 0");
    }
}
