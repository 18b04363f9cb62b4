//! Crate-level error types.

use std::fmt;

/// Errors produced by the halo crate.
#[derive(Debug)]
pub enum HaloError {
    /// A named mount was not present in the registry.
    MountNotFound(String),
    /// An animation tag outside the supported set.
    UnknownMotion(String),
    /// Surface allocation or acquisition failure.
    Surface(String),
    /// Configuration rejected at the construction/update boundary.
    InvalidConfig(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for HaloError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MountNotFound(name) => {
                write!(f, "mount not found: {name}")
            }
            Self::UnknownMotion(tag) => {
                write!(f, "unknown animation type: {tag}")
            }
            Self::Surface(msg) => write!(f, "surface error: {msg}"),
            Self::InvalidConfig(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for HaloError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HaloError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_offending_name() {
        let err = HaloError::MountNotFound("overlay".to_owned());
        assert_eq!(err.to_string(), "mount not found: overlay");

        let err = HaloError::UnknownMotion("laser-show".to_owned());
        assert_eq!(err.to_string(), "unknown animation type: laser-show");
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = HaloError::from(io);
        assert!(err.source().is_some());
    }
}
