//! Error types for formicary_core.
//!
//! The simulation itself is total; errors only surface while loading or
//! validating configuration.

use thiserror::Error;

/// Main error type for formicary_core operations.
#[derive(Error, Debug)]
pub enum SimError {
    /// A configuration value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML encoding errors
    #[error("Config encode error: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Result type alias for formicary_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

/// Returns a [`SimError::Config`] carrying `msg` unless `cond` holds.
pub(crate) fn ensure(cond: bool, msg: impl Into<String>) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(SimError::config(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::config("width must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: width must be positive"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SimError = io_err.into();
        assert!(matches!(err, SimError::Io(_)));
    }

    #[test]
    fn test_ensure() {
        assert!(ensure(true, "unused").is_ok());
        assert!(matches!(ensure(false, "boom"), Err(SimError::Config(m)) if m == "boom"));
    }
}
