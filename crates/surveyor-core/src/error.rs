//! Core error types for the survey workspace.
//!
//! Configuration failures and input validation failures are kept apart:
//! the former abort startup, the latter are reported as a traversal result
//! before any page is loaded.

use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Survey parameter validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Time does not match `HH:MM`
    #[error("time must be format \"HH:MM\", got '{0}'")]
    MalformedTime(String),

    /// Hour outside 0-23
    #[error("invalid time range for hour: {0}")]
    HourOutOfRange(u8),

    /// Minute outside 0-59
    #[error("invalid time range for minute: {0}")]
    MinuteOutOfRange(u8),

    /// A required parameter was empty
    #[error("missing required parameter: {field}")]
    MissingParameter {
        /// Parameter name
        field: &'static str,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
