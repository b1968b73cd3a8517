//! Surveyor Core - Foundation crate for the survey traversal workspace.
//!
//! This crate provides shared types, error handling and configuration
//! management that the browser driver and the traversal engine depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration and input validation errors using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Validated newtypes for the survey parameters (`TimeOfDay`, `StoreId`, `SurveyCode`)
//!
//! # Example
//!
//! ```rust
//! use surveyor_core::{AppConfig, TimeOfDay};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.traversal.max_unknown_pages, 5);
//!
//! let time: TimeOfDay = "13:24".parse()?;
//! assert_eq!(time.hour_value(), "13");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, SelectorConfig, SurveyConfig, TraversalConfig};
pub use error::{ConfigError, ConfigResult, ValidationError};
pub use types::{StoreId, SurveyCode, TimeOfDay};
