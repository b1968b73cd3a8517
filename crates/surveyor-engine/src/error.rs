//! Error types raised inside a single traversal iteration.
//!
//! None of these escape [`crate::run_survey`]; the traversal loop either
//! retries them or folds them into a [`crate::FailureReason`].

use surveyor_browser::BrowserError;
use thiserror::Error;

/// Errors that can occur while acting on one page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A control disappeared between query and action
    #[error("control not found for group {group}")]
    ControlNotFound {
        /// Question group (or entry-form field) of the missing control
        group: String,
    },

    /// The driver failed to load or settle a page
    #[error("navigation error: {0}")]
    Navigation(String),
}

impl From<BrowserError> for EngineError {
    fn from(err: BrowserError) -> Self {
        match err {
            BrowserError::ControlNotFound { group, .. } => Self::ControlNotFound { group },
            other => Self::Navigation(other.to_string()),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
