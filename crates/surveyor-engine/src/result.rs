//! Traversal outcome types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surveyor_core::ValidationError;
use thiserror::Error;

/// Why a traversal did not reach the finish screen.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// Time does not match `HH:MM`
    #[error("time must be format \"HH:MM\", got '{input}'")]
    MalformedTime {
        /// Input as given
        input: String,
    },

    /// Hour outside 0-23
    #[error("invalid time range for hour: {hour}")]
    HourOutOfRange {
        /// Parsed hour
        hour: u8,
    },

    /// Minute outside 0-59
    #[error("invalid time range for minute: {minute}")]
    MinuteOutOfRange {
        /// Parsed minute
        minute: u8,
    },

    /// Store id or survey code was empty
    #[error("missing required parameter: {field}")]
    MissingParameter {
        /// Parameter name
        field: String,
    },

    /// Configuration could not be turned into an answer policy
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Underlying problem
        message: String,
    },

    /// A control kept disappearing after the retry budget
    #[error("control not found for group {group}")]
    ControlNotFound {
        /// Question group (or entry-form field) of the missing control
        group: String,
    },

    /// Too many consecutive unrecognised pages
    #[error("stuck on unknown page after {attempts} classifications")]
    StuckOnUnknownPage {
        /// Consecutive `Unknown` classifications
        attempts: u32,
    },

    /// The driver failed to load or settle a page
    #[error("navigation error: {message}")]
    NavigationError {
        /// Driver message
        message: String,
    },

    /// Submitted the page limit without reaching the finish screen
    #[error("page limit of {pages} reached without finishing")]
    PageLimitExceeded {
        /// Pages submitted
        pages: u32,
    },

    /// Caller cancelled between iterations
    #[error("traversal cancelled")]
    Cancelled,
}

impl FailureReason {
    /// Whether the failure happened before any page was loaded.
    #[must_use]
    pub fn is_pre_navigation(&self) -> bool {
        matches!(
            self,
            Self::MalformedTime { .. }
                | Self::HourOutOfRange { .. }
                | Self::MinuteOutOfRange { .. }
                | Self::MissingParameter { .. }
                | Self::InvalidConfig { .. }
        )
    }
}

impl From<ValidationError> for FailureReason {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MalformedTime(input) => Self::MalformedTime { input },
            ValidationError::HourOutOfRange(hour) => Self::HourOutOfRange { hour },
            ValidationError::MinuteOutOfRange(minute) => Self::MinuteOutOfRange { minute },
            ValidationError::MissingParameter { field } => Self::MissingParameter {
                field: field.to_string(),
            },
        }
    }
}

/// Final outcome of one traversal. Built once when the loop exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalResult {
    /// Reached the finish screen
    pub success: bool,
    /// Failure reason when `success` is false
    pub reason: Option<FailureReason>,
    /// Classification cycles run
    pub iterations: u32,
    /// Pages answered and submitted
    pub pages_submitted: u32,
    /// Questions left unanswered along the way
    pub warnings: Vec<String>,
    /// When the loop exited
    pub finished_at: DateTime<Utc>,
}

impl TraversalResult {
    /// Successful traversal.
    #[must_use]
    pub fn succeeded(iterations: u32, pages_submitted: u32, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            reason: None,
            iterations,
            pages_submitted,
            warnings,
            finished_at: Utc::now(),
        }
    }

    /// Failed traversal.
    #[must_use]
    pub fn failed(
        reason: FailureReason,
        iterations: u32,
        pages_submitted: u32,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            reason: Some(reason),
            iterations,
            pages_submitted,
            warnings,
            finished_at: Utc::now(),
        }
    }

    /// Failure before any navigation.
    #[must_use]
    pub fn rejected(reason: FailureReason) -> Self {
        Self::failed(reason, 0, 0, Vec::new())
    }

    /// Check if the traversal reached the finish screen
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Check if the traversal failed
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.success
    }
}
