//! Validated survey parameter types.
//!
//! These newtypes are the only way the traversal engine receives caller
//! input, so holding one means the corresponding check already passed.

use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Time of the visit printed on the receipt, as entered on the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Hour component (0-23).
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute component (0-59).
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Hour as the two-digit option value used by the entry form.
    #[must_use]
    pub fn hour_value(&self) -> String {
        format!("{:02}", self.hour)
    }

    /// Minute as the two-digit option value used by the entry form.
    #[must_use]
    pub fn minute_value(&self) -> String {
        format!("{:02}", self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Parse a strict `HH:MM` string.
    ///
    /// The pattern is checked first, then the hour range, then the minute
    /// range, so each input maps to exactly one error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static TIME_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = TIME_REGEX
            .get_or_init(|| Regex::new(r"^(\d{2}):(\d{2})$").expect("valid regex"));

        let caps = regex
            .captures(s)
            .ok_or_else(|| ValidationError::MalformedTime(s.to_string()))?;

        // Two ASCII digits always fit in a u8.
        let hour: u8 = caps[1]
            .parse()
            .map_err(|_| ValidationError::MalformedTime(s.to_string()))?;
        let minute: u8 = caps[2]
            .parse()
            .map_err(|_| ValidationError::MalformedTime(s.to_string()))?;

        if hour > 23 {
            return Err(ValidationError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ValidationError::MinuteOutOfRange(minute));
        }

        Ok(Self { hour, minute })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Store number from the receipt. Leading zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(String);

impl StoreId {
    /// Create a new `StoreId`.
    ///
    /// # Errors
    /// Returns error if the value is empty. The content is otherwise opaque;
    /// the survey site rejects malformed numbers itself.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::MissingParameter { field: "store_id" });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Survey code printed on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurveyCode(String);

impl SurveyCode {
    /// Create a new `SurveyCode`.
    ///
    /// # Errors
    /// Returns error if the value is empty.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(ValidationError::MissingParameter {
                field: "survey_code",
            });
        }
        Ok(Self(code))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurveyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
