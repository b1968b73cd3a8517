//! Input validation for a traversal.
//!
//! Runs every check before the driver is touched; a failure here means no
//! page is ever loaded.

use serde::{Deserialize, Serialize};
use surveyor_core::{StoreId, SurveyCode, TimeOfDay, ValidationError};

/// Raw caller-supplied parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyParameters {
    /// Receipt time as `HH:MM`
    pub time_of_day: String,
    /// Store number, leading zeros included
    pub store_id: String,
    /// Survey code from the receipt
    pub survey_code: String,
}

impl SurveyParameters {
    /// Bundle raw parameters.
    #[must_use]
    pub fn new(
        time_of_day: impl Into<String>,
        store_id: impl Into<String>,
        survey_code: impl Into<String>,
    ) -> Self {
        Self {
            time_of_day: time_of_day.into(),
            store_id: store_id.into(),
            survey_code: survey_code.into(),
        }
    }
}

/// Parameters that passed [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedParameters {
    /// Parsed receipt time
    pub time_of_day: TimeOfDay,
    /// Store number
    pub store_id: StoreId,
    /// Survey code
    pub survey_code: SurveyCode,
}

/// Validate caller input.
///
/// Time is checked first (pattern, hour, minute), then presence of the store
/// id and survey code.
pub fn validate(params: &SurveyParameters) -> Result<ValidatedParameters, ValidationError> {
    let time_of_day = params.time_of_day.parse::<TimeOfDay>()?;
    let store_id = StoreId::new(params.store_id.as_str())?;
    let survey_code = SurveyCode::new(params.survey_code.as_str())?;

    Ok(ValidatedParameters {
        time_of_day,
        store_id,
        survey_code,
    })
}
