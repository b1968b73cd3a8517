//! Reading the interactive controls of a classified page.
//!
//! Controls are read fresh every iteration; a page load replaces the whole
//! document, so nothing here is cached.

use crate::error::{EngineError, Result};
use crate::page::PageKind;
use surveyor_browser::{BrowserActions, Control};
use surveyor_core::SelectorConfig;

/// Entry-form group for the hour select.
pub const HOUR_FIELD: &str = "hour";
/// Entry-form group for the minute select.
pub const MINUTE_FIELD: &str = "minute";
/// Entry-form group for the store number input.
pub const STORE_FIELD: &str = "store_id";
/// Entry-form group for the survey code input.
pub const CODE_FIELD: &str = "survey_code";

/// Read the controls relevant to `kind` from the current page.
///
/// Entry-form controls are relabelled with their field group
/// ([`HOUR_FIELD`] and friends). A missing entry field is reported as
/// [`EngineError::ControlNotFound`] so the traversal can retry once the page
/// settles.
pub async fn extract_controls<D>(
    driver: &D,
    kind: PageKind,
    selectors: &SelectorConfig,
) -> Result<Vec<Control>>
where
    D: BrowserActions + ?Sized,
{
    match kind {
        PageKind::EntryForm => {
            let fields = [
                (HOUR_FIELD, &selectors.entry_hour),
                (MINUTE_FIELD, &selectors.entry_minute),
                (STORE_FIELD, &selectors.entry_store_number),
                (CODE_FIELD, &selectors.entry_survey_code),
            ];

            let mut controls = Vec::with_capacity(fields.len());
            for (field, selector) in fields {
                let mut control = driver.query_selector(selector).await?.ok_or_else(|| {
                    EngineError::ControlNotFound {
                        group: field.to_string(),
                    }
                })?;
                control.group = field.to_string();
                controls.push(control);
            }
            Ok(controls)
        }
        PageKind::RatingGrid => Ok(driver.query_selector_all(&selectors.rating_controls).await?),
        PageKind::CheckboxGrid => Ok(driver
            .query_selector_all(&selectors.checkbox_controls)
            .await?),
        PageKind::Terminal | PageKind::Unknown => Ok(Vec::new()),
    }
}
