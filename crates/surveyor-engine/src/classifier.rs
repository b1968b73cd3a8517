//! Page classification by marker priority.
//!
//! Markers are checked in a fixed order: finish screen, rating grid,
//! checkbox grid, entry form. During a render transition a page can carry
//! more than one marker; the finish marker always wins so nothing is ever
//! clicked on a page that is already done.

use crate::page::PageKind;
use surveyor_browser::{BrowserActions, Result};
use surveyor_core::SelectorConfig;

/// Classify the page currently loaded in the driver.
///
/// Depends only on which selectors match; holds no state between calls.
pub async fn classify<D>(driver: &D, selectors: &SelectorConfig) -> Result<PageKind>
where
    D: BrowserActions + ?Sized,
{
    if present(driver, &selectors.finish).await? {
        return Ok(PageKind::Terminal);
    }

    if present(driver, &selectors.rating_grid).await? {
        return Ok(PageKind::RatingGrid);
    }

    if present(driver, &selectors.checkbox_grid).await? {
        return Ok(PageKind::CheckboxGrid);
    }

    // The survey code field can render after the others, so the hour and
    // store fields are enough to recognise the form.
    if present(driver, &selectors.entry_hour).await?
        && present(driver, &selectors.entry_store_number).await?
    {
        return Ok(PageKind::EntryForm);
    }

    Ok(PageKind::Unknown)
}

async fn present<D>(driver: &D, selector: &str) -> Result<bool>
where
    D: BrowserActions + ?Sized,
{
    Ok(driver.query_selector(selector).await?.is_some())
}
