//! Applying answers and moving to the next page.

use crate::error::{EngineError, Result};
use crate::page::PageKind;
use crate::selector::Action;
use surveyor_browser::BrowserActions;
use surveyor_core::SelectorConfig;

/// Drives one "fill the page, submit, wait" transition.
///
/// Only one navigation is ever in flight: [`Navigator::advance`] returns
/// after the driver reports the next page has settled.
pub struct Navigator<'a, D: ?Sized> {
    driver: &'a D,
    selectors: &'a SelectorConfig,
    submit_grids: bool,
}

impl<'a, D> Navigator<'a, D>
where
    D: BrowserActions + ?Sized,
{
    /// Create a navigator over a driver and a site layout.
    pub fn new(driver: &'a D, selectors: &'a SelectorConfig, submit_grids: bool) -> Self {
        Self {
            driver,
            selectors,
            submit_grids,
        }
    }

    /// Apply every action in order, then advance.
    pub async fn apply_and_advance(&self, kind: PageKind, actions: &[Action]) -> Result<()> {
        self.apply(actions).await?;
        self.advance(kind).await
    }

    /// Apply actions in the order given.
    ///
    /// Stops at the first failure; a stale control surfaces as
    /// [`EngineError::ControlNotFound`] carrying its question group.
    pub async fn apply(&self, actions: &[Action]) -> Result<()> {
        for action in actions {
            match action {
                Action::Select { control, value } => {
                    tracing::debug!(group = %control.group, value = %value, "Selecting option");
                    self.driver.select(control, value).await?;
                }
                Action::Type { control, text } => {
                    tracing::debug!(group = %control.group, "Typing into field");
                    self.driver.type_text(control, text).await?;
                }
                Action::Click(control) => {
                    tracing::debug!(group = %control.group, value = %control.value, "Clicking control");
                    self.driver.click(control).await?;
                }
                Action::Check(control) => {
                    tracing::debug!(group = %control.group, label = %control.label, "Ticking checkbox");
                    self.driver.check(control).await?;
                }
            }
        }
        Ok(())
    }

    /// Submit the page and block until the next one has settled.
    ///
    /// The entry form always needs its next button. Grid pages use the next
    /// button when present (and `submit_grids` is set); otherwise the page
    /// is expected to advance on its own once answered.
    pub async fn advance(&self, kind: PageKind) -> Result<()> {
        let next = self.driver.query_selector(&self.selectors.next_button).await?;

        match (kind, next) {
            (PageKind::EntryForm, None) => {
                return Err(EngineError::ControlNotFound {
                    group: "next".to_string(),
                });
            }
            (PageKind::EntryForm, Some(next)) => {
                self.driver.click(&next).await?;
            }
            (_, Some(next)) if self.submit_grids => {
                self.driver.click(&next).await?;
            }
            _ => tracing::debug!(kind = %kind, "No submit control clicked, waiting for implicit advance"),
        }

        self.driver.wait_for_navigation().await?;
        tracing::debug!(kind = %kind, "Next page settled");
        Ok(())
    }
}
