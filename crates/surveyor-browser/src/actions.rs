use crate::control::Control;
use crate::error::{BrowserError, Result};

/// Browser actions the traversal engine relies on.
///
/// Queries report absence as `None` or an empty list, never as an error.
/// Actions fail with [`BrowserError::ControlNotFound`] when a handle no
/// longer resolves on the current page.
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL and wait for the load to complete
    async fn navigate(&self, url: &str) -> Result<()>;

    /// First element matching the selector, if any
    async fn query_selector(&self, selector: &str) -> Result<Option<Control>>;

    /// Every element matching the selector, in document order
    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Control>>;

    /// Click a control
    async fn click(&self, control: &Control) -> Result<()>;

    /// Tick a checkbox. Leaves an already ticked box as it is.
    async fn check(&self, control: &Control) -> Result<()>;

    /// Focus a control and type text into it
    async fn type_text(&self, control: &Control, text: &str) -> Result<()>;

    /// Choose an option of a `<select>` control by value
    async fn select(&self, control: &Control, value: &str) -> Result<()>;

    /// Wait for the next page load to settle
    async fn wait_for_navigation(&self) -> Result<()>;
}

/// Helper to extract domain from URL
pub fn extract_domain(url: &str) -> Result<String> {
    let url = url::Url::parse(url)
        .map_err(|e| BrowserError::NavigationError(format!("Invalid URL: {}", e)))?;

    url.host_str()
        .ok_or_else(|| BrowserError::NavigationError("No host in URL".to_string()))
        .map(|s| s.to_string())
}
