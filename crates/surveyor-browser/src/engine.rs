use crate::actions::{extract_domain, BrowserActions};
use crate::control::{split_element_id, Control, ControlHandle};
use crate::error::{BrowserError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig as ChromiumConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures_util::stream::StreamExt;
use std::time::Duration;
use surveyor_core::BrowserConfig;

/// Resolves the visible label of an input, falling back to aria-label and id.
const LABEL_JS: &str = r"function() {
    const label = this.labels && this.labels.length ? this.labels[0].innerText : '';
    return (label || this.getAttribute('aria-label') || this.id || '').trim();
}";

const CHECKED_JS: &str = "function() { return this.checked === true; }";

/// Clicking toggles a checkbox, so only click when it is not yet ticked.
const CHECK_JS: &str = "function() { if (!this.checked) { this.click(); } }";

/// Browser automation engine driving a single Chromium page
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
    navigation_timeout: Duration,
}

impl BrowserEngine {
    /// Create a new browser engine with default configuration
    pub async fn new() -> Result<Self> {
        Self::with_config(&BrowserConfig::default()).await
    }

    /// Create a new browser engine from the `[browser]` config section
    pub async fn with_config(config: &BrowserConfig) -> Result<Self> {
        let navigation_timeout = Duration::from_secs(config.navigation_timeout_secs);

        let mut builder = ChromiumConfig::builder()
            .no_sandbox()
            .window_size(config.window_width, config.window_height)
            .request_timeout(navigation_timeout);
        if !config.headless {
            builder = builder.with_head();
        }
        let chromium_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(chromium_config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Spawn browser handler
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Chromium handler event error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        tracing::debug!(headless = config.headless, "Browser engine started");

        Ok(Self {
            browser,
            page,
            navigation_timeout,
        })
    }

    /// Close the browser process
    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn resolve(&self, control: &Control) -> Result<Element> {
        let handle = &control.handle;
        // No match is an empty list; an error means the page itself is gone.
        let elements = self
            .page
            .find_elements(handle.selector())
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        elements
            .into_iter()
            .nth(handle.index())
            .ok_or_else(|| BrowserError::ControlNotFound {
                group: control.group.clone(),
                selector: handle.to_string(),
            })
    }

    async fn describe(&self, element: &Element, selector: &str, index: usize) -> Result<Control> {
        let id = attribute(element, "id").await?.unwrap_or_default();
        let value_attr = attribute(element, "value").await?;
        let name = attribute(element, "name").await?;

        let (id_group, id_value) = split_element_id(&id);

        // Site ids encode `<question>.<value>`; prefer that over the raw attribute.
        let value = id_value
            .map(str::to_string)
            .or(value_attr)
            .unwrap_or_default();
        let group = name
            .filter(|n| !n.is_empty())
            .or_else(|| (!id_group.is_empty()).then(|| id_group.to_string()))
            .unwrap_or_else(|| selector.to_string());

        let label = element
            .call_js_fn(LABEL_JS, false)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?
            .result
            .value
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let checked = element
            .call_js_fn(CHECKED_JS, false)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?
            .result
            .value
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        Ok(Control::new(ControlHandle::new(selector, index), value, group, label)
            .with_checked(checked))
    }
}

async fn attribute(element: &Element, name: &str) -> Result<Option<String>> {
    element
        .attribute(name)
        .await
        .map_err(|e| BrowserError::ChromiumError(e.to_string()))
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        let domain = extract_domain(url).unwrap_or_else(|_| "-".to_string());
        tracing::info!(domain = %domain, "Navigating to {}", url);

        tokio::time::timeout(self.navigation_timeout, self.page.goto(url))
            .await
            .map_err(|_| BrowserError::Timeout(format!("loading {url}")))?
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
        Ok(())
    }

    async fn query_selector(&self, selector: &str) -> Result<Option<Control>> {
        match self.page.find_element(selector).await {
            Ok(element) => Ok(Some(self.describe(&element, selector, 0).await?)),
            Err(e) => {
                tracing::trace!("No match for {}: {}", selector, e);
                Ok(None)
            }
        }
    }

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Control>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let mut controls = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            controls.push(self.describe(element, selector, index).await?);
        }
        Ok(controls)
    }

    async fn click(&self, control: &Control) -> Result<()> {
        let element = self.resolve(control).await?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn check(&self, control: &Control) -> Result<()> {
        let element = self.resolve(control).await?;
        element
            .call_js_fn(CHECK_JS, false)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn type_text(&self, control: &Control, text: &str) -> Result<()> {
        let element = self.resolve(control).await?;
        // A retried page must not append to earlier input.
        element
            .call_js_fn("function() { this.value = ''; }", false)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?
            .type_str(text)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn select(&self, control: &Control, value: &str) -> Result<()> {
        let element = self.resolve(control).await?;
        let literal =
            serde_json::to_string(value).map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        let js = format!(
            "function() {{ this.value = {literal}; \
             this.dispatchEvent(new Event('change', {{ bubbles: true }})); }}"
        );
        element
            .call_js_fn(js, false)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn wait_for_navigation(&self) -> Result<()> {
        tokio::time::timeout(self.navigation_timeout, self.page.wait_for_navigation())
            .await
            .map_err(|_| BrowserError::Timeout("waiting for next page".to_string()))?
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
        Ok(())
    }
}
