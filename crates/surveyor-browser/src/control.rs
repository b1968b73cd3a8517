//! Interactive elements as seen by the traversal engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to one element on the current page.
///
/// A handle names the `index`-th match of `selector` at the time the page
/// was queried. It is re-resolved on every action, so a handle taken before
/// a navigation never silently targets an element on the next page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlHandle {
    selector: String,
    index: usize,
}

impl ControlHandle {
    /// Create a handle for the `index`-th match of `selector`.
    #[must_use]
    pub fn new(selector: impl Into<String>, index: usize) -> Self {
        Self {
            selector: selector.into(),
            index,
        }
    }

    /// Selector the handle was produced from.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Position within the selector's matches.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ControlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.selector, self.index)
    }
}

/// One interactive element (input, radio, checkbox, select) on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Driver-supplied handle
    pub handle: ControlHandle,
    /// Semantic value, e.g. the rating number `"5"`
    pub value: String,
    /// Question the control belongs to
    pub group: String,
    /// Visible label text
    pub label: String,
    /// Checkbox or radio state when the page was queried
    #[serde(default)]
    pub checked: bool,
}

impl Control {
    /// Create a control.
    #[must_use]
    pub fn new(
        handle: ControlHandle,
        value: impl Into<String>,
        group: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            handle,
            value: value.into(),
            group: group.into(),
            label: label.into(),
            checked: false,
        }
    }

    /// Set the checked state read from the page.
    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// Split a site element id of the form `<question>.<value>`.
///
/// The survey site names radio inputs like `R000005.5`; anything without a
/// dot is treated as a bare group name with no value.
#[must_use]
pub fn split_element_id(id: &str) -> (&str, Option<&str>) {
    match id.rsplit_once('.') {
        Some((group, value)) if !group.is_empty() && !value.is_empty() => (group, Some(value)),
        _ => (id, None),
    }
}
