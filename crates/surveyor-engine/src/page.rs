//! Page kinds recognised by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of the currently displayed survey page.
///
/// `Unknown` is a normal transient state (for instance mid-render) and is
/// handled by re-classifying after a delay, not by failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    /// Receipt time, store number and survey code form
    EntryForm,
    /// Grid of radio-button rating questions
    RatingGrid,
    /// Grid of checkbox questions
    CheckboxGrid,
    /// Final screen; nothing left to answer
    Terminal,
    /// No known marker present
    Unknown,
}

impl PageKind {
    /// Whether the page has controls to answer and submit.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::EntryForm | Self::RatingGrid | Self::CheckboxGrid)
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EntryForm => "entry-form",
            Self::RatingGrid => "rating-grid",
            Self::CheckboxGrid => "checkbox-grid",
            Self::Terminal => "terminal",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
