//! Answer selection policy.
//!
//! Given a page kind and its controls, decide what to click, select or type.
//! Entry-form and rating-grid choices are fully deterministic. Checkbox
//! choices are sampled from an injected RNG so a fixed seed reproduces the
//! exact same answers.

use crate::controls::{CODE_FIELD, HOUR_FIELD, MINUTE_FIELD, STORE_FIELD};
use crate::page::PageKind;
use crate::validator::ValidatedParameters;
use rand::Rng;
use regex::Regex;
use surveyor_browser::Control;
use surveyor_core::{SelectorConfig, TraversalConfig};

/// One action to apply to the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Choose an option of a select control
    Select {
        /// Target select
        control: Control,
        /// Option value
        value: String,
    },
    /// Type text into an input
    Type {
        /// Target input
        control: Control,
        /// Text to enter
        text: String,
    },
    /// Click a radio or button
    Click(Control),
    /// Tick a checkbox; a box that is already ticked stays ticked
    Check(Control),
}

impl Action {
    /// Control the action targets.
    #[must_use]
    pub fn control(&self) -> &Control {
        match self {
            Self::Select { control, .. }
            | Self::Type { control, .. }
            | Self::Click(control)
            | Self::Check(control) => control,
        }
    }
}

/// Ordered actions for one page plus any non-fatal notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Actions in the order they must be applied
    pub actions: Vec<Action>,
    /// Question groups left unanswered and why
    pub warnings: Vec<String>,
}

/// Per-kind answer policy.
#[derive(Debug, Clone)]
pub struct AnswerSelector {
    max_rating: String,
    affirmative_value: String,
    max_checkbox_selections: usize,
    other_marker: Regex,
}

impl AnswerSelector {
    /// Build the policy from the `[traversal]` and `[selectors]` sections.
    pub fn from_config(
        traversal: &TraversalConfig,
        selectors: &SelectorConfig,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            max_rating: traversal.max_rating.clone(),
            affirmative_value: traversal.affirmative_value.clone(),
            max_checkbox_selections: traversal.max_checkbox_selections.max(1),
            other_marker: Regex::new(&selectors.other_marker)?,
        })
    }

    /// Decide the actions for a page.
    ///
    /// `Terminal` and `Unknown` pages always yield no actions.
    pub fn select_actions<R>(
        &self,
        kind: PageKind,
        controls: &[Control],
        params: &ValidatedParameters,
        rng: &mut R,
    ) -> Selection
    where
        R: Rng + ?Sized,
    {
        match kind {
            PageKind::EntryForm => Self::entry_form(controls, params),
            PageKind::RatingGrid => self.rating_grid(controls),
            PageKind::CheckboxGrid => self.checkbox_grid(controls, rng),
            PageKind::Terminal | PageKind::Unknown => Selection::default(),
        }
    }

    /// Hour, minute, store id, survey code, in that order.
    fn entry_form(controls: &[Control], params: &ValidatedParameters) -> Selection {
        let field = |name: &str| controls.iter().find(|c| c.group == name).cloned();
        let mut selection = Selection::default();

        if let Some(control) = field(HOUR_FIELD) {
            selection.actions.push(Action::Select {
                control,
                value: params.time_of_day.hour_value(),
            });
        }
        if let Some(control) = field(MINUTE_FIELD) {
            selection.actions.push(Action::Select {
                control,
                value: params.time_of_day.minute_value(),
            });
        }
        if let Some(control) = field(STORE_FIELD) {
            selection.actions.push(Action::Type {
                control,
                text: params.store_id.as_str().to_string(),
            });
        }
        if let Some(control) = field(CODE_FIELD) {
            selection.actions.push(Action::Type {
                control,
                text: params.survey_code.as_str().to_string(),
            });
        }

        selection
    }

    /// Highest rating per question, "yes" on binary questions.
    fn rating_grid(&self, controls: &[Control]) -> Selection {
        let mut selection = Selection::default();

        for (group, members) in group_controls(controls) {
            let choice = members
                .iter()
                .find(|c| c.value == self.max_rating)
                .or_else(|| members.iter().find(|c| c.value == self.affirmative_value));

            match choice {
                Some(control) => selection.actions.push(Action::Click((*control).clone())),
                None => {
                    tracing::warn!(group = %group, "No preferred rating available, leaving unanswered");
                    selection
                        .warnings
                        .push(format!("rating question {group} left unanswered"));
                }
            }
        }

        selection
    }

    /// A random, non-empty subset of each question's options, never "other".
    fn checkbox_grid<R>(&self, controls: &[Control], rng: &mut R) -> Selection
    where
        R: Rng + ?Sized,
    {
        let mut selection = Selection::default();

        for (group, members) in group_controls(controls) {
            let candidates: Vec<&Control> = members
                .into_iter()
                .filter(|c| !self.other_marker.is_match(&c.label))
                .collect();

            // A retried page keeps what an earlier attempt already ticked.
            if candidates.iter().any(|c| c.checked) {
                tracing::debug!(group = %group, "Checkbox question already answered");
                continue;
            }

            if candidates.is_empty() {
                tracing::warn!(group = %group, "Only free-text options, leaving unanswered");
                selection
                    .warnings
                    .push(format!("checkbox question {group} has no selectable options"));
                continue;
            }

            let upper = candidates.len().min(self.max_checkbox_selections);
            let count = rng.gen_range(1..=upper);
            let mut picked = rand::seq::index::sample(&mut *rng, candidates.len(), count).into_vec();
            picked.sort_unstable();

            tracing::debug!(group = %group, count, of = candidates.len(), "Sampled checkbox answers");
            selection
                .actions
                .extend(picked.into_iter().map(|i| Action::Check(candidates[i].clone())));
        }

        selection
    }
}

/// Group controls by question, keeping first-appearance order.
fn group_controls(controls: &[Control]) -> Vec<(&str, Vec<&Control>)> {
    let mut groups: Vec<(&str, Vec<&Control>)> = Vec::new();
    for control in controls {
        match groups.iter_mut().find(|(g, _)| *g == control.group) {
            Some((_, members)) => members.push(control),
            None => groups.push((control.group.as_str(), vec![control])),
        }
    }
    groups
}
