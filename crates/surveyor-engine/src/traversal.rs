//! The traversal loop.
//!
//! An explicit state machine replaces ad-hoc polling:
//!
//! ```text
//! Start -> Classifying -> Acting -> Advancing -> Classifying -> ... -> Terminal
//!               |  ^         |
//!        Unknown|  |retry    | ControlNotFound (within budget)
//!               +--+         +--------------> Classifying
//! ```
//!
//! `Terminal` and `Failed` are absorbing. Every exit produces exactly one
//! [`TraversalResult`]; nothing is thrown past [`SurveyTraversal::run`].

use crate::classifier::classify;
use crate::controls::extract_controls;
use crate::error::EngineError;
use crate::navigator::Navigator;
use crate::page::PageKind;
use crate::result::{FailureReason, TraversalResult};
use crate::selector::AnswerSelector;
use crate::validator::{validate, SurveyParameters, ValidatedParameters};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Duration;
use surveyor_browser::BrowserActions;
use surveyor_core::AppConfig;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Loop states.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TraversalState {
    Start,
    Classifying,
    Acting(PageKind),
    Advancing(PageKind),
    Terminal,
    Failed(FailureReason),
}

/// Counters owned by the loop for the duration of one traversal.
#[derive(Debug, Default)]
struct Progress {
    iterations: u32,
    consecutive_unknown: u32,
    control_failures: u32,
    pages_submitted: u32,
    warnings: Vec<String>,
}

/// One survey run over a driver.
pub struct SurveyTraversal<'a, D: ?Sized> {
    driver: &'a D,
    config: &'a AppConfig,
    rng: Box<dyn RngCore + Send>,
    cancel: CancellationToken,
}

impl<'a, D> SurveyTraversal<'a, D>
where
    D: BrowserActions + ?Sized,
{
    /// Create a traversal. Checkbox sampling is seeded from
    /// `traversal.rng_seed` when set, otherwise from OS entropy.
    pub fn new(driver: &'a D, config: &'a AppConfig) -> Self {
        let rng = match config.traversal.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            driver,
            config,
            rng: Box::new(rng),
            cancel: CancellationToken::new(),
        }
    }

    /// Use a specific random source for checkbox sampling.
    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Use a caller-owned cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that cancels this traversal at the next iteration boundary.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Validate parameters, then drive the survey to completion.
    pub async fn run(mut self, params: &SurveyParameters) -> TraversalResult {
        let validated = match validate(params) {
            Ok(validated) => validated,
            Err(e) => {
                tracing::error!("Rejecting survey parameters: {}", e);
                return TraversalResult::rejected(e.into());
            }
        };

        let selector =
            match AnswerSelector::from_config(&self.config.traversal, &self.config.selectors) {
                Ok(selector) => selector,
                Err(e) => {
                    tracing::error!("Invalid answer policy: {}", e);
                    return TraversalResult::rejected(FailureReason::InvalidConfig {
                        message: e.to_string(),
                    });
                }
            };

        let span = tracing::info_span!(
            "traversal",
            run_id = %uuid::Uuid::new_v4(),
            store_id = %validated.store_id
        );
        self.drive(&validated, &selector).instrument(span).await
    }

    async fn drive(
        &mut self,
        params: &ValidatedParameters,
        selector: &AnswerSelector,
    ) -> TraversalResult {
        let config = self.config;
        let settings = &config.traversal;
        let navigator = Navigator::new(self.driver, &config.selectors, settings.submit_grids);
        let mut progress = Progress::default();
        let mut state = TraversalState::Start;

        loop {
            state = match state {
                TraversalState::Start if self.cancel.is_cancelled() => {
                    TraversalState::Failed(FailureReason::Cancelled)
                }
                TraversalState::Start => {
                    match self.driver.navigate(&config.survey.start_url).await {
                        Ok(()) => TraversalState::Classifying,
                        Err(e) => TraversalState::Failed(FailureReason::NavigationError {
                            message: e.to_string(),
                        }),
                    }
                }

                TraversalState::Classifying => self.classify_step(&mut progress).await,

                TraversalState::Acting(kind) => {
                    let result = self.act(kind, params, selector, &navigator, &mut progress).await;
                    match result {
                        Ok(()) => TraversalState::Advancing(kind),
                        Err(e) => self.recover(e, &mut progress),
                    }
                }

                TraversalState::Advancing(kind) => match navigator.advance(kind).await {
                    Ok(()) => {
                        progress.pages_submitted += 1;
                        progress.control_failures = 0;
                        tracing::info!(kind = %kind, pages = progress.pages_submitted, "Page submitted");

                        if progress.pages_submitted >= settings.max_pages {
                            TraversalState::Failed(FailureReason::PageLimitExceeded {
                                pages: progress.pages_submitted,
                            })
                        } else {
                            TraversalState::Classifying
                        }
                    }
                    Err(e) => self.recover(e, &mut progress),
                },

                TraversalState::Terminal => {
                    tracing::info!(
                        iterations = progress.iterations,
                        pages = progress.pages_submitted,
                        "Survey finished"
                    );
                    return TraversalResult::succeeded(
                        progress.iterations,
                        progress.pages_submitted,
                        progress.warnings,
                    );
                }

                TraversalState::Failed(reason) => {
                    tracing::error!(iterations = progress.iterations, "Traversal failed: {}", reason);
                    return TraversalResult::failed(
                        reason,
                        progress.iterations,
                        progress.pages_submitted,
                        progress.warnings,
                    );
                }
            };
        }
    }

    async fn classify_step(&self, progress: &mut Progress) -> TraversalState {
        if self.cancel.is_cancelled() {
            return TraversalState::Failed(FailureReason::Cancelled);
        }

        progress.iterations += 1;
        let kind = match classify(self.driver, &self.config.selectors).await {
            Ok(kind) => kind,
            Err(e) => {
                return TraversalState::Failed(FailureReason::NavigationError {
                    message: e.to_string(),
                })
            }
        };
        tracing::debug!(iteration = progress.iterations, kind = %kind, "Classified page");

        if kind == PageKind::Terminal {
            return TraversalState::Terminal;
        }
        if kind.is_actionable() {
            progress.consecutive_unknown = 0;
            return TraversalState::Acting(kind);
        }

        progress.consecutive_unknown += 1;
        let budget = self.config.traversal.max_unknown_pages;
        if progress.consecutive_unknown >= budget {
            return TraversalState::Failed(FailureReason::StuckOnUnknownPage {
                attempts: progress.consecutive_unknown,
            });
        }

        tracing::debug!(
            attempt = progress.consecutive_unknown,
            budget,
            "Unrecognised page, waiting before re-classifying"
        );
        let delay = Duration::from_millis(self.config.traversal.unknown_retry_delay_ms);
        tokio::select! {
            () = tokio::time::sleep(delay) => TraversalState::Classifying,
            () = self.cancel.cancelled() => TraversalState::Failed(FailureReason::Cancelled),
        }
    }

    async fn act(
        &mut self,
        kind: PageKind,
        params: &ValidatedParameters,
        selector: &AnswerSelector,
        navigator: &Navigator<'_, D>,
        progress: &mut Progress,
    ) -> Result<(), EngineError> {
        let controls = extract_controls(self.driver, kind, &self.config.selectors).await?;
        let selection = selector.select_actions(kind, &controls, params, &mut *self.rng);

        tracing::debug!(
            kind = %kind,
            controls = controls.len(),
            actions = selection.actions.len(),
            "Answering page"
        );
        navigator.apply(&selection.actions).await?;

        // Only record warnings once the page has actually been answered.
        progress.warnings.extend(selection.warnings);
        Ok(())
    }

    /// Decide whether a failed action or advance is retried.
    fn recover(&self, err: EngineError, progress: &mut Progress) -> TraversalState {
        match err {
            EngineError::ControlNotFound { group } => {
                progress.control_failures += 1;
                let budget = self.config.traversal.control_retry_budget;
                if progress.control_failures >= budget {
                    TraversalState::Failed(FailureReason::ControlNotFound { group })
                } else {
                    tracing::warn!(
                        group = %group,
                        attempt = progress.control_failures,
                        budget,
                        "Control not found, re-classifying page"
                    );
                    TraversalState::Classifying
                }
            }
            EngineError::Navigation(message) => {
                TraversalState::Failed(FailureReason::NavigationError { message })
            }
        }
    }
}

/// Run a complete survey traversal with the given configuration.
///
/// Parameters are validated before the driver is touched; an invalid
/// parameter returns a failed result without any navigation.
pub async fn run_survey<D>(
    driver: &D,
    config: &AppConfig,
    time_of_day: &str,
    store_id: &str,
    survey_code: &str,
) -> TraversalResult
where
    D: BrowserActions + ?Sized,
{
    let params = SurveyParameters::new(time_of_day, store_id, survey_code);
    SurveyTraversal::new(driver, config).run(&params).await
}
