//! Surveyor Engine - traversal of multi-page customer surveys.
//!
//! The survey presents its pages in an order that changes between runs, so
//! the engine never assumes a sequence. Each iteration it classifies the
//! current page, reads its controls, picks answers and submits, until the
//! finish screen appears or a budget runs out.
//!
//! # Architecture
//!
//! - **Validator** ([`validator`]): checks `HH:MM`, store id and survey code before any navigation
//! - **Classifier** ([`classifier`]): maps the current page to a [`PageKind`] by marker priority
//! - **Controls** ([`controls`]): reads the interactive elements for a page kind
//! - **Selector** ([`selector`]): answer policy per page kind, with a seedable RNG for checkboxes
//! - **Navigator** ([`navigator`]): applies actions, submits and waits for the next page
//! - **Traversal** ([`traversal`]): the state machine tying the above together
//! - **Result** ([`result`]): the single structured outcome of a run
//!
//! # Example
//!
//! ```rust,no_run
//! use surveyor_browser::BrowserEngine;
//! use surveyor_core::AppConfig;
//! use surveyor_engine::run_survey;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let engine = BrowserEngine::with_config(&config.browser).await?;
//!
//! let result = run_survey(&engine, &config, "13:24", "01541", "111122223333444").await;
//! println!("success: {}", result.is_success());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod classifier;
pub mod controls;
pub mod error;
pub mod navigator;
pub mod page;
pub mod result;
pub mod selector;
pub mod traversal;
pub mod validator;

// Re-export commonly used types
pub use classifier::classify;
pub use error::{EngineError, Result};
pub use navigator::Navigator;
pub use page::PageKind;
pub use result::{FailureReason, TraversalResult};
pub use selector::{Action, AnswerSelector, Selection};
pub use traversal::{run_survey, SurveyTraversal};
pub use validator::{validate, SurveyParameters, ValidatedParameters};
