//! Browser driver for survey pages.
//!
//! Defines the [`BrowserActions`] interface the traversal engine drives and a
//! Chromium-backed [`BrowserEngine`] implementing it. The engine treats every
//! page as an opaque document: it answers structural queries and applies
//! clicks, keystrokes and option selections against [`Control`] handles.

pub mod actions;
pub mod control;
pub mod engine;
pub mod error;

pub use actions::BrowserActions;
pub use control::{Control, ControlHandle};
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
