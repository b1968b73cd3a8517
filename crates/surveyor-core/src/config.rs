//! Configuration management for Surveyor.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Element lookup strings live here rather
//! than in the engine so another survey-site layout only needs a new
//! `[selectors]` table.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/surveyor/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Survey site settings
    pub survey: SurveyConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Traversal loop budgets and answer policy
    pub traversal: TraversalConfig,
    /// Element lookup strings for the survey site
    pub selectors: SelectorConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SURVEYOR_HEADLESS`: Override browser headless mode (true/false)
    /// - `SURVEYOR_START_URL`: Override the survey landing page
    /// - `SURVEYOR_RNG_SEED`: Fix the checkbox sampling seed
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `SURVEYOR_*` environment overrides in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SURVEYOR_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("SURVEYOR_START_URL") {
            if !val.is_empty() {
                tracing::debug!("Override survey.start_url from env: {}", val);
                self.survey.start_url = val;
            }
        }

        if let Ok(val) = std::env::var("SURVEYOR_RNG_SEED") {
            if let Ok(seed) = val.parse() {
                self.traversal.rng_seed = Some(seed);
                tracing::debug!("Override traversal.rng_seed from env: {}", seed);
            }
        }
    }

    /// Check values that would make a traversal meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.survey.start_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "survey.start_url".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        if self.traversal.max_unknown_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "traversal.max_unknown_pages".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.traversal.control_retry_budget == 0 {
            return Err(ConfigError::InvalidValue {
                field: "traversal.control_retry_budget".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.traversal.max_checkbox_selections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "traversal.max_checkbox_selections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if let Err(e) = regex::Regex::new(&self.selectors.other_marker) {
            return Err(ConfigError::InvalidValue {
                field: "selectors.other_marker".to_string(),
                reason: e.to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/surveyor/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "surveyor", "surveyor").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Survey site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Landing page holding the entry form
    pub start_url: String,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            start_url: "https://www.dgcustomerfirst.com/".to_string(),
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 30,
        }
    }
}

/// Traversal loop budgets and answer policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Consecutive `Unknown` classifications tolerated before giving up
    pub max_unknown_pages: u32,
    /// Delay before re-classifying an `Unknown` page, in milliseconds
    pub unknown_retry_delay_ms: u64,
    /// Attempts per page when a control disappears underneath us
    pub control_retry_budget: u32,
    /// Pages submitted before the traversal is considered runaway
    pub max_pages: u32,
    /// Value of the "highly satisfied" rating control
    pub max_rating: String,
    /// Value of the "yes" control on binary questions
    pub affirmative_value: String,
    /// Upper bound on boxes ticked per checkbox question
    pub max_checkbox_selections: usize,
    /// Fixed seed for checkbox sampling; unseeded when absent
    pub rng_seed: Option<u64>,
    /// Click the next button after answering a grid page
    pub submit_grids: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_unknown_pages: 5,
            unknown_retry_delay_ms: 500,
            control_retry_budget: 3,
            max_pages: 50,
            max_rating: "5".to_string(),
            affirmative_value: "1".to_string(),
            max_checkbox_selections: 6,
            rng_seed: None,
            submit_grids: true,
        }
    }
}

/// Element lookup strings for one survey-site layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Hour `<select>` on the entry form
    pub entry_hour: String,
    /// Minute `<select>` on the entry form
    pub entry_minute: String,
    /// Store number input on the entry form
    pub entry_store_number: String,
    /// Survey code input on the entry form
    pub entry_survey_code: String,
    /// Submit/next button shared by every page
    pub next_button: String,
    /// Container present only on rating-grid pages
    pub rating_grid: String,
    /// Radio inputs inside the rating grid
    pub rating_controls: String,
    /// Container present only on checkbox-grid pages
    pub checkbox_grid: String,
    /// Checkbox inputs inside the checkbox grid
    pub checkbox_controls: String,
    /// Element present only on the final screen
    pub finish: String,
    /// Regex matched against checkbox labels that need free text
    pub other_marker: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            entry_hour: "#InputHour".to_string(),
            entry_minute: "#InputMinute".to_string(),
            entry_store_number: "#InputStoreNum".to_string(),
            entry_survey_code: "#CN1".to_string(),
            next_button: "#NextButton".to_string(),
            rating_grid: "#surveyQuestions > table > tbody".to_string(),
            rating_controls: "#surveyQuestions > table > tbody input".to_string(),
            checkbox_grid: "#surveyQuestions > fieldset > div > div".to_string(),
            checkbox_controls: "#surveyQuestions > fieldset > div > div input".to_string(),
            finish: "#finishIncentive".to_string(),
            other_marker: r"(?i)\bother\b".to_string(),
        }
    }
}
