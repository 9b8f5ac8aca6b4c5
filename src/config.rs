//! Run configuration
//!
//! Loaded from a YAML document; credentials and headless mode may be
//! overridden from the environment.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use action_flow::RetryPolicy;
use action_primitives::BrowserSettings;
use serde::{Deserialize, Serialize};
use tool_select_option::SelectPolicyView;

use crate::errors::ConfigError;
use crate::selectors::PageSelectors;

pub const ENV_USER: &str = "CATALOG_TAGGER_USER";
pub const ENV_PASSWORD: &str = "CATALOG_TAGGER_PASSWORD";
pub const ENV_HEADLESS: &str = "CATALOG_TAGGER_HEADLESS";

#[derive(Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// Entry point of the product panel
    pub url: String,
    pub url_login: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// Process at most this many records; unset means all
    #[serde(default)]
    pub process_items: Option<usize>,
    /// Carry on when a search matches more than one row
    #[serde(default)]
    pub process_multiple: bool,
    /// Save each record instead of discarding the changes
    #[serde(default)]
    pub save: bool,
    #[serde(default)]
    pub browser: BrowserSettings,
    #[serde(default)]
    pub timeouts: Timeouts,
    #[serde(default)]
    pub select: SelectPolicyView,
    #[serde(default = "RetryPolicy::row_match")]
    pub row_match: RetryPolicy,
    #[serde(default)]
    pub selectors: PageSelectors,
}

impl fmt::Debug for TaggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggerConfig")
            .field("url", &self.url)
            .field("url_login", &self.url_login)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("process_items", &self.process_items)
            .field("process_multiple", &self.process_multiple)
            .field("save", &self.save)
            .field("browser", &self.browser)
            .field("timeouts", &self.timeouts)
            .field("select", &self.select)
            .field("row_match", &self.row_match)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Bound of every wait not covered below
    pub default_wait_ms: u64,
    /// Wait for table rows on each row-match attempt
    pub row_query_ms: u64,
    /// Pause after typing into the search input
    pub search_settle_ms: u64,
    /// Poll period of the browser waits
    pub poll_interval_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            default_wait_ms: 10_000,
            row_query_ms: 5_000,
            search_settle_ms: 1_000,
            poll_interval_ms: 100,
        }
    }
}

impl Timeouts {
    pub fn default_wait(&self) -> Duration {
        Duration::from_millis(self.default_wait_ms)
    }

    pub fn row_query(&self) -> Duration {
        Duration::from_millis(self.row_query_ms)
    }

    pub fn search_settle(&self) -> Duration {
        Duration::from_millis(self.search_settle_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl TaggerConfig {
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(user) = lookup(ENV_USER) {
            self.user = user;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        if let Some(raw) = lookup(ENV_HEADLESS) {
            self.browser.headless = parse_flag(&raw).ok_or_else(|| {
                ConfigError::Invalid(format!("{} must be a boolean, got '{}'", ENV_HEADLESS, raw))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Invalid("url is empty".into()));
        }
        if self.url_login.trim().is_empty() {
            return Err(ConfigError::Invalid("url_login is empty".into()));
        }
        if self.user.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "user is empty; set it in the file or through {}",
                ENV_USER
            )));
        }
        Ok(())
    }

    /// Whether the record at 1-based `ordinal` is within `process_items`
    pub fn within_cap(&self, ordinal: usize) -> bool {
        self.process_items.map_or(true, |cap| ordinal <= cap)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
