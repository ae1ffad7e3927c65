// Layered harness configuration
//
// Sources, lowest to highest precedence:
// 1. `webtestkit.toml` in the working directory (optional)
// 2. Process environment variables (BASE_URL, EXTENT_REPORT_MODE, ...)
//
// Loaded once per run and shared immutably (`Arc<HarnessConfig>`).

use crate::error::{Error, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default per-action timeout in milliseconds.
///
/// Matches the engine default used across browser automation tooling.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Resolved harness settings.
///
/// Every recognized setting is an explicit field here; the startup log
/// line serializes this struct directly (password redacted) instead of
/// discovering fields at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Base URL UI scenarios navigate to
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Base URL the REST client and login endpoint are bound to
    #[serde(default)]
    pub base_api_url: Option<Url>,
    /// Login account
    #[serde(default)]
    pub email: Option<String>,
    /// Login password; never logged
    #[serde(default)]
    pub password: Option<String>,
    /// Free-form environment label (e.g. "staging") shown in the report
    #[serde(default)]
    pub current_env: Option<String>,
    /// CI build number; combined with the branch for the report title
    #[serde(default)]
    pub build_number: Option<String>,
    /// CI branch name
    #[serde(default, rename = "buildbranch")]
    pub build_branch: Option<String>,
    /// Whether the HTML report is produced at all
    #[serde(default = "default_true", rename = "extent_report_mode")]
    pub report_mode: bool,
    /// Attach a screenshot to every UI step, not only failing ones
    #[serde(default, rename = "screenshot_on_eachstep")]
    pub screenshot_on_each_step: bool,
    /// Save browser console logs next to the report on failure.
    /// Produces one text file per failing scenario; keep off unless debugging.
    #[serde(default)]
    pub capture_browser_logs: bool,
    /// Launch browsers headless
    #[serde(default = "default_true")]
    pub headless: bool,
    /// Per-action deadline for element interactions and waits
    #[serde(default = "default_timeout_ms")]
    pub action_timeout_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            base_url: None,
            base_api_url: None,
            email: None,
            password: None,
            current_env: None,
            build_number: None,
            build_branch: None,
            report_mode: true,
            screenshot_on_each_step: false,
            capture_browser_logs: false,
            headless: true,
            action_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl HarnessConfig {
    /// Loads configuration from `webtestkit.toml` (optional) overlaid with
    /// the process environment.
    pub fn load() -> Result<Self> {
        Self::from_config(
            Config::builder()
                .add_source(File::with_name("webtestkit").required(false))
                .add_source(Environment::default())
                .build()?,
        )
    }

    fn from_config(config: Config) -> Result<Self> {
        Ok(config.try_deserialize()?)
    }

    /// Base URL for UI navigation, or `ConfigurationMissing`.
    pub fn require_base_url(&self) -> Result<&Url> {
        self.base_url
            .as_ref()
            .ok_or(Error::ConfigurationMissing { name: "BASE_URL" })
    }

    /// Base URL for the REST client, or `ConfigurationMissing`.
    pub fn require_base_api_url(&self) -> Result<&Url> {
        self.base_api_url
            .as_ref()
            .ok_or(Error::ConfigurationMissing { name: "BASE_API_URL" })
    }

    /// Login credentials, or `ConfigurationMissing` for the absent half.
    pub fn require_credentials(&self) -> Result<(&str, &str)> {
        let email = self
            .email
            .as_deref()
            .ok_or(Error::ConfigurationMissing { name: "EMAIL" })?;
        let password = self
            .password
            .as_deref()
            .ok_or(Error::ConfigurationMissing { name: "PASSWORD" })?;
        Ok((email, password))
    }

    /// Label identifying this run in the report header.
    ///
    /// `{BUILDBRANCH}_{BUILD_NUMBER}` on CI; the machine host name when no
    /// build number is set.
    pub fn build_label(&self) -> String {
        match &self.build_number {
            Some(number) => format!(
                "{}_{}",
                self.build_branch.as_deref().unwrap_or_default(),
                number
            ),
            None => hostname::get()
                .map(|h| h.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "localhost".to_owned()),
        }
    }

    /// Per-action deadline as a `Duration`.
    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    /// Logs the resolved settings once at run start, password redacted.
    pub fn log_startup(&self) {
        let mut redacted = self.clone();
        if redacted.password.is_some() {
            redacted.password = Some("********".to_owned());
        }
        match serde_json::to_string_pretty(&redacted) {
            Ok(dump) => tracing::info!(config = %dump, "resolved harness configuration"),
            Err(err) => tracing::warn!(%err, "could not serialize configuration for logging"),
        }
    }
}
