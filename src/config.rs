//! Configuration for the generation oracle and lifecycle policy.
//!
//! Values are read from environment variables. Every loader also accepts a
//! lookup closure so callers (and tests) can supply values without touching
//! the process environment.

use std::fmt;
use thiserror::Error;

/// Environment variable holding the oracle API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable overriding the oracle model name.
pub const MODEL_VAR: &str = "GEMINI_MODEL";
/// Environment variable overriding the oracle API base URL.
pub const BASE_URL_VAR: &str = "GEMINI_API_BASE_URL";
/// Environment variable overriding the minimum requestable hours.
pub const MIN_HOURS_VAR: &str = "SKILLQUEST_MIN_REQUESTED_HOURS";
/// Environment variable overriding the auto-completion score threshold.
pub const COMPLETION_THRESHOLD_VAR: &str = "SKILLQUEST_COMPLETION_THRESHOLD";

/// Default oracle model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Default oracle API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The oracle API key is missing or blank.
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    /// A configuration value could not be parsed or is out of range.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Connection settings for the generation oracle.
///
/// Constructed once at process start and shared by every request.
#[derive(Clone, PartialEq, Eq)]
pub struct OracleConfig {
    api_key: String,
    model: String,
    base_url: String,
}

impl OracleConfig {
    /// Creates a configuration with the default model and base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = api_key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            api_key: key.trim().to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        })
    }

    /// Loads configuration from the process environment.
    ///
    /// | Env Var               | Default                                     |
    /// |-----------------------|---------------------------------------------|
    /// | `GEMINI_API_KEY`      | required                                    |
    /// | `GEMINI_MODEL`        | `gemini-1.5-flash`                          |
    /// | `GEMINI_API_BASE_URL` | `https://generativelanguage.googleapis.com` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when no key is configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when no key is configured.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key)?;
        if let Some(model) = non_blank(lookup(MODEL_VAR)) {
            config = config.with_model(model);
        }
        if let Some(base_url) = non_blank(lookup(BASE_URL_VAR)) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Overrides the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the API base URL. A trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        self.base_url = url.trim_end_matches('/').to_owned();
        self
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the API base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Tunable rules applied by the task lifecycle service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecyclePolicy {
    /// Smallest number of hours a user may request for a task.
    pub min_requested_hours: f64,
    /// Analysis scores strictly above this value complete the task.
    pub completion_threshold: f64,
}

impl LifecyclePolicy {
    /// Default minimum requestable hours.
    pub const DEFAULT_MIN_REQUESTED_HOURS: f64 = 1.0;
    /// Default auto-completion threshold.
    pub const DEFAULT_COMPLETION_THRESHOLD: f64 = 80.0;

    /// Loads the policy from the process environment, falling back to
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable or out-of-range
    /// values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the policy through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable or out-of-range
    /// values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut policy = Self::default();
        if let Some(raw) = non_blank(lookup(MIN_HOURS_VAR)) {
            let hours = parse_number(MIN_HOURS_VAR, &raw)?;
            if hours <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: MIN_HOURS_VAR,
                    value: raw,
                    reason: "must be greater than zero",
                });
            }
            policy.min_requested_hours = hours;
        }
        if let Some(raw) = non_blank(lookup(COMPLETION_THRESHOLD_VAR)) {
            let threshold = parse_number(COMPLETION_THRESHOLD_VAR, &raw)?;
            if !(0.0..=100.0).contains(&threshold) {
                return Err(ConfigError::InvalidValue {
                    key: COMPLETION_THRESHOLD_VAR,
                    value: raw,
                    reason: "must be between 0 and 100",
                });
            }
            policy.completion_threshold = threshold;
        }
        Ok(policy)
    }
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            min_requested_hours: Self::DEFAULT_MIN_REQUESTED_HOURS,
            completion_threshold: Self::DEFAULT_COMPLETION_THRESHOLD,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn parse_number(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ConfigError::InvalidValue {
            key,
            value: raw.to_owned(),
            reason: "expected a finite number",
        })
}
