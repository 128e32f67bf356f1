//! Runtime configuration for the external text classifier.
//!
//! The only secret the crate needs is the classifier API key. It is read from
//! `GEMINI_API_KEY`, falling back to `API_KEY`. The remaining knobs have sane
//! defaults and can be overridden from the environment or in code.

use std::env;
use std::time::Duration;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const FALLBACK_API_KEY_VAR: &str = "API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

/// Connection settings for `GeminiClassifier`.
#[derive(Clone)]
pub struct ClassifierConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            temperature: Some(0.0),
            max_output_tokens: Some(64),
        }
    }
}

impl ClassifierConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Builds a config from the process environment.
    ///
    /// A missing key is not an error here; the classifier refuses to be
    /// constructed without one.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source, e.g. a map in tests.
    ///
    /// Blank values are ignored, as is a timeout that is not a positive
    /// number of seconds.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = non_blank(API_KEY_VAR)
            .or_else(|| non_blank(FALLBACK_API_KEY_VAR))
            .unwrap_or_default();
        let mut config = Self::new(api_key);

        if let Some(model) = non_blank(MODEL_VAR) {
            config.model = model;
        }
        if let Some(seconds) = non_blank(TIMEOUT_VAR)
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|seconds| *seconds > 0)
        {
            config.timeout_seconds = seconds;
        }
        config
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Zero falls back to `DEFAULT_TIMEOUT_SECONDS`.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = if seconds == 0 {
            DEFAULT_TIMEOUT_SECONDS
        } else {
            seconds
        };
        self
    }

    /// Request timeout. A zero `timeout_seconds` set directly on the field
    /// also means the default.
    pub fn timeout(&self) -> Duration {
        match self.timeout_seconds {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            seconds => Duration::from_secs(seconds),
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// Manual impl so the key never ends up in logs.
impl std::fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("api_key", &if self.has_credential() { "***" } else { "" })
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}
