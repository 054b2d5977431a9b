use std::fmt;
use std::time::Duration;

use derive_setters::Setters;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_APP_TITLE: &str = "AI Influencer WebApp";
pub const DEFAULT_APP_URL: &str = "https://localhost";

const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
const BASE_URL_ENV: &str = "OPENROUTER_BASE_URL";
const TIMEOUT_ENV: &str = "OPENROUTER_TIMEOUT_SECS";
const MODELS_TTL_ENV: &str = "OPENROUTER_MODELS_TTL_SECS";
const APP_TITLE_ENV: &str = "OPENROUTER_APP_TITLE";
const APP_URL_ENV: &str = "OPENROUTER_APP_URL";

/// Settings for a gateway [`Client`](crate::Client).
#[derive(Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct GatewayConfig {
    /// Bearer token; requests are sent unauthenticated when absent.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Upper bound for every upstream call.
    pub timeout: Duration,
    /// How long a fetched model catalog is served from cache.
    pub models_ttl: Duration,
    /// Sent as `X-Title` for attribution.
    pub app_title: String,
    /// Sent as `HTTP-Referer` for attribution.
    pub app_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            models_ttl: Duration::from_secs(300),
            app_title: DEFAULT_APP_TITLE.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Reads the configuration from the process environment, loading a `.env`
    /// file first when one is present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        config.api_key = get(API_KEY_ENV);
        if let Some(base_url) = get(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Some(timeout) = get(TIMEOUT_ENV) {
            config.timeout = parse_seconds(TIMEOUT_ENV, &timeout)?;
        }
        if let Some(ttl) = get(MODELS_TTL_ENV) {
            config.models_ttl = parse_seconds(MODELS_TTL_ENV, &ttl)?;
        }
        if let Some(title) = get(APP_TITLE_ENV) {
            config.app_title = title;
        }
        if let Some(url) = get(APP_URL_ENV) {
            config.app_url = url;
        }
        Ok(config)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("models_ttl", &self.models_ttl)
            .field("app_title", &self.app_title)
            .field("app_url", &self.app_url)
            .finish()
    }
}

fn parse_seconds(key: &str, value: &str) -> Result<Duration> {
    value
        .parse::<f64>()
        .ok()
        .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
        .ok_or_else(|| {
            Error::Config(format!(
                "{key} must be a non-negative number of seconds, got '{value}'"
            ))
        })
}
