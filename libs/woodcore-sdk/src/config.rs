use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "WOODCORE_API_KEY";
/// Environment variable overriding the environment's base URL.
pub const BASE_URL_ENV: &str = "WOODCORE_BASE_URL";
/// Environment variable setting the transport timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "WOODCORE_TIMEOUT_SECS";

/// WoodCore deployment a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Sandbox tenant, selected by `wc_test` keys.
    Test,
    /// Live tenant.
    Production,
}

struct EnvironmentProfile {
    environment: Environment,
    key_prefix: &'static str,
    base_url: &'static str,
}

// First matching prefix wins. The last profile has an empty prefix and
// catches every remaining key.
static ENVIRONMENTS: [EnvironmentProfile; 2] = [
    EnvironmentProfile {
        environment: Environment::Test,
        key_prefix: "wc_test",
        base_url: "https://spark.test.woodcoreapp.com/api/v2",
    },
    EnvironmentProfile {
        environment: Environment::Production,
        key_prefix: "",
        base_url: "https://spark.woodcoreapp.com/api/v2",
    },
];

impl Environment {
    /// Derive the environment from the key's prefix.
    #[must_use]
    pub fn from_api_key(api_key: &str) -> Self {
        ENVIRONMENTS
            .iter()
            .find(|profile| api_key.starts_with(profile.key_prefix))
            .unwrap_or(fallback_profile())
            .environment
    }

    /// Base URL of the environment's API.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        ENVIRONMENTS
            .iter()
            .find(|profile| profile.environment == self)
            .unwrap_or(fallback_profile())
            .base_url
    }

    /// Lower-case name, as used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Production => "prod",
        }
    }
}

fn fallback_profile() -> &'static EnvironmentProfile {
    &ENVIRONMENTS[ENVIRONMENTS.len() - 1]
}

/// Static configuration shared by every executor a client hands out.
#[derive(Debug)]
pub struct ClientConfig {
    api_key: SecretString,
    environment: Environment,
    base_url: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create configuration for an API key, routing by its prefix.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the key is empty or blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Configuration("API Key is required".into()));
        }

        let environment = Environment::from_api_key(&api_key);
        Ok(Self {
            api_key: SecretString::from(api_key),
            environment,
            base_url: environment.base_url().to_owned(),
            timeout: None,
        })
    }

    /// Point the client at another host, e.g. a proxy or a mock server.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the URL does not parse or is not http(s).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, Error> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url)
            .map_err(|e| Error::Configuration(format!("Invalid base URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "Invalid base URL '{base_url}': unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        self.base_url = base_url.trim_end_matches('/').to_owned();
        Ok(self)
    }

    /// Set a timeout on the underlying HTTP transport.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create configuration from environment variables
    ///
    /// Expects:
    /// - `WOODCORE_API_KEY`: API key (required)
    /// - `WOODCORE_BASE_URL`: Base URL override (optional)
    /// - `WOODCORE_TIMEOUT_SECS`: Transport timeout in seconds (optional)
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the key is missing or an override is invalid.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::Configuration(format!("{API_KEY_ENV} not set")))?;
        let mut config = Self::new(api_key)?;

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url)?;
        }
        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| Error::Configuration(format!("Invalid {TIMEOUT_ENV} '{raw}': {e}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// Absolute URL for an already-resolved request path.
    pub(crate) fn url_for(&self, path: &str) -> Result<Url, Error> {
        let separator = if path.starts_with('/') { "" } else { "/" };
        let raw = format!("{}{separator}{path}", self.base_url);
        Url::parse(&raw).map_err(|e| Error::InvalidRequest(format!("Invalid URL '{raw}': {e}")))
    }
}
