use std::time::Duration;

use crate::clients::errors::{Error, Result};

/// Public origin of the metadata web service.
pub const DEFAULT_BASE_URL: &str = "http://ws.spotify.com";
/// Applied by the HTTP capability; the client itself never times out.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = concat!("spmeta/", env!("CARGO_PKG_VERSION"));

const BASE_URL_VAR: &str = "SPMETA_BASE_URL";
const TIMEOUT_VAR: &str = "SPMETA_TIMEOUT_SECS";

// Configuration for the SpotifyClient and its HTTP capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `SPMETA_BASE_URL` and `SPMETA_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self> {
        ClientConfigBuilder::new().build()
    }
}

#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    // Explicit values win, then the environment, then the defaults
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => read_var(BASE_URL_VAR)?.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = normalize_base_url(&base_url)?;

        let timeout = match self.timeout {
            Some(t) => t,
            None => match read_var(TIMEOUT_VAR)? {
                Some(raw) => parse_timeout(&raw)?,
                None => DEFAULT_TIMEOUT,
            },
        };
        if timeout.is_zero() {
            return Err(Error::ConfigurationError("timeout must be positive".into()));
        }

        Ok(ClientConfig {
            base_url,
            timeout,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

fn read_var(key: &str) -> Result<Option<String>> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::ConfigurationError(format!(
            "base URL must start with http:// or https://, got {raw:?}"
        )));
    }
    Ok(trimmed.to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::ConfigurationError(format!(
            "{TIMEOUT_VAR} must be a positive number of seconds, got {raw:?}"
        ))),
    }
}
