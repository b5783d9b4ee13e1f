//! Client configuration

use coindcx_auth::{AuthError, Credentials};
use reqwest::Url;
use tracing::debug;

use crate::error::{RestError, RestResult};

/// Default general API root
pub const DEFAULT_API_URL: &str = "https://api.coindcx.com/";
/// Default public market-data root
pub const DEFAULT_PUBLIC_URL: &str = "https://public.coindcx.com/";

/// Environment variable overriding the API root
pub const API_URL_ENV: &str = "COINDCX_API_URL";
/// Environment variable overriding the public root
pub const PUBLIC_URL_ENV: &str = "COINDCX_PUBLIC_URL";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
pub const DEFAULT_USER_AGENT: &str = concat!("coindcx-rest/", env!("CARGO_PKG_VERSION"));

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// General API root
    pub api_url: String,
    /// Public market-data root
    pub public_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            api_url: DEFAULT_API_URL.to_string(),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the environment
    ///
    /// Reads `COINDCX_KEY` / `COINDCX_SECRET` for credentials (left unset
    /// when either is missing) and `COINDCX_API_URL` / `COINDCX_PUBLIC_URL`
    /// for the roots. Empty values count as unset.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::default();

        match Credentials::from_env() {
            Ok(credentials) => config.credentials = Some(credentials),
            Err(AuthError::EnvVarNotSet(name)) => {
                debug!("{} not set, private endpoints will be unavailable", name);
            }
            Err(e) => return Err(e.into()),
        }

        if let Some(url) = env_value(API_URL_ENV) {
            config.api_url = url;
        }
        if let Some(url) = env_value(PUBLIC_URL_ENV) {
            config.public_url = url;
        }

        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the general API root
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the public market-data root
    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into();
        self
    }

    /// Point both roots at the same host
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.public_url = url.clone();
        self.api_url = url;
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Check that both roots are absolute http(s) URLs
    pub fn validate(&self) -> RestResult<()> {
        validate_root(&self.api_url)?;
        validate_root(&self.public_url)
    }
}

fn validate_root(url: &str) -> RestResult<()> {
    let parsed = Url::parse(url).map_err(|e| RestError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(RestError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            url, scheme
        ))),
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
