//! Client configuration.
//!
//! `ClientConfig` and its builder describe where the API lives and how HTTP
//! requests are made. Values can also come from the environment:
//!
//! - `INKPOST_API_BASE_URL`: API root, e.g. `https://blog.example.com/api`
//! - `INKPOST_API_TIMEOUT_SECS`: request timeout for non-streaming calls
//! - `INKPOST_API_TOKEN`: bearer token to start with

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::{BlogError, Result};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
/// Timeout for non-streaming requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = concat!("inkpost/", env!("CARGO_PKG_VERSION"));

/// HTTP configuration for [`crate::client::BlogClient`].
#[derive(Debug)]
pub struct ClientConfig {
    /// API root that relative paths are joined onto.
    pub base_url: String,
    /// Timeout for CRUD requests. Streaming requests never time out on their
    /// own; wrap them in a deadline or cancel them instead.
    pub timeout: Option<Duration>,
    /// Connection timeout, applied to every request.
    pub connect_timeout: Option<Duration>,
    /// Extra headers sent with every request.
    pub headers: HashMap<String, String>,
    pub user_agent: Option<String>,
    /// Send `Accept-Encoding: identity` on streaming requests so proxies do
    /// not buffer the event stream for compression.
    pub stream_disable_compression: bool,
    /// Bearer token to start with.
    pub token: Option<SecretString>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            headers: HashMap::new(),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            stream_disable_compression: true,
            token: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Read configuration from `INKPOST_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(url) = std::env::var("INKPOST_API_BASE_URL") {
            builder = builder.base_url(url);
        }

        if let Ok(secs) = std::env::var("INKPOST_API_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                BlogError::Configuration(format!(
                    "INKPOST_API_TIMEOUT_SECS must be a whole number of seconds, got {secs:?}"
                ))
            })?;
            builder = builder.timeout(Some(Duration::from_secs(secs)));
        }

        if let Ok(token) = std::env::var("INKPOST_API_TOKEN") {
            if !token.is_empty() {
                builder = builder.token(token);
            }
        }

        let config = builder.build();
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used to build a client.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(BlogError::Configuration(format!(
                "base_url must be an absolute http(s) URL, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Resolve a request path. Absolute URLs pass through untouched.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Option<Duration>>,
    connect_timeout: Option<Option<Duration>>,
    headers: HashMap<String, String>,
    user_agent: Option<String>,
    stream_disable_compression: Option<bool>,
    token: Option<SecretString>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn stream_disable_compression(mut self, val: bool) -> Self {
        self.stream_disable_compression = Some(val);
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            headers: self.headers,
            user_agent: self.user_agent.or(defaults.user_agent),
            stream_disable_compression: self
                .stream_disable_compression
                .unwrap_or(defaults.stream_disable_compression),
            token: self.token,
        }
    }
}
