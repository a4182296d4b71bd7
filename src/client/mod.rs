//! Blog API client
//!
//! [`BlogClient`] wraps `reqwest` with envelope decoding, bearer-token
//! handling and the streaming AI endpoints. Endpoint groups live in
//! submodules as further `impl BlogClient` blocks.

mod account;
mod ai;
mod articles;
mod comments;
mod taxonomy;

use std::sync::{Arc, RwLock};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{BlogError, Result, error_from_status};
use crate::streaming::StreamDecoder;
use crate::types::Envelope;

/// Client for the blog API.
///
/// Cheap to clone; clones share the HTTP connection pool and the token.
#[derive(Debug, Clone)]
pub struct BlogClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    token: Arc<RwLock<Option<SecretString>>>,
    decoder: StreamDecoder,
}

impl BlogClient {
    pub fn new(mut config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                BlogError::Configuration(format!("Invalid header name {key:?}: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                BlogError::Configuration(format!("Invalid value for header {key:?}: {e}"))
            })?;
            headers.insert(name, value);
        }

        // No client-wide request timeout: it would also cut long streams.
        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder
            .build()
            .map_err(|e| BlogError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let token = config.token.take();
        Ok(Self {
            http,
            config: Arc::new(config),
            token: Arc::new(RwLock::new(token)),
            decoder: StreamDecoder::new(),
        })
    }

    /// Client configured from `INKPOST_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Use a custom decoder for the AI endpoints.
    pub fn with_decoder(mut self, decoder: StreamDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(SecretString::from(token.into()));
    }

    pub fn clear_token(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Request builder with the bearer token attached, if any.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        tracing::debug!("{method} {url}");
        let builder = self.http.request(method, url);
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a non-streaming request and unwrap the envelope.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let builder = match self.config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Request failed: {e}");
            BlogError::network(format!("Failed to send request: {e}"))
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BlogError::network(format!("Failed to read response body: {e}")))?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("Unauthorized response, dropping stored token");
            self.clear_token();
            return Err(error_from_status(status.as_u16(), &body));
        }

        if !status.is_success() {
            return Err(match serde_json::from_str::<Envelope>(&body) {
                Ok(envelope) if !envelope.is_ok() => BlogError::Api {
                    code: envelope.code,
                    message: envelope.message,
                },
                _ => error_from_status(status.as_u16(), &body),
            });
        }

        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| BlogError::Parse(format!("Invalid response envelope: {e}")))?;
        if !envelope.is_ok() {
            tracing::warn!("API error {}: {}", envelope.code, envelope.message);
        }
        envelope.into_data()
    }

    /// Like [`send`](Self::send) for endpoints whose `data` is irrelevant.
    async fn send_unit(&self, builder: RequestBuilder) -> Result<()> {
        self.send::<serde_json::Value>(builder).await.map(|_| ())
    }
}
