//! HTTP client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::Policy;
use tracing::debug;

use super::response::HttpResponse;
use crate::error::{NetworkError, Result};

/// Maximum number of redirects a request follows.
const MAX_REDIRECTS: usize = 10;

/// Configuration for the HTTP client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("HorizonGlyph/{} (Rust)", env!("CARGO_PKG_VERSION"))
}

/// Builder for creating an HTTP client with custom configuration.
#[derive(Debug)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the HTTP client.
    ///
    /// Zero timeouts are rejected since they fail every request.
    pub fn build(self) -> Result<HttpClient> {
        if self.config.timeout.is_zero() || self.config.connect_timeout.is_zero() {
            return Err(NetworkError::InvalidConfig(
                "timeouts must be greater than zero".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .connect_timeout(self.config.connect_timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(&self.config.user_agent)
            .build()?;

        Ok(HttpClient {
            inner: Arc::new(HttpClientInner {
                client,
                config: self.config,
            }),
        })
    }
}

struct HttpClientInner {
    client: reqwest::Client,
    config: HttpClientConfig,
}

/// A small HTTP client for downloading emoji images.
///
/// The client is cheaply cloneable and thread-safe. Clones share the same
/// underlying connection pool and configuration.
///
/// # Example
///
/// ```ignore
/// use horizon_glyph_net::http::HttpClient;
///
/// let client = HttpClient::builder().build()?;
/// let response = client.get("https://example.com/emoji/1f600.png").await?;
/// let bytes = response.error_for_status()?.bytes().await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl HttpClient {
    /// Create a builder for configuring a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Get the client's configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    /// Send a GET request and wait for the response headers.
    ///
    /// Non-2xx responses are returned as-is; use
    /// [`HttpResponse::error_for_status`] to turn them into errors.
    pub async fn get(&self, url: impl AsRef<str>) -> Result<HttpResponse> {
        let url = url::Url::parse(url.as_ref())?;
        debug!(target: "horizon_glyph_net::http", %url, "GET");
        let response = self
            .inner
            .client
            .get(url)
            .send()
            .await
            .map_err(NetworkError::from)?;
        Ok(HttpResponse::from_reqwest(response))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
