//! HTTP client trait and implementations.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;

use super::rate_limiter::RateLimiter;

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch the body of a URL as text.
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Configuration for [`WebClient`].
#[derive(Clone)]
pub struct WebClientBuilder {
    request_delay: Duration,
    timeout: Duration,
    user_agent: String,
}

impl Default for WebClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WebClientBuilder {
    pub fn new() -> Self {
        Self {
            request_delay: Duration::from_millis(100),
            timeout: Duration::from_secs(30),
            // OpenFoodFacts asks clients to identify themselves.
            user_agent: "larder/0.1 (ingredient vocabulary research)".to_string(),
        }
    }

    /// Set the minimum delay between requests. Zero disables pacing.
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn build(self) -> Result<WebClient, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(WebClient {
            inner,
            limiter: RateLimiter::new(self.request_delay),
        })
    }
}

/// Production HTTP client: reqwest with a timeout, a descriptive user agent,
/// and courtesy pacing between requests.
pub struct WebClient {
    inner: reqwest::Client,
    limiter: RateLimiter,
}

impl WebClient {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self, reqwest::Error> {
        WebClientBuilder::new().build()
    }

    pub fn builder() -> WebClientBuilder {
        WebClientBuilder::new()
    }
}

#[async_trait]
impl HttpClient for WebClient {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        self.limiter.pace().await;

        tracing::debug!(url, "fetching");
        let response = self.inner.get(parsed).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        Ok(body)
    }
}

/// Canned response for tests.
#[derive(Clone)]
pub enum MockResponse {
    Body(String),
    Error(String),
}

/// Mock HTTP client for tests: a URL-to-response table.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for a URL.
    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Add a successful body for a URL.
    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.with_response(url, MockResponse::Body(body.to_string()))
    }

    /// Add an error response for a URL.
    pub fn with_error(self, url: &str, error: &str) -> Self {
        self.with_response(url, MockResponse::Error(error.to_string()))
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Error(error)) => Err(FetchError::Transport(error.clone())),
            None => Err(FetchError::Transport(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}
