//! Connection-pooled transport.

use std::sync::Arc;
use std::time::Duration;

use super::request::HttpRequest;
use super::response::HttpResponse;
use crate::error::{NetworkError, Result};

/// Transport settings.
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Whole-request deadline. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("Tabula/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
    headers: http::HeaderMap,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    pub fn without_request_timeout(mut self) -> Self {
        self.config.request_timeout = None;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Send `name: value` on every request made through the client.
    pub fn header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Result<Self> {
        let name = name
            .try_into()
            .map_err(|_| NetworkError::InvalidHeader("invalid header name".to_string()))?;
        let value = value
            .try_into()
            .map_err(|_| NetworkError::InvalidHeader(format!("invalid value for {name}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.config.connect_timeout)
            .user_agent(&self.config.user_agent)
            .default_headers(self.headers);
        if let Some(timeout) = self.config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpClient {
            client: builder.build()?,
            config: Arc::new(self.config),
        })
    }
}

/// Sends [`HttpRequest`]s and hands back the raw [`HttpResponse`].
///
/// Clones share one connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: Arc<HttpClientConfig>,
}

impl HttpClient {
    /// A client with default settings.
    pub fn new() -> Result<Self> {
        HttpClientBuilder::new().build()
    }

    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Send `request`. Any status counts as success here; only transport
    /// failures are errors.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        Ok(HttpResponse::new(builder.send().await?))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let client = HttpClient::builder()
            .request_timeout(Duration::from_secs(5))
            .user_agent("tabula-test")
            .build()
            .unwrap();
        assert_eq!(client.config().request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(client.config().user_agent, "tabula-test");

        let client = HttpClient::builder().without_request_timeout().build().unwrap();
        assert_eq!(client.config().request_timeout, None);
    }

    #[test]
    fn test_invalid_header() {
        let result = HttpClient::builder().header("bad header", "x");
        assert!(matches!(result, Err(NetworkError::InvalidHeader(_))));

        let result = HttpClient::builder().header("x-tabula", "line\nbreak");
        assert!(matches!(result, Err(NetworkError::InvalidHeader(_))));
    }
}
