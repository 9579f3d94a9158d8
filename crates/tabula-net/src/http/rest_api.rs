//! The API-facing client.
//!
//! [`RestApiClient`] resolves paths against a base URL, attaches default
//! headers and runs the configured hooks around each call. Nothing is
//! retried automatically.

use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use super::client::{HttpClient, HttpClientBuilder};
use super::request::HttpRequest;
use super::response::HttpResponse;
use crate::error::{NetworkError, Result};

/// Runs on every outgoing request, in registration order.
pub type RequestHook = Arc<dyn Fn(&mut HttpRequest) + Send + Sync>;

/// Runs on every response before its status is checked. An error fails the
/// call.
pub type ResponseHook = Arc<dyn Fn(&HttpResponse) -> Result<()> + Send + Sync>;

/// Rewrites any error before it reaches the caller.
pub type ErrorMapper = Arc<dyn Fn(NetworkError) -> NetworkError + Send + Sync>;

#[derive(Clone, Default)]
struct Hooks {
    request: Vec<RequestHook>,
    response: Vec<ResponseHook>,
    map_error: Option<ErrorMapper>,
}

impl Hooks {
    fn map_error(&self, error: NetworkError) -> NetworkError {
        match &self.map_error {
            Some(map) => map(error),
            None => error,
        }
    }
}

enum Transport {
    Default,
    Client(HttpClient),
    Configured(HttpClientBuilder),
}

/// Builder for [`RestApiClient`].
pub struct RestApiClientBuilder {
    base_url: String,
    transport: Transport,
    headers: http::HeaderMap,
    hooks: Hooks,
}

impl RestApiClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            transport: Transport::Default,
            headers: http::HeaderMap::new(),
            hooks: Hooks::default(),
        }
    }

    /// Share an existing transport and its connection pool.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.transport = Transport::Client(client);
        self
    }

    pub fn http_client_builder(mut self, builder: HttpClientBuilder) -> Self {
        self.transport = Transport::Configured(builder);
        self
    }

    /// Send `name: value` with every request. Invalid pairs are logged and
    /// skipped.
    pub fn default_header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Self {
        match (name.try_into(), value.try_into()) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => tracing::warn!(target: "tabula_net::rest_api", "ignoring invalid default header"),
        }
        self
    }

    /// `Accept` and `Content-Type` both set to `application/json`.
    pub fn json_api(mut self) -> Self {
        let json = http::HeaderValue::from_static("application/json");
        self.headers.insert(http::header::ACCEPT, json.clone());
        self.headers.insert(http::header::CONTENT_TYPE, json);
        self
    }

    pub fn on_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut HttpRequest) + Send + Sync + 'static,
    {
        self.hooks.request.push(Arc::new(hook));
        self
    }

    pub fn on_response<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HttpResponse) -> Result<()> + Send + Sync + 'static,
    {
        self.hooks.response.push(Arc::new(hook));
        self
    }

    /// Replace the error mapper. Only one is kept.
    pub fn map_error<F>(mut self, map: F) -> Self
    where
        F: Fn(NetworkError) -> NetworkError + Send + Sync + 'static,
    {
        self.hooks.map_error = Some(Arc::new(map));
        self
    }

    /// Fails with [`NetworkError::InvalidUrl`] when the base URL is not an
    /// absolute hierarchical URL.
    pub fn build(self) -> Result<RestApiClient> {
        let mut base = Url::parse(&self.base_url)?;
        if base.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                self.base_url
            )));
        }
        // Url::join keeps the base path only up to its last slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let transport = match self.transport {
            Transport::Default => HttpClient::new()?,
            Transport::Client(client) => client,
            Transport::Configured(builder) => builder.build()?,
        };

        Ok(RestApiClient {
            shared: Arc::new(Shared {
                transport,
                base,
                headers: self.headers,
                hooks: self.hooks,
            }),
        })
    }
}

struct Shared {
    transport: HttpClient,
    base: Url,
    headers: http::HeaderMap,
    hooks: Hooks,
}

/// Client bound to one API base URL.
///
/// Clones share the transport, headers and hooks.
#[derive(Clone)]
pub struct RestApiClient {
    shared: Arc<Shared>,
}

impl RestApiClient {
    pub fn builder(base_url: impl Into<String>) -> RestApiClientBuilder {
        RestApiClientBuilder::new(base_url)
    }

    /// The base URL without its trailing slash.
    pub fn base_url(&self) -> &str {
        self.shared.base.as_str().trim_end_matches('/')
    }

    pub fn http_client(&self) -> &HttpClient {
        &self.shared.transport
    }

    pub fn get(&self, path: &str) -> RestApiRequestBuilder {
        self.request(http::Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RestApiRequestBuilder {
        self.request(http::Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RestApiRequestBuilder {
        self.request(http::Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> RestApiRequestBuilder {
        self.request(http::Method::DELETE, path)
    }

    /// Start a request for `path`, which is resolved below the base URL
    /// whether or not it starts with `/`.
    pub fn request(&self, method: http::Method, path: &str) -> RestApiRequestBuilder {
        let request = self
            .shared
            .base
            .join(path.trim_start_matches('/'))
            .map(|url| {
                let mut request = HttpRequest::new(method, url);
                request.headers = self.shared.headers.clone();
                request
            })
            .map_err(NetworkError::from);

        RestApiRequestBuilder {
            client: self.clone(),
            request,
        }
    }

    async fn dispatch(&self, request: Result<HttpRequest>) -> Result<HttpResponse> {
        let mut request = request?;
        for hook in &self.shared.hooks.request {
            hook(&mut request);
        }

        tracing::debug!(
            target: "tabula_net::rest_api",
            method = %request.method,
            url = %request.url,
            "sending request"
        );
        let response = self.shared.transport.execute(request).await?;
        tracing::debug!(
            target: "tabula_net::rest_api",
            status = response.status(),
            "response received"
        );

        for hook in &self.shared.hooks.response {
            hook(&response)?;
        }
        Ok(response)
    }
}

impl std::fmt::Debug for RestApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApiClient")
            .field("base_url", &self.base_url())
            .field("hooks", &self.shared.hooks.request.len())
            .finish_non_exhaustive()
    }
}

/// A request being assembled.
///
/// Problems found while building (bad header, unserializable body, bad
/// path) are held back and returned by whichever send method runs.
pub struct RestApiRequestBuilder {
    client: RestApiClient,
    request: Result<HttpRequest>,
}

impl RestApiRequestBuilder {
    fn edit(mut self, f: impl FnOnce(&mut HttpRequest) -> Result<()>) -> Self {
        let outcome = match &mut self.request {
            Ok(request) => f(request),
            Err(_) => Ok(()),
        };
        if let Err(error) = outcome {
            self.request = Err(error);
        }
        self
    }

    pub fn header(
        self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Self {
        let name = name.try_into();
        let value = value.try_into();
        self.edit(|request| match (name, value) {
            (Ok(name), Ok(value)) => {
                request.headers.insert(name, value);
                Ok(())
            }
            _ => Err(NetworkError::InvalidHeader("invalid request header".to_string())),
        })
    }

    pub fn query(self, key: &str, value: &str) -> Self {
        self.edit(|request| {
            request.append_query(key, value);
            Ok(())
        })
    }

    pub fn query_pairs(self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.edit(|request| {
            for (key, value) in pairs {
                request.append_query(&key, &value);
            }
            Ok(())
        })
    }

    /// Use `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Self {
        self.edit(|request| {
            request.body = Some(serde_json::to_value(body)?);
            Ok(())
        })
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        self.edit(|request| {
            request.timeout = Some(timeout);
            Ok(())
        })
    }

    /// The request as it stands, before any hook has run.
    pub fn build(self) -> Result<HttpRequest> {
        self.request
    }

    /// Send and return the response whatever its status.
    pub async fn send(self) -> Result<HttpResponse> {
        let Self { client, request } = self;
        client
            .dispatch(request)
            .await
            .map_err(|error| client.shared.hooks.map_error(error))
    }

    /// Send and turn a non-2xx status into [`NetworkError::Api`].
    pub async fn send_checked(self) -> Result<HttpResponse> {
        let client = self.client.clone();
        let response = self.send().await?;
        response.into_checked().await.map_err(|error| {
            tracing::warn!(target: "tabula_net::rest_api", %error, "request rejected");
            client.shared.hooks.map_error(error)
        })
    }

    /// Send, check the status and decode the body.
    pub async fn json_response<T: DeserializeOwned>(self) -> Result<T> {
        let client = self.client.clone();
        let response = self.send_checked().await?;
        response
            .json()
            .await
            .map_err(|error| client.shared.hooks.map_error(error))
    }
}
