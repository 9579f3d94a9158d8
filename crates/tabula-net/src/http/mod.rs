//! HTTP client for Tabula.
//!
//! Two layers:
//!
//! - [`HttpClient`] sends finished [`HttpRequest`]s over a pooled
//!   reqwest client.
//! - [`RestApiClient`] resolves paths against a base URL, runs hooks and
//!   decodes the API's `{success, error, detail}` failure bodies.
//!
//! # Example
//!
//! ```ignore
//! use tabula_net::http::RestApiClient;
//!
//! let client = RestApiClient::builder("http://localhost:8000").json_api().build()?;
//! let response = client.delete("/api/v1/users/3").send_checked().await?;
//! assert_eq!(response.status(), 204);
//! ```

mod client;
mod request;
mod response;
mod rest_api;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use request::HttpRequest;
pub use response::HttpResponse;
pub use rest_api::{
    ErrorMapper, RequestHook, ResponseHook, RestApiClient, RestApiClientBuilder,
    RestApiRequestBuilder,
};
