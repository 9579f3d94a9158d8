//! Responses from the API.

use serde::de::DeserializeOwned;

use crate::api::ApiErrorBody;
use crate::error::{NetworkError, Result};

/// A received response. The body has not been read yet.
pub struct HttpResponse {
    inner: reqwest::Response,
}

impl HttpResponse {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// A header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Final URL after redirects.
    pub fn url(&self) -> &url::Url {
        self.inner.url()
    }

    /// Read the body and decode it as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.inner.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Pass 2xx responses through and turn anything else into
    /// [`NetworkError::Api`].
    ///
    /// A `{success, error, detail}` body contributes its message and detail.
    /// Any other body is ignored.
    pub async fn into_checked(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let body = self.inner.bytes().await.unwrap_or_default();
        let error = match serde_json::from_slice::<ApiErrorBody>(&body) {
            Ok(body) => NetworkError::Api {
                status,
                message: body.error,
                detail: body.detail,
            },
            Err(_) => NetworkError::api(status, None),
        };
        Err(error)
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status())
            .field("url", &self.url().as_str())
            .finish()
    }
}
