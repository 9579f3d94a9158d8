//! Outgoing requests.

use std::time::Duration;

use url::Url;

/// A request about to be sent.
///
/// Request hooks receive it by mutable reference just before it goes out,
/// so everything here is public and freely editable.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: http::Method,
    /// Absolute URL, query string included.
    pub url: Url,
    pub headers: http::HeaderMap,
    /// JSON payload. The API takes no other body type.
    pub body: Option<serde_json::Value>,
    /// Overrides the client's request timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: http::Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Append `key=value` to the query string, percent-encoded.
    pub fn append_query(&mut self, key: &str, value: &str) {
        self.url.query_pairs_mut().append_pair(key, value);
    }

    /// Decoded query pairs in order.
    pub fn query(&self) -> Vec<(String, String)> {
        self.url.query_pairs().into_owned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_url() -> Url {
        Url::parse("http://localhost:8000/api/v1/users").unwrap()
    }

    #[test]
    fn test_query_is_encoded_in_order() {
        let mut request = HttpRequest::new(http::Method::GET, users_url());
        request.append_query("page", "1");
        request.append_query("search", "김 철수");

        assert_eq!(request.url.path(), "/api/v1/users");
        assert_eq!(
            request.query(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("search".to_string(), "김 철수".to_string()),
            ]
        );
        assert!(!request.url.as_str().contains(' '));
    }

    #[test]
    fn test_new_request_is_bare() {
        let request = HttpRequest::new(http::Method::DELETE, users_url());
        assert_eq!(request.url.query(), None);
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }
}
