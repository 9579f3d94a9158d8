//! Error types for the networking module.

use std::fmt;

/// Message shown when the server rejected a request without saying why.
pub const DEFAULT_API_ERROR_MESSAGE: &str = "요청 처리 중 오류가 발생했습니다.";

/// Message shown when the server could not be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "네트워크 오류가 발생했습니다. 오류를 확인해주세요.";

/// Network-specific errors.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// HTTP request failed.
    Request(String),
    /// Invalid URL provided.
    InvalidUrl(String),
    /// Request timed out.
    Timeout,
    /// Connection refused or failed.
    Connection(String),
    /// Invalid header name or value.
    InvalidHeader(String),
    /// JSON serialization/deserialization error.
    Json(String),
    /// The response body did not have the expected shape.
    InvalidBody(String),
    /// The API answered with a non-2xx status.
    Api {
        /// The HTTP status code.
        status: u16,
        /// The `error` field of the response body, if it had one.
        message: Option<String>,
        /// The `detail` field of the response body, if it had one.
        detail: Option<serde_json::Value>,
    },
}

impl NetworkError {
    /// Create an API error from a status and optional message.
    pub fn api(status: u16, message: Option<String>) -> Self {
        Self::Api {
            status,
            message,
            detail: None,
        }
    }

    /// The HTTP status code, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the server was never reached.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Connection(_) | Self::Request(_) | Self::InvalidUrl(_)
        )
    }

    /// The message to show to the user.
    ///
    /// API errors use the server's `error` message when present; failures to
    /// reach the server use a fixed network error message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api {
                message: Some(msg), ..
            } if !msg.is_empty() => msg.clone(),
            Self::Api { .. } => DEFAULT_API_ERROR_MESSAGE.to_string(),
            _ if self.is_transport() => NETWORK_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(msg) => write!(f, "HTTP request error: {msg}"),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Connection(msg) => write!(f, "Connection error: {msg}"),
            Self::InvalidHeader(msg) => write!(f, "Invalid header: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::InvalidBody(msg) => write!(f, "Invalid response body: {msg}"),
            Self::Api {
                status, message, ..
            } => {
                if let Some(msg) = message {
                    write!(f, "HTTP {status}: {msg}")
                } else {
                    write!(f, "HTTP {status}")
                }
            }
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for NetworkError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for NetworkError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

/// A specialized Result type for network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;
