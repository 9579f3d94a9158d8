//! Response envelopes shared by every endpoint.

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// The success envelope: `{ success, data, message? }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the server considers the request successful.
    #[serde(default = "default_success")]
    pub success: bool,
    /// The payload. A missing field decodes as `None`.
    pub data: Option<T>,
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Take the payload, failing if the envelope carried none.
    pub fn into_data(self) -> Result<T> {
        self.data.ok_or_else(|| {
            NetworkError::InvalidBody(
                self.message
                    .unwrap_or_else(|| "response envelope has no data".to_string()),
            )
        })
    }
}

/// One page of a listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total: u64,
    /// This page's number, 1-based.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Number of pages.
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// An empty first page.
    pub fn empty(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size,
            total_pages: 0,
        }
    }
}

/// The error body returned with non-2xx statuses: `{ success, error, detail? }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Always `false` in practice.
    #[serde(default)]
    pub success: bool,
    /// User-facing error message.
    #[serde(default)]
    pub error: Option<String>,
    /// Arbitrary extra information (validation details and such).
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}
