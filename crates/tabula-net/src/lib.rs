//! Networking module for Tabula.
//!
//! This crate provides the client side of the Tabula backend API:
//!
//! - **HTTP Client**: [`HttpClient`] executing built requests over reqwest
//! - **REST API Client**: [`RestApiClient`] with base URL, JSON defaults,
//!   request/response hooks and API error body decoding
//! - **Users API**: the [`UserApi`] trait and its HTTP implementation,
//!   [`UsersClient`]
//!
//! # Listing users
//!
//! ```ignore
//! use tabula_net::{ListQuery, UserApi, UsersClient};
//!
//! let users = UsersClient::connect("http://localhost:8000")?;
//! let page = users.list_users(&ListQuery::new(1, 10).with_search("kim")).await?;
//! println!("{} of {} users", page.items.len(), page.total);
//! ```
//!
//! # Errors
//!
//! Every operation returns [`NetworkError`]. Non-2xx responses become
//! [`NetworkError::Api`] carrying the status and the server's `error` and
//! `detail` fields; [`NetworkError::user_message`] gives the text to show.

pub mod api;
mod error;
pub mod http;

pub use error::{DEFAULT_API_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE, NetworkError, Result};

// Re-export commonly used types at the crate root
pub use api::{
    ApiErrorBody, ApiResponse, ListQuery, PaginatedResponse, User, UserApi, UserCreateInput,
    UserId, UserUpdateInput, UsersClient,
};
pub use http::{HttpClient, HttpClientBuilder, HttpRequest, HttpResponse, RestApiClient};
