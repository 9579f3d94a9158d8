//! Tabula - list-driven admin client toolkit.
//!
//! This is the umbrella crate. It holds the list pipeline, the page
//! controllers, configuration, and persisted UI state, and re-exports the
//! core and networking crates.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Instant;
//! use tabula::{ClientConfig, RemoteUserList};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let mut users = RemoteUserList::new(
//!     config.users_client()?,
//!     config.page_size,
//!     config.search_debounce(),
//! )?;
//! users.mount().await;
//!
//! users.set_search("kim", Instant::now());
//! if let Some(deadline) = users.deadline() {
//!     tokio::time::sleep_until(deadline.into()).await;
//!     users.tick(Instant::now()).await;
//! }
//! # Ok(())
//! # }
//! ```

pub use tabula_core::*;

/// HTTP and users API client.
pub mod net {
    pub use tabula_net::*;
}

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod notice;
pub mod pages;
pub mod prelude;
pub mod store;

pub use config::{API_URL_ENV, ClientConfig};
pub use error::{ConfigError, ModelError, StoreError};
pub use model::{
    Collation, DeleteOutcome, FilterCriteria, LocalListController, PageSpec, Record,
    RemoteUserList, SortDirection, SortSpec, ViewSummary,
};
pub use notice::{Notice, NoticeLevel};
pub use store::{JsonFileStorage, MemoryStorage, PreferenceStorage, Theme, UiStore};
