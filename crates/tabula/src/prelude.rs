//! Prelude module for Tabula.
//!
//! ```ignore
//! use tabula::prelude::*;
//! ```
//!
//! This provides access to:
//! - Change notification (`Signal`, `Property`)
//! - List controllers and pipeline specs
//! - The users API (`UserApi`, `UsersClient`, `User`)
//! - Page controllers and forms

// ============================================================================
// Change Notification
// ============================================================================

pub use tabula_core::{Debouncer, Property, Signal};

// ============================================================================
// List Pipeline
// ============================================================================

pub use crate::model::{
    Collation, DeleteOutcome, FieldValue, FilterCriteria, LocalListController, PageSpec, Record,
    RemoteUserList, SortDirection, SortSpec, ViewSummary,
};

// ============================================================================
// Users API
// ============================================================================

pub use tabula_net::{ListQuery, NetworkError, User, UserApi, UserId, UsersClient};

// ============================================================================
// Pages and Forms
// ============================================================================

pub use crate::form::{FieldErrors, ProfileForm, UserForm};
pub use crate::notice::{Notice, NoticeLevel};
pub use crate::pages::{FormsExample, Navigation, TableExample, UserCreatePage, UserDetailPage};

// ============================================================================
// Application State
// ============================================================================

pub use crate::config::ClientConfig;
pub use crate::store::{PreferenceStorage, Theme, UiStore};
