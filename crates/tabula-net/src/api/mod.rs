//! Typed access to the backend API.

mod envelope;
mod users;

pub use envelope::{ApiErrorBody, ApiResponse, PaginatedResponse};
pub use users::{
    ListQuery, USERS_ENDPOINT, User, UserApi, UserCreateInput, UserId, UserUpdateInput,
    UsersClient,
};
