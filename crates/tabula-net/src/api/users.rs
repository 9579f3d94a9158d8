//! The users resource: `/api/v1/users`.

use std::future::Future;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::envelope::{ApiResponse, PaginatedResponse};
use crate::error::Result;
use crate::http::RestApiClient;

/// Collection path of the users resource.
pub const USERS_ENDPOINT: &str = "/api/v1/users";

/// Server-assigned user identifier.
pub type UserId = i64;

/// A user as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: NaiveDateTime,
}

/// Accepts RFC 3339 timestamps as well as the offset-less ISO form the
/// backend emits for naive datetimes.
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(serde::de::Error::custom)
}

/// Payload for creating a user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCreateInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Partial payload for updating a user. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Listing parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    /// Search term; omitted from the request when empty.
    pub search: String,
}

impl ListQuery {
    /// A query for `page` with `page_size` rows and no search term.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            search: String::new(),
        }
    }

    /// Set the search term.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// The query string pairs, in `page`, `page_size`, `search` order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ];
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        pairs
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// Operations on the users resource.
///
/// [`UsersClient`] talks to the real backend; controllers are generic over
/// this trait so they can be driven by an in-memory implementation too.
pub trait UserApi: Send + Sync {
    /// Fetch one page of users.
    fn list_users(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<PaginatedResponse<User>>> + Send;

    /// Fetch a single user.
    fn get_user(&self, id: UserId) -> impl Future<Output = Result<User>> + Send;

    /// Create a user, returning the persisted record.
    fn create_user(&self, input: &UserCreateInput) -> impl Future<Output = Result<User>> + Send;

    /// Update a user, returning the persisted record.
    fn update_user(
        &self,
        id: UserId,
        input: &UserUpdateInput,
    ) -> impl Future<Output = Result<User>> + Send;

    /// Delete a user.
    fn delete_user(&self, id: UserId) -> impl Future<Output = Result<()>> + Send;
}

/// [`UserApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct UsersClient {
    rest: RestApiClient,
}

impl UsersClient {
    /// Create a users client on top of a configured REST client.
    pub fn new(rest: RestApiClient) -> Self {
        Self { rest }
    }

    /// Create a users client for `base_url` with JSON defaults.
    pub fn connect(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::new(RestApiClient::builder(base_url).json_api().build()?))
    }

    /// The underlying REST client.
    pub fn rest(&self) -> &RestApiClient {
        &self.rest
    }

    fn detail_path(id: UserId) -> String {
        format!("{USERS_ENDPOINT}/{id}")
    }
}

impl UserApi for UsersClient {
    async fn list_users(&self, query: &ListQuery) -> Result<PaginatedResponse<User>> {
        tracing::debug!(
            target: "tabula_net::rest_api",
            page = query.page,
            page_size = query.page_size,
            search = %query.search,
            "listing users"
        );
        self.rest
            .get(USERS_ENDPOINT)
            .query_pairs(query.to_pairs())
            .json_response::<ApiResponse<PaginatedResponse<User>>>()
            .await?
            .into_data()
    }

    async fn get_user(&self, id: UserId) -> Result<User> {
        self.rest
            .get(&Self::detail_path(id))
            .json_response::<ApiResponse<User>>()
            .await?
            .into_data()
    }

    async fn create_user(&self, input: &UserCreateInput) -> Result<User> {
        self.rest
            .post(USERS_ENDPOINT)
            .json(input)
            .json_response::<ApiResponse<User>>()
            .await?
            .into_data()
    }

    async fn update_user(&self, id: UserId, input: &UserUpdateInput) -> Result<User> {
        self.rest
            .put(&Self::detail_path(id))
            .json(input)
            .json_response::<ApiResponse<User>>()
            .await?
            .into_data()
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        self.rest
            .delete(&Self::detail_path(id))
            .send_checked()
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_search_is_omitted() {
        let pairs = ListQuery::new(1, 10).to_pairs();
        assert_eq!(pairs.len(), 2);

        let pairs = ListQuery::new(2, 10).with_search("kim").to_pairs();
        assert_eq!(pairs[2], ("search".to_string(), "kim".to_string()));
    }

    #[test]
    fn test_user_timestamps() {
        let naive = r#"{"id": 1, "name": "김철수", "email": "kim@example.com", "age": null,
            "created_at": "2024-01-15T09:30:00.123456", "updated_at": "2024-01-15T09:30:00"}"#;
        let user: User = serde_json::from_str(naive).unwrap();
        assert_eq!(user.created_at.date().to_string(), "2024-01-15");
        assert_eq!(user.age, None);

        let offset = r#"{"id": 2, "name": "이영희", "email": "lee@example.com", "age": 28,
            "created_at": "2024-02-01T00:00:00+09:00", "updated_at": "2024-02-01T00:00:00Z"}"#;
        let user: User = serde_json::from_str(offset).unwrap();
        assert_eq!(user.created_at.date().to_string(), "2024-02-01");
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let input = UserUpdateInput {
            name: Some("박민수".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::json!({"name": "박민수"})
        );
    }
}
