//! User management API.

use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::types::User;

use super::validate;
use crate::client::ApiClient;
use crate::dto::{MessageResponse, UpdateUserRequest, UserListResponse};
use crate::request::ApiRequest;

/// Default page size for [`UserService::list`].
pub const DEFAULT_LIMIT: u64 = 10;

/// List, fetch, update, and delete users.
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    /// Creates the service.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of users.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<UserListResponse> {
        let request = ApiRequest::get("/users")
            .with_query("limit", limit)
            .with_query("offset", offset);
        self.client.call(request).await
    }

    /// A single user.
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.client.get(&format!("/users/{id}")).await
    }

    /// Applies a partial update.
    pub async fn update(&self, id: Uuid, patch: &UpdateUserRequest) -> AppResult<User> {
        if patch.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        validate(patch)?;
        self.client.put(&format!("/users/{id}"), patch).await
    }

    /// Deletes a user.
    pub async fn delete(&self, id: Uuid) -> AppResult<MessageResponse> {
        self.client.delete(&format!("/users/{id}")).await
    }
}
