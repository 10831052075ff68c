//! Admin monitoring API.

use uuid::Uuid;

use warden_core::result::AppResult;

use crate::client::ApiClient;
use crate::dto::{RequestLogsResponse, SystemStats, UserLogsResponse};
use crate::request::ApiRequest;

/// Default number of logs returned by [`AdminService::request_logs`].
pub const DEFAULT_LOG_LIMIT: u64 = 100;
/// Default number of logs returned by [`AdminService::request_logs_by_user`].
pub const DEFAULT_USER_LOG_LIMIT: u64 = 50;

/// Request logs and system statistics.
#[derive(Debug, Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The most recent request logs.
    pub async fn request_logs(&self, limit: u64) -> AppResult<RequestLogsResponse> {
        self.client
            .call(ApiRequest::get("/admin/logs").with_query("limit", limit))
            .await
    }

    /// The most recent request logs of one user.
    pub async fn request_logs_by_user(&self, user_id: Uuid, limit: u64) -> AppResult<UserLogsResponse> {
        self.client
            .call(ApiRequest::get(format!("/admin/logs/user/{user_id}")).with_query("limit", limit))
            .await
    }

    /// Aggregate request statistics.
    pub async fn system_stats(&self) -> AppResult<SystemStats> {
        self.client.get("/admin/stats").await
    }
}
