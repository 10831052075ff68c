//! Response DTOs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warden_core::types::User;

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// One page of users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    /// Users in this page.
    pub users: Vec<User>,
    /// Total user count.
    pub total: u64,
    /// Page size.
    pub limit: u64,
    /// Page offset.
    pub offset: u64,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// A request recorded by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLog {
    pub id: Uuid,
    pub request_id: String,
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub ip_address: String,
    pub user_agent: String,
    pub status_code: u16,
    pub response_time_ms: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Recent request logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLogsResponse {
    pub logs: Vec<RequestLog>,
    pub count: u64,
    pub limit: u64,
}

/// Recent request logs of one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogsResponse {
    pub logs: Vec<RequestLog>,
    pub count: u64,
    pub limit: u64,
    pub user_id: Uuid,
}

/// Aggregate request statistics.
///
/// Map keys are strings on the wire, including status codes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemStats {
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub status_codes: BTreeMap<String, u64>,
    #[serde(default)]
    pub methods: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_paths: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}
