//! Request and response payloads of the remote API.

pub mod request;
pub mod response;

pub use request::{LoginRequest, RegisterRequest, UpdateUserRequest};
pub use response::{
    LoginResponse, MessageResponse, RequestLog, RequestLogsResponse, SystemStats,
    UserListResponse, UserLogsResponse,
};
