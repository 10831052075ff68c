//! Typed wrappers over the remote API.

pub mod admin;
pub mod auth;
pub mod user;

use validator::Validate;

use warden_core::error::AppError;
use warden_core::result::AppResult;

pub use admin::AdminService;
pub use auth::AuthService;
pub use user::UserService;

/// Rejects a payload that fails its field rules before it is sent.
pub(crate) fn validate<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}
