//! # warden-core
//!
//! Core crate for Warden. Contains the collaborator traits (navigation and
//! token persistence), configuration schemas, the API wire envelope, the
//! user entity, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Warden crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
