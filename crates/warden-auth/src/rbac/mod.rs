//! Role-based access control (RBAC) registry and evaluation.

pub mod config;
pub mod service;

pub use config::{Permission, RbacConfig, Role, RouteRule};
pub use service::RbacService;
