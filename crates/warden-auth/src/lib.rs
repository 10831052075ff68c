//! # warden-auth
//!
//! Client-side access control for Warden.
//!
//! ## Modules
//!
//! - `rbac` — role/permission registry and the access evaluator
//! - `session` — observable session state and bearer-token persistence
//! - `guard` — navigation guards and the route table they protect

pub mod guard;
pub mod rbac;
pub mod session;

pub use guard::{
    AuthGuard, Guard, GuardDecision, GuestGuard, NavigationOutcome, PermissionGuard,
    RecordingNavigator, RoleGuard, Route, RouteMeta, RouteSnapshot, Router,
};
pub use rbac::{Permission, RbacConfig, RbacService, Role, RouteRule};
pub use session::{FileTokenStore, MemoryTokenStore, SessionSnapshot, SessionState};
