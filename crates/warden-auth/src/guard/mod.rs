//! Navigation guards.
//!
//! A guard runs before a navigation completes and either allows it or denies
//! it, redirecting through the [`Navigator`]. Each evaluation is terminal:
//! `Pending → Allowed | Denied` with no retries.

pub mod auth;
pub mod guest;
pub mod navigation;
pub mod permission;
pub mod role;
pub mod router;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use warden_core::traits::Navigator;

pub use auth::AuthGuard;
pub use guest::GuestGuard;
pub use navigation::RecordingNavigator;
pub use permission::PermissionGuard;
pub use role::RoleGuard;
pub use router::{GuardKind, NavigationOutcome, Route, Router};

/// Declarative access metadata attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Any of these permissions grants access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    /// Any of these roles grants access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Public routes skip permission checks.
    #[serde(default)]
    pub public: bool,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RouteMeta {
    /// Metadata requiring any of `permissions`.
    pub fn permissions(permissions: &[&str]) -> Self {
        Self {
            permissions: Some(permissions.iter().map(|p| p.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Metadata requiring any of `roles`.
    pub fn roles(roles: &[&str]) -> Self {
        Self {
            roles: Some(roles.iter().map(|r| r.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Public metadata.
    pub fn public() -> Self {
        Self {
            public: true,
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// The navigation being decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSnapshot {
    /// Target URL.
    pub url: String,
    /// Metadata of the matched route.
    pub meta: RouteMeta,
}

impl RouteSnapshot {
    /// Creates a snapshot.
    pub fn new(url: impl Into<String>, meta: RouteMeta) -> Self {
        Self {
            url: url.into(),
            meta,
        }
    }
}

/// Result of one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The navigation may proceed.
    Allow,
    /// The navigation was refused and redirected.
    Deny {
        /// Where the navigator was sent.
        redirect_to: String,
    },
}

impl GuardDecision {
    /// Whether the navigation may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// A pre-navigation decision function.
#[async_trait]
pub trait Guard: Send + Sync + std::fmt::Debug {
    /// Decides whether `route` may be activated.
    async fn can_activate(&self, route: &RouteSnapshot) -> GuardDecision;
}

/// Redirects and produces the matching denial.
pub(crate) fn redirect(navigator: &dyn Navigator, path: &str) -> GuardDecision {
    navigator.navigate(&[path]);
    GuardDecision::Deny {
        redirect_to: path.to_string(),
    }
}
