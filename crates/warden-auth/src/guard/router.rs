//! Route table and per-navigation guard evaluation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use warden_core::config::NavigationConfig;
use warden_core::traits::Navigator;

use super::{
    AuthGuard, Guard, GuardDecision, GuestGuard, PermissionGuard, RoleGuard, RouteMeta,
    RouteSnapshot,
};
use crate::rbac::RbacService;
use crate::session::SessionState;

/// Path that matches any URL.
pub const WILDCARD: &str = "**";

/// Which guard protects a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardKind {
    /// [`AuthGuard`]
    Auth,
    /// [`GuestGuard`]
    Guest,
    /// [`PermissionGuard`]
    Permission,
    /// [`RoleGuard`]
    Role,
}

/// A registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Absolute path, or [`WILDCARD`].
    pub path: String,
    /// Guards run in order; the first denial wins.
    pub guards: Vec<GuardKind>,
    /// Access metadata handed to the guards.
    pub meta: RouteMeta,
}

impl Route {
    /// Creates a route.
    pub fn new(path: &str, guards: &[GuardKind], meta: RouteMeta) -> Self {
        Self {
            path: path.to_string(),
            guards: guards.to_vec(),
            meta,
        }
    }

    fn matches(&self, path: &str) -> bool {
        self.path == WILDCARD || self.path == path
    }
}

/// Terminal result of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Every guard allowed the navigation.
    Allowed {
        /// The activated path.
        path: String,
    },
    /// A guard denied the navigation and redirected.
    Redirected {
        /// The path that was requested.
        from: String,
        /// Where the guard redirected.
        to: String,
    },
}

/// The application's routes: login, registration, dashboards, and user
/// management, with a wildcard falling back to the dashboard rules.
pub fn default_routes() -> Vec<Route> {
    use GuardKind::{Auth, Guest, Permission};

    vec![
        Route::new(
            "/",
            &[Auth, Permission],
            RouteMeta::permissions(&["profile.read"]).describe("User dashboard"),
        ),
        Route::new("/login", &[Guest], RouteMeta::public().describe("User login")),
        Route::new(
            "/register",
            &[Guest],
            RouteMeta::public().describe("User registration"),
        ),
        Route::new(
            "/dashboard",
            &[Auth, Permission],
            RouteMeta::permissions(&["profile.read"]).describe("User dashboard"),
        ),
        Route::new(
            "/admin",
            &[Auth, Permission],
            RouteMeta::permissions(&["admin.logs.read", "admin.stats.read"])
                .describe("Admin dashboard"),
        ),
        Route::new(
            "/users",
            &[Auth, Permission],
            RouteMeta::permissions(&["users.read"]).describe("User management"),
        ),
        Route::new(
            "/profile",
            &[Auth, Permission],
            RouteMeta::permissions(&["profile.read"]).describe("User profile"),
        ),
        Route::new(
            WILDCARD,
            &[Auth, Permission],
            RouteMeta::permissions(&["profile.read"]).describe("Default redirect to dashboard"),
        ),
    ]
}

/// Matches URLs against the route table and runs the route's guards.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    auth: AuthGuard,
    guest: GuestGuard,
    permission: PermissionGuard,
    role: RoleGuard,
}

impl Router {
    /// Creates a router over `routes`.
    pub fn new(
        session: Arc<SessionState>,
        rbac: Arc<RbacService>,
        navigator: Arc<dyn Navigator>,
        navigation: &NavigationConfig,
        routes: Vec<Route>,
    ) -> Self {
        Self {
            routes,
            auth: AuthGuard::new(session.clone(), navigator.clone(), navigation),
            guest: GuestGuard::new(session.clone(), navigator.clone(), navigation),
            permission: PermissionGuard::new(session.clone(), rbac, navigator.clone(), navigation),
            role: RoleGuard::new(session, navigator, navigation),
        }
    }

    /// Creates a router over [`default_routes`].
    pub fn with_default_routes(
        session: Arc<SessionState>,
        rbac: Arc<RbacService>,
        navigator: Arc<dyn Navigator>,
        navigation: &NavigationConfig,
    ) -> Self {
        Self::new(session, rbac, navigator, navigation, default_routes())
    }

    /// The registered routes.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The first route matching `url`.
    pub fn match_route(&self, url: &str) -> Option<&Route> {
        let path = normalize(url);
        self.routes.iter().find(|r| r.matches(&path))
    }

    /// Evaluates a navigation to `url`.
    ///
    /// A URL matching no route is allowed without running any guard.
    pub async fn navigate(&self, url: &str) -> NavigationOutcome {
        let path = normalize(url);
        let Some(route) = self.routes.iter().find(|r| r.matches(&path)) else {
            debug!(path = %path, "No route matched");
            return NavigationOutcome::Allowed { path };
        };

        let snapshot = RouteSnapshot::new(path.clone(), route.meta.clone());
        for kind in &route.guards {
            if let GuardDecision::Deny { redirect_to } = self.guard(*kind).can_activate(&snapshot).await {
                info!(from = %path, to = %redirect_to, guard = ?kind, "Navigation redirected");
                return NavigationOutcome::Redirected {
                    from: path,
                    to: redirect_to,
                };
            }
        }

        debug!(path = %path, "Navigation allowed");
        NavigationOutcome::Allowed { path }
    }

    fn guard(&self, kind: GuardKind) -> &dyn Guard {
        match kind {
            GuardKind::Auth => &self.auth,
            GuardKind::Guest => &self.guest,
            GuardKind::Permission => &self.permission,
            GuardKind::Role => &self.role,
        }
    }
}

/// Strips query and fragment, forces a leading slash, drops a trailing one.
fn normalize(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}
