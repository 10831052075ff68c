//! Role-only guard for routes that declare no permission metadata.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use warden_core::config::NavigationConfig;
use warden_core::traits::Navigator;

use super::{Guard, GuardDecision, RouteSnapshot, redirect};
use crate::session::SessionState;

/// Allows navigation when the user's role is one of the route's roles.
///
/// Permissions are never consulted. Routes without roles are open.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    session: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    dashboard_path: String,
}

impl RoleGuard {
    /// Creates the guard.
    pub fn new(
        session: Arc<SessionState>,
        navigator: Arc<dyn Navigator>,
        navigation: &NavigationConfig,
    ) -> Self {
        Self {
            session,
            navigator,
            login_path: navigation.login_path.clone(),
            dashboard_path: navigation.dashboard_path.clone(),
        }
    }
}

#[async_trait]
impl Guard for RoleGuard {
    async fn can_activate(&self, route: &RouteSnapshot) -> GuardDecision {
        let Some(allowed) = route.meta.roles.as_deref().filter(|r| !r.is_empty()) else {
            return GuardDecision::Allow;
        };

        if !self.session.is_authenticated() {
            return redirect(self.navigator.as_ref(), &self.login_path);
        }

        if self.session.has_any_role(allowed) {
            return GuardDecision::Allow;
        }

        debug!(url = %route.url, ?allowed, "Role not permitted");
        redirect(self.navigator.as_ref(), &self.dashboard_path)
    }
}
