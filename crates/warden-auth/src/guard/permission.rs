//! Role/permission guard driven by route metadata.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use warden_core::config::NavigationConfig;
use warden_core::traits::Navigator;

use super::{Guard, GuardDecision, RouteSnapshot, redirect};
use crate::rbac::RbacService;
use crate::session::SessionState;

/// Checks the current user's role against the route's declared roles and
/// permissions.
///
/// Declared roles and declared permissions are alternatives: satisfying
/// either one allows the navigation. Roles are checked first. A route that
/// declares neither falls back to the registry's route rules.
#[derive(Debug, Clone)]
pub struct PermissionGuard {
    session: Arc<SessionState>,
    rbac: Arc<RbacService>,
    navigator: Arc<dyn Navigator>,
    navigation: NavigationConfig,
}

impl PermissionGuard {
    /// Creates the guard.
    pub fn new(
        session: Arc<SessionState>,
        rbac: Arc<RbacService>,
        navigator: Arc<dyn Navigator>,
        navigation: &NavigationConfig,
    ) -> Self {
        Self {
            session,
            rbac,
            navigator,
            navigation: navigation.clone(),
        }
    }

    fn evaluate(&self, role: &str, route: &RouteSnapshot) -> bool {
        let meta = &route.meta;

        if meta.public {
            return true;
        }

        if let Some(roles) = meta.roles.as_deref().filter(|r| !r.is_empty()) {
            if self.rbac.has_any_role(role, roles) {
                return true;
            }
        }

        if let Some(permissions) = meta.permissions.as_deref().filter(|p| !p.is_empty()) {
            if self.rbac.has_any_permission(role, permissions) {
                return true;
            }
        }

        if meta.permissions.is_none() && meta.roles.is_none() {
            return self.rbac.can_access_route(role, &route.url);
        }

        false
    }

    /// Landing page for a denied role.
    fn fallback_for(&self, role: &str) -> &str {
        match role {
            "admin" => self.navigation.admin_path.as_str(),
            _ => self.navigation.dashboard_path.as_str(),
        }
    }
}

#[async_trait]
impl Guard for PermissionGuard {
    async fn can_activate(&self, route: &RouteSnapshot) -> GuardDecision {
        let Some(user) = self.session.current_user() else {
            debug!(url = %route.url, "No current user");
            return redirect(self.navigator.as_ref(), &self.navigation.login_path);
        };

        if self.evaluate(&user.role, route) {
            return GuardDecision::Allow;
        }

        warn!(
            user_id = %user.id,
            role = %user.role,
            url = %route.url,
            "Navigation denied"
        );
        redirect(self.navigator.as_ref(), self.fallback_for(&user.role))
    }
}
