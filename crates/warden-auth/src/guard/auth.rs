//! Requires a bearer token.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use warden_core::config::NavigationConfig;
use warden_core::traits::Navigator;

use super::{Guard, GuardDecision, RouteSnapshot, redirect};
use crate::session::SessionState;

/// Allows navigation only while a token is held; otherwise redirects to login.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    session: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl AuthGuard {
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
        }
    }
}

#[async_trait]
impl Guard for AuthGuard {
    async fn can_activate(&self, route: &RouteSnapshot) -> GuardDecision {
        if self.session.is_authenticated() {
            return GuardDecision::Allow;
        }
        debug!(url = %route.url, "Not authenticated");
        redirect(self.navigator.as_ref(), &self.login_path)
    }
}
