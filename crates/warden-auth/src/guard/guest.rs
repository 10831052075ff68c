//! Keeps signed-in users away from login and registration pages.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use warden_core::config::NavigationConfig;
use warden_core::traits::Navigator;

use super::{Guard, GuardDecision, RouteSnapshot, redirect};
use crate::session::SessionState;

/// Allows navigation only for visitors who are not fully signed in.
///
/// Waits for the session to finish initializing first, so a stored token
/// whose profile is still loading never produces a wrong decision.
#[derive(Debug, Clone)]
pub struct GuestGuard {
    session: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
    dashboard_path: String,
}

impl GuestGuard {
    /// Creates the guard.
    pub fn new(
        session: Arc<SessionState>,
        navigator: Arc<dyn Navigator>,
        navigation: &NavigationConfig,
    ) -> Self {
        Self {
            session,
            navigator,
            dashboard_path: navigation.dashboard_path.clone(),
        }
    }
}

#[async_trait]
impl Guard for GuestGuard {
    async fn can_activate(&self, route: &RouteSnapshot) -> GuardDecision {
        self.session.wait_initialized().await;

        let signed_in = self.session.is_authenticated() && self.session.current_user().is_some();
        if !signed_in {
            return GuardDecision::Allow;
        }
        debug!(url = %route.url, "Already signed in");
        redirect(self.navigator.as_ref(), &self.dashboard_path)
    }
}
