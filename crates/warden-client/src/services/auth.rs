//! Authentication API and session lifecycle.

use std::sync::Arc;

use tracing::{info, warn};

use warden_auth::SessionState;
use warden_core::config::NavigationConfig;
use warden_core::result::AppResult;
use warden_core::traits::Navigator;
use warden_core::types::User;

use super::validate;
use crate::client::ApiClient;
use crate::dto::{LoginRequest, LoginResponse, RegisterRequest};

/// Login, registration, profile, and logout.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
    session: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl AuthService {
    /// Creates the service.
    pub fn new(
        client: ApiClient,
        session: Arc<SessionState>,
        navigator: Arc<dyn Navigator>,
        navigation: &NavigationConfig,
    ) -> Self {
        Self {
            client,
            session,
            navigator,
            login_path: navigation.login_path.clone(),
        }
    }

    /// The session this service maintains.
    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// Logs in and establishes the session.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        validate(&request)?;

        let response: LoginResponse = self.client.post("/auth/login", &request).await?;
        self.session.login_succeeded(&response.token, response.user.clone())?;
        info!(user_id = %response.user.id, "Logged in");
        Ok(response.user)
    }

    /// Registers a new account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<User> {
        validate(request)?;
        let user: User = self.client.post("/auth/register", request).await?;
        info!(user_id = %user.id, username = %user.username, "Registered");
        Ok(user)
    }

    /// Fetches the authenticated user's profile.
    pub async fn profile(&self) -> AppResult<User> {
        self.client.get("/auth/profile").await
    }

    /// Ends the session and returns to the login page.
    pub fn logout(&self) {
        self.session.logout();
        self.navigator.navigate(&[&self.login_path]);
    }

    /// Start-up restore: loads the profile for a persisted token.
    ///
    /// Never fails. On any outcome the session ends up initialized; a failed
    /// profile fetch also ends the session.
    pub async fn restore_session(&self) {
        if !self.session.is_authenticated() {
            self.session.mark_initialized();
            return;
        }

        match self.profile().await {
            Ok(user) => self.session.profile_loaded(user),
            Err(e) => {
                warn!(error = %e, "Failed to restore session");
                // a 401 has already been handled by the pipeline
                if self.session.is_authenticated() {
                    self.logout();
                }
                self.session.mark_initialized();
            }
        }
    }
}
