//! Observable session state: current user, bearer token, initialization flag.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use warden_core::config::SessionConfig;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::traits::TokenStore;
use warden_core::types::User;

/// Point-in-time view of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The authenticated user, once the profile has been loaded.
    pub user: Option<User>,
    /// The bearer token, if any.
    pub token: Option<String>,
    /// Whether the start-up profile fetch has completed (either way).
    pub initialized: bool,
}

/// The process-wide session, passed explicitly to guards and interceptors.
///
/// Mutated only by login success, logout, and completion of the start-up
/// profile fetch. `initialized` flips to `true` once and never reverts.
pub struct SessionState {
    /// Persistent token storage.
    store: Arc<dyn TokenStore>,
    /// Key the token is stored under.
    token_key: String,
    /// Current value and change notification.
    tx: watch::Sender<SessionSnapshot>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.tx.borrow();
        f.debug_struct("SessionState")
            .field("token_key", &self.token_key)
            .field("authenticated", &snapshot.token.is_some())
            .field("initialized", &snapshot.initialized)
            .finish()
    }
}

impl SessionState {
    /// Creates the session, reading any persisted token.
    ///
    /// A store read failure is logged and treated as "no token".
    pub fn new(store: Arc<dyn TokenStore>, token_key: impl Into<String>) -> Self {
        let token_key = token_key.into();
        let token = match store.get(&token_key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted token");
                None
            }
        };
        let (tx, _rx) = watch::channel(SessionSnapshot {
            user: None,
            token,
            initialized: false,
        });
        Self {
            store,
            token_key,
            tx,
        }
    }

    /// Creates the session from configuration.
    pub fn from_config(store: Arc<dyn TokenStore>, config: &SessionConfig) -> Self {
        Self::new(store, config.token_key.clone())
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// The bearer token, if one is held. Never returns an empty string.
    pub fn token(&self) -> Option<String> {
        self.tx.borrow().token.clone()
    }

    /// Whether a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().token.is_some()
    }

    /// The loaded user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.tx.borrow().user.clone()
    }

    /// Whether the start-up profile fetch has completed.
    pub fn is_initialized(&self) -> bool {
        self.tx.borrow().initialized
    }

    /// Suspends until the session is initialized.
    pub async fn wait_initialized(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close.
        let _ = rx.wait_for(|s| s.initialized).await;
    }

    /// Whether the current user's role is one of `roles`.
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        self.tx
            .borrow()
            .user
            .as_ref()
            .map(|u| roles.iter().any(|r| r.as_ref() == u.role))
            .unwrap_or(false)
    }

    /// Records a successful login: persists the token and publishes the user.
    ///
    /// An empty token is rejected and leaves both the store and the session
    /// untouched.
    pub fn login_succeeded(&self, token: &str, user: User) -> AppResult<()> {
        if token.is_empty() {
            return Err(AppError::session("Login response carried an empty token"));
        }
        self.store.set(&self.token_key, token)?;
        info!(user_id = %user.id, role = %user.role, "Session established");
        self.tx.send_modify(|s| {
            s.token = Some(token.to_string());
            s.user = Some(user);
        });
        Ok(())
    }

    /// Publishes the profile fetched for a restored token and marks the
    /// session initialized.
    pub fn profile_loaded(&self, user: User) {
        info!(user_id = %user.id, "Session restored");
        self.tx.send_modify(|s| {
            s.user = Some(user);
            s.initialized = true;
        });
    }

    /// Marks the start-up profile fetch as finished.
    pub fn mark_initialized(&self) {
        self.tx.send_if_modified(|s| {
            let changed = !s.initialized;
            s.initialized = true;
            changed
        });
    }

    /// Clears the token and user. `initialized` is left as is.
    ///
    /// A failure to remove the persisted token is logged; the in-memory
    /// session is cleared regardless.
    pub fn logout(&self) {
        if let Err(e) = self.store.remove(&self.token_key) {
            warn!(error = %e, "Failed to remove persisted token");
        }
        self.tx.send_modify(|s| {
            s.token = None;
            s.user = None;
        });
        info!("Session cleared");
    }
}
