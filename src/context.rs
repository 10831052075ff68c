//! Wires configuration into the session, registry, API services, and router.

use std::sync::Arc;

use warden_auth::{FileTokenStore, RbacConfig, RbacService, RecordingNavigator, Router, SessionState};
use warden_client::{AdminService, ApiClient, AuthService, UserService};
use warden_core::config::AppConfig;
use warden_core::result::AppResult;

/// Everything a command may need.
#[derive(Debug)]
pub struct App {
    pub session: Arc<SessionState>,
    pub navigator: Arc<RecordingNavigator>,
    pub auth: AuthService,
    pub users: UserService,
    pub admin: AdminService,
    pub router: Router,
}

impl App {
    /// Builds the application from configuration. Performs no network I/O.
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let rbac = Arc::new(load_rbac(config)?);

        let store = Arc::new(FileTokenStore::new(&config.session.token_file));
        let session = Arc::new(SessionState::from_config(store, &config.session));
        let navigator = Arc::new(RecordingNavigator::new());

        let client = ApiClient::from_config(
            &config.api,
            &config.navigation,
            session.clone(),
            navigator.clone(),
        )?;

        let auth = AuthService::new(
            client.clone(),
            session.clone(),
            navigator.clone(),
            &config.navigation,
        );
        let router = Router::with_default_routes(
            session.clone(),
            rbac,
            navigator.clone(),
            &config.navigation,
        );

        Ok(Self {
            session,
            navigator,
            auth,
            users: UserService::new(client.clone()),
            admin: AdminService::new(client),
            router,
        })
    }

    /// Builds the application and restores the persisted session.
    pub async fn start(config: &AppConfig) -> AppResult<Self> {
        let app = Self::new(config)?;
        app.auth.restore_session().await;
        Ok(app)
    }
}

/// The built-in registry, or the one named by `rbac.config_file`.
pub fn load_rbac(config: &AppConfig) -> AppResult<RbacService> {
    match &config.rbac.config_file {
        Some(path) => Ok(RbacService::with_config(RbacConfig::load_from_file(path)?)),
        None => Ok(RbacService::new()),
    }
}
