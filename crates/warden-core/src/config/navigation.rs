//! Navigation targets used by guards and the request pipeline.

use serde::{Deserialize, Serialize};

/// Well-known paths that denials and forced logouts redirect to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Login page.
    #[serde(default = "default_login")]
    pub login_path: String,
    /// Default landing page for authenticated users.
    #[serde(default = "default_dashboard")]
    pub dashboard_path: String,
    /// Landing page for administrators.
    #[serde(default = "default_admin")]
    pub admin_path: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login_path: default_login(),
            dashboard_path: default_dashboard(),
            admin_path: default_admin(),
        }
    }
}

fn default_login() -> String {
    "/login".to_string()
}

fn default_dashboard() -> String {
    "/dashboard".to_string()
}

fn default_admin() -> String {
    "/admin".to_string()
}
