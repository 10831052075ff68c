//! Access-control registry configuration.

use serde::{Deserialize, Serialize};

/// Selects the role/permission registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RbacSettings {
    /// JSON registry file. When unset the built-in registry is used.
    #[serde(default)]
    pub config_file: Option<String>,
}
