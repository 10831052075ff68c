//! Role, permission, and route-rule definitions.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use warden_core::error::AppError;

/// A named bundle of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier (e.g. `"admin"`).
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Permission names granted by this role.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Role {
    /// Creates a role from a name, description, and permission list.
    pub fn new(name: &str, description: &str, permissions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Whether this role grants `permission`.
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// A dotted `resource.action` permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Permission identifier (e.g. `"admin.logs.read"`).
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Resource part (`"admin.logs"`).
    pub resource: String,
    /// Action part (`"read"`).
    pub action: String,
}

impl Permission {
    /// Creates a permission, splitting `name` at its last dot.
    pub fn new(name: &str, description: &str) -> Self {
        let (resource, action) = name.rsplit_once('.').unwrap_or((name, ""));
        Self {
            name: name.to_string(),
            description: description.to_string(),
            resource: resource.to_string(),
            action: action.to_string(),
        }
    }
}

/// Access requirements registered for a route path.
///
/// Within `permissions` and within `roles` any single entry suffices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Exact route path (e.g. `"/admin"`).
    pub path: String,
    /// Any of these permissions grants access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    /// Any of these roles grants access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Public routes are open to everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RouteRule {
    fn with_permissions(path: &str, permissions: &[&str], description: &str) -> Self {
        Self {
            path: path.to_string(),
            permissions: Some(permissions.iter().map(|p| p.to_string()).collect()),
            roles: None,
            public: None,
            description: Some(description.to_string()),
        }
    }
}

/// The complete registry: roles, permissions, and route rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Role name → role.
    #[serde(default)]
    pub roles: HashMap<String, Role>,
    /// Permission name → permission.
    #[serde(default)]
    pub permissions: HashMap<String, Permission>,
    /// Route rules, matched by exact path.
    #[serde(default)]
    pub routes: Vec<RouteRule>,
}

impl RbacConfig {
    /// An empty registry: every role is unknown, every route is unregistered.
    pub fn empty() -> Self {
        Self {
            roles: HashMap::new(),
            permissions: HashMap::new(),
            routes: Vec::new(),
        }
    }

    /// Reads a registry from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                warden_core::error::ErrorKind::Configuration,
                format!("Failed to read RBAC config '{}': {e}", path.display()),
                e,
            )
        })?;
        let config: Self = serde_json::from_str(&data)?;
        info!(
            path = %path.display(),
            roles = config.roles.len(),
            permissions = config.permissions.len(),
            routes = config.routes.len(),
            "Loaded RBAC registry"
        );
        Ok(config)
    }

    /// Finds the rule registered for `path`.
    pub fn route(&self, path: &str) -> Option<&RouteRule> {
        self.routes.iter().find(|r| r.path == path)
    }
}

impl Default for RbacConfig {
    /// The built-in registry: `user`, `moderator`, and `admin`.
    fn default() -> Self {
        let mut permissions = HashMap::new();
        for (name, description) in [
            ("profile.read", "Read own profile"),
            ("profile.write", "Update own profile"),
            ("users.read", "Read user information"),
            ("users.write", "Create and update users"),
            ("users.delete", "Delete users"),
            ("admin.logs.read", "Read system logs"),
            ("admin.stats.read", "Read system statistics"),
            ("admin.users.manage", "Manage all users"),
        ] {
            permissions.insert(name.to_string(), Permission::new(name, description));
        }

        let mut roles = HashMap::new();

        // User: own profile only
        roles.insert(
            "user".to_string(),
            Role::new(
                "user",
                "Regular user with basic permissions",
                &["profile.read", "profile.write"],
            ),
        );

        // Admin: everything
        roles.insert(
            "admin".to_string(),
            Role::new(
                "admin",
                "Administrator with full system access",
                &[
                    "profile.read",
                    "profile.write",
                    "users.read",
                    "users.write",
                    "users.delete",
                    "admin.logs.read",
                    "admin.stats.read",
                    "admin.users.manage",
                ],
            ),
        );

        // Moderator: user + read users and logs
        roles.insert(
            "moderator".to_string(),
            Role::new(
                "moderator",
                "Moderator with limited admin permissions",
                &["profile.read", "profile.write", "users.read", "admin.logs.read"],
            ),
        );

        let routes = vec![
            RouteRule::with_permissions("/dashboard", &["profile.read"], "User dashboard"),
            RouteRule::with_permissions(
                "/admin",
                &["admin.logs.read", "admin.stats.read"],
                "Admin dashboard",
            ),
            RouteRule::with_permissions("/users", &["users.read"], "User management"),
            RouteRule::with_permissions("/profile", &["profile.read"], "User profile"),
        ];

        Self {
            roles,
            permissions,
            routes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_permission_split_on_last_dot() {
        let perm = Permission::new("admin.logs.read", "Read system logs");
        assert_eq!(perm.resource, "admin.logs");
        assert_eq!(perm.action, "read");
    }

    #[test]
    fn test_default_registry_shape() {
        let config = RbacConfig::default();
        assert_eq!(config.roles.len(), 3);
        assert_eq!(config.permissions.len(), 8);
        assert_eq!(config.roles["admin"].permissions.len(), 8);
        assert!(config.roles["moderator"].grants("admin.logs.read"));
        assert!(!config.roles["user"].grants("users.read"));
        assert_eq!(config.route("/users").unwrap().permissions.as_ref().unwrap(), &vec!["users.read".to_string()]);
        assert!(config.route("/nowhere").is_none());
    }

    #[test]
    fn test_load_from_file_defaults_missing_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"roles": {{"auditor": {{"name": "auditor", "permissions": ["admin.logs.read"]}}}}}}"#
        )
        .unwrap();

        let config = RbacConfig::load_from_file(file.path()).unwrap();
        assert!(config.roles["auditor"].grants("admin.logs.read"));
        assert!(config.permissions.is_empty());
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let err = RbacConfig::load_from_file("/definitely/not/here.json").unwrap_err();
        assert_eq!(err.kind, warden_core::error::ErrorKind::Configuration);
    }
}
