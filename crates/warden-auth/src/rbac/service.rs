//! Access evaluation against the RBAC registry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::config::{Permission, RbacConfig, Role, RouteRule};

/// Answers role, permission, and route access questions.
///
/// Evaluation only ever reads the registry. The registry itself may be
/// replaced wholesale or edited through the `add_*`/`remove_*` operations.
#[derive(Debug)]
pub struct RbacService {
    /// The registry being evaluated.
    config: RwLock<RbacConfig>,
}

impl RbacService {
    /// Creates a service over the built-in registry.
    pub fn new() -> Self {
        Self::with_config(RbacConfig::default())
    }

    /// Creates a service over a custom registry.
    pub fn with_config(config: RbacConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RbacConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RbacConfig> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// True iff `role` is registered and grants `permission`.
    pub fn has_permission(&self, role: &str, permission: &str) -> bool {
        Self::grants(&self.read(), role, permission)
    }

    /// True if `role` grants at least one of `permissions`. False for an empty list.
    pub fn has_any_permission<S: AsRef<str>>(&self, role: &str, permissions: &[S]) -> bool {
        let config = self.read();
        permissions
            .iter()
            .any(|p| Self::grants(&config, role, p.as_ref()))
    }

    /// True if `role` grants every one of `permissions`. True for an empty list.
    pub fn has_all_permissions<S: AsRef<str>>(&self, role: &str, permissions: &[S]) -> bool {
        let config = self.read();
        permissions
            .iter()
            .all(|p| Self::grants(&config, role, p.as_ref()))
    }

    /// Exact role equality.
    pub fn has_role(&self, role: &str, required: &str) -> bool {
        role == required
    }

    /// True if `role` is one of `required`.
    pub fn has_any_role<S: AsRef<str>>(&self, role: &str, required: &[S]) -> bool {
        required.iter().any(|r| r.as_ref() == role)
    }

    /// Decides whether `role` may open `path` using the registered route rules.
    ///
    /// Paths without a rule are allowed. A public rule allows everyone. A rule
    /// declaring roles is decided by role membership alone; otherwise a rule
    /// declaring permissions needs any one of them. A rule declaring neither
    /// allows.
    pub fn can_access_route(&self, role: &str, path: &str) -> bool {
        let config = self.read();
        let Some(rule) = config.route(path) else {
            debug!(path, "No route rule registered, allowing");
            return true;
        };

        if rule.public.unwrap_or(false) {
            return true;
        }

        if let Some(roles) = rule.roles.as_deref().filter(|r| !r.is_empty()) {
            return self.has_any_role(role, roles);
        }

        if let Some(permissions) = rule.permissions.as_deref().filter(|p| !p.is_empty()) {
            return permissions
                .iter()
                .any(|p| Self::grants(&config, role, p));
        }

        true
    }

    /// Looks up a role.
    pub fn get_role(&self, name: &str) -> Option<Role> {
        self.read().roles.get(name).cloned()
    }

    /// Returns a copy of every role.
    pub fn get_all_roles(&self) -> HashMap<String, Role> {
        self.read().roles.clone()
    }

    /// Looks up a permission.
    pub fn get_permission(&self, name: &str) -> Option<Permission> {
        self.read().permissions.get(name).cloned()
    }

    /// Returns a copy of every permission.
    pub fn get_all_permissions(&self) -> HashMap<String, Permission> {
        self.read().permissions.clone()
    }

    /// Returns a copy of the route rules.
    pub fn get_routes(&self) -> Vec<RouteRule> {
        self.read().routes.clone()
    }

    /// Replaces the whole registry. Nothing from the previous one is kept.
    pub fn update_config(&self, config: RbacConfig) {
        *self.write() = config;
    }

    /// Adds or replaces a role.
    pub fn add_role(&self, role: Role) {
        self.write().roles.insert(role.name.clone(), role);
    }

    /// Removes a role if present.
    pub fn remove_role(&self, name: &str) {
        self.write().roles.remove(name);
    }

    /// Adds or replaces a permission definition.
    pub fn add_permission(&self, permission: Permission) {
        self.write()
            .permissions
            .insert(permission.name.clone(), permission);
    }

    /// Removes a permission definition if present.
    ///
    /// Roles that list the permission keep listing it.
    pub fn remove_permission(&self, name: &str) {
        self.write().permissions.remove(name);
    }

    fn grants(config: &RbacConfig, role: &str, permission: &str) -> bool {
        config
            .roles
            .get(role)
            .map(|r| r.grants(permission))
            .unwrap_or(false)
    }
}

impl Default for RbacService {
    fn default() -> Self {
        Self::new()
    }
}
