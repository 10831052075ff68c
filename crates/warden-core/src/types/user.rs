//! Authenticated user entity as returned by the remote API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assumed when the API omits one.
pub const DEFAULT_ROLE: &str = "user";

/// A user account known to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Unique login name.
    pub username: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// RBAC role name.
    #[serde(default = "default_role", deserialize_with = "role_or_default")]
    pub role: String,
    /// Whether the account is enabled.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns "First Last", falling back to the username.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_true() -> bool {
    true
}

/// Accounts created before roles existed come back with `""` or `null`.
fn role_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let role: Option<String> = Option::deserialize(deserializer)?;
    Ok(role
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(default_role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(role: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "6f1c2f8e-4c36-4f61-9a55-0d5f3a1c9b20",
            "email": "ada@example.com",
            "username": "ada",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": role,
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        })
    }

    #[test]
    fn test_empty_role_becomes_user() {
        let user: User = serde_json::from_value(payload(serde_json::json!(""))).unwrap();
        assert_eq!(user.role, "user");
        let user: User = serde_json::from_value(payload(serde_json::Value::Null)).unwrap();
        assert_eq!(user.role, "user");
    }

    #[test]
    fn test_explicit_role_kept() {
        let user: User = serde_json::from_value(payload(serde_json::json!("admin"))).unwrap();
        assert_eq!(user.role, "admin");
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_missing_role_field_defaults() {
        let mut value = payload(serde_json::json!("admin"));
        value.as_object_mut().unwrap().remove("role");
        let user: User = serde_json::from_value(value).unwrap();
        assert_eq!(user.role, DEFAULT_ROLE);
    }
}
