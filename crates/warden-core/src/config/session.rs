//! Session persistence configuration.

use serde::{Deserialize, Serialize};

/// Where the bearer token is persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the JSON file holding persisted values.
    #[serde(default = "default_token_file")]
    pub token_file: String,
    /// Key the bearer token is stored under.
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            token_key: default_token_key(),
        }
    }
}

fn default_token_file() -> String {
    "data/session.json".to_string()
}

fn default_token_key() -> String {
    "token".to_string()
}
