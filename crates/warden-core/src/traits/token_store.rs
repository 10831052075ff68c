//! Persistent storage for the bearer token.

use crate::result::AppResult;

/// Key/value storage that survives process restarts.
///
/// Only a single value (the bearer token) is ever kept here.
pub trait TokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read a value. Returns `None` when the key is absent.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}
