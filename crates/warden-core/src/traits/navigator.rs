//! Client-side navigation collaborator.

/// Performs client-side redirection.
///
/// Guards and the request pipeline never render anything; when they deny or
/// force a logout they hand the target path segments to a `Navigator`.
pub trait Navigator: Send + Sync + std::fmt::Debug + 'static {
    /// Navigate to the path formed by joining `commands` (e.g. `["/login"]`).
    fn navigate(&self, commands: &[&str]);
}
