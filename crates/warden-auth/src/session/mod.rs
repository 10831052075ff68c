//! Session state and bearer-token persistence.

pub mod state;
pub mod store;

pub use state::{SessionSnapshot, SessionState};
pub use store::{FileTokenStore, MemoryTokenStore};
