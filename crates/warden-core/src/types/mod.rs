//! Shared domain and wire types.

pub mod envelope;
pub mod user;

pub use envelope::{ApiEnvelope, ApiErrorBody, EnvelopeStatus};
pub use user::{User, DEFAULT_ROLE};
