//! Collaborator traits implemented outside the access-control core.

pub mod navigator;
pub mod token_store;

pub use navigator::Navigator;
pub use token_store::TokenStore;
