//! # warden-client
//!
//! Everything that talks to the remote API.
//!
//! ## Modules
//!
//! - `request` — transport-neutral request/response/failure types
//! - `transport` — `reqwest`-backed transport service
//! - `pipeline` — interceptor layers: bearer-token attach and error normalization
//! - `client` — envelope-decoding client over the pipeline
//! - `dto` — request and response payloads
//! - `services` — auth, user, and admin API wrappers

pub mod client;
pub mod dto;
pub mod pipeline;
pub mod request;
pub mod services;
pub mod transport;

pub use client::ApiClient;
pub use pipeline::{ApiService, FailureClass};
pub use request::{ApiRequest, ApiResponse, TransportFailure};
pub use services::{AdminService, AuthService, UserService};
pub use transport::ReqwestTransport;
