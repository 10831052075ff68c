//! Request pipeline.
//!
//! Every API call passes through two interceptors before reaching the
//! transport:
//!
//! ```text
//! AuthAttach  ->  ErrorNormalize  ->  transport
//! ```
//!
//! [`AuthAttach`] adds the bearer token; [`ErrorNormalize`] turns transport
//! failures into user-facing [`AppError`]s and ends the session on `401`.

pub mod auth;
pub mod error;

use std::sync::Arc;

use tower::ServiceBuilder;
use tower::util::BoxCloneService;

use warden_auth::SessionState;
use warden_core::config::NavigationConfig;
use warden_core::error::AppError;
use warden_core::traits::Navigator;

use crate::request::{ApiRequest, ApiResponse, TransportFailure};

pub use auth::{AuthAttach, AuthAttachLayer};
pub use error::{ErrorNormalize, ErrorNormalizeLayer, FailureClass};

/// The assembled pipeline.
pub type ApiService = BoxCloneService<ApiRequest, ApiResponse, AppError>;

/// Wraps `transport` in the interceptor chain.
pub fn build<T>(
    transport: T,
    session: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
    navigation: &NavigationConfig,
) -> ApiService
where
    T: tower::Service<ApiRequest, Response = ApiResponse, Error = TransportFailure>
        + Clone
        + Send
        + 'static,
    T::Future: Send + 'static,
{
    let service = ServiceBuilder::new()
        .layer(AuthAttachLayer::new(session.clone()))
        .layer(ErrorNormalizeLayer::new(session, navigator, navigation))
        .service(transport);
    BoxCloneService::new(service)
}


#[cfg(test)]
mod tests {
    use serde_json::json;
    use tower::ServiceExt;

    use super::test_support::{FakeTransport, navigator, session_with_token};
    use super::*;

    #[tokio::test]
    async fn test_pipeline_attaches_token_and_normalizes_errors() {
        let transport = FakeTransport::failing(401, "Unauthorized", Some(json!({"message": "expired"})));
        let session = session_with_token(Some("abc"));
        let nav = navigator();

        let err = build(transport.clone(), session.clone(), nav.clone(), &NavigationConfig::default())
            .oneshot(ApiRequest::get("/auth/profile"))
            .await
            .unwrap_err();

        assert_eq!(err.message, "expired");
        assert_eq!(
            transport.requests()[0].authorization(),
            Some("Bearer abc")
        );
        assert!(!session.is_authenticated());
        assert_eq!(nav.history(), vec!["/login"]);
    }

    #[tokio::test]
    async fn test_pipeline_passes_success_through() {
        let transport = FakeTransport::ok(json!({"status": "success", "data": {}}));
        let response = build(transport, session_with_token(None), navigator(), &NavigationConfig::default())
            .oneshot(ApiRequest::get("/health"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }
}
