//! Bearer-token attachment.

use std::sync::Arc;
use std::task::{Context, Poll};

use reqwest::header::{AUTHORIZATION, HeaderValue};
use tower::{Layer, Service};
use tracing::warn;

use warden_auth::SessionState;

use crate::request::ApiRequest;

/// Layer that adds `Authorization: Bearer <token>` when a session token is held.
#[derive(Debug, Clone)]
pub struct AuthAttachLayer {
    session: Arc<SessionState>,
}

impl AuthAttachLayer {
    /// Creates the layer.
    pub fn new(session: Arc<SessionState>) -> Self {
        Self { session }
    }
}

impl<S> Layer<S> for AuthAttachLayer {
    type Service = AuthAttach<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthAttach {
            inner,
            session: self.session.clone(),
        }
    }
}

/// Service wrapper for [`AuthAttachLayer`].
#[derive(Debug, Clone)]
pub struct AuthAttach<S> {
    inner: S,
    session: Arc<SessionState>,
}

impl<S> Service<ApiRequest> for AuthAttach<S>
where
    S: Service<ApiRequest>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: ApiRequest) -> Self::Future {
        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    request.headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!(path = %request.path, "Session token is not a valid header value"),
            }
        }
        self.inner.call(request)
    }
}
