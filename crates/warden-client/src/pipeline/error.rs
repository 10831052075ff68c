//! Failure normalization.
//!
//! Converts [`TransportFailure`]s into a single user-facing message and, on
//! `401`, ends the session and sends the user back to the login page.

use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use serde::Serialize;
use tower::{Layer, Service};
use tracing::{error, info};

use warden_auth::SessionState;
use warden_core::config::NavigationConfig;
use warden_core::error::AppError;
use warden_core::traits::Navigator;

use crate::request::{ApiRequest, ApiResponse, TransportFailure};

/// Category of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// No HTTP exchange took place.
    Transport,
    /// The server could not be reached (status `0`).
    Connectivity,
    /// `401`; the session is ended.
    Authentication,
    /// `403`.
    Authorization,
    /// `404`.
    NotFound,
    /// `500`.
    Server,
    /// Any other status.
    Unclassified,
    /// The server sent its own message, which is shown verbatim.
    ServerSupplied,
}

impl FailureClass {
    /// Category implied by the status alone.
    pub fn of_status(status: Option<u16>) -> Self {
        match status {
            None => Self::Transport,
            Some(0) => Self::Connectivity,
            Some(401) => Self::Authentication,
            Some(403) => Self::Authorization,
            Some(404) => Self::NotFound,
            Some(500) => Self::Server,
            Some(_) => Self::Unclassified,
        }
    }

    /// Category of `failure`; a payload message wins over the status.
    pub fn classify(failure: &TransportFailure) -> Self {
        if payload_message(failure).is_some() {
            Self::ServerSupplied
        } else {
            Self::of_status(failure.status())
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transport => "transport",
            Self::Connectivity => "connectivity",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Server => "server",
            Self::Unclassified => "unclassified",
            Self::ServerSupplied => "server_supplied",
        };
        f.write_str(name)
    }
}

fn non_empty(value: &serde_json::Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Top-level `message` of the error body, if any.
///
/// `error.message` of a canonical envelope is not consulted; those failures
/// get the category message for their status.
fn payload_message(failure: &TransportFailure) -> Option<&str> {
    let TransportFailure::Http { body: Some(body), .. } = failure else {
        return None;
    };
    body.get("message").and_then(non_empty)
}

/// The message shown to the user for `failure`.
pub fn user_message(failure: &TransportFailure) -> String {
    if let Some(message) = payload_message(failure) {
        return message.to_string();
    }
    match failure {
        TransportFailure::Client { message } => format!("Client Error: {message}"),
        TransportFailure::Http {
            status,
            status_text,
            ..
        } => match FailureClass::of_status(Some(*status)) {
            FailureClass::Connectivity => {
                "Unable to connect to server. Please check your internet connection.".to_string()
            }
            FailureClass::Authentication => "Authentication failed. Please login again.".to_string(),
            FailureClass::Authorization => {
                "Access denied. You do not have permission to perform this action.".to_string()
            }
            FailureClass::NotFound => "The requested resource was not found.".to_string(),
            FailureClass::Server => "Internal server error. Please try again later.".to_string(),
            _ => format!("Server Error: {status} - {status_text}"),
        },
    }
}

/// Side effects and message mapping shared by every [`ErrorNormalize`] clone.
#[derive(Debug, Clone)]
struct FailureHandler {
    session: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl FailureHandler {
    fn handle(&self, method: &str, path: &str, failure: TransportFailure) -> AppError {
        let class = FailureClass::classify(&failure);
        let message = user_message(&failure);

        error!(
            method = %method,
            path = %path,
            status = ?failure.status(),
            class = %class,
            message = %message,
            "API request failed"
        );

        if failure.status() == Some(401) {
            info!("Authentication rejected, ending session");
            self.session.logout();
            self.navigator.navigate(&[&self.login_path]);
        }

        AppError::request(message)
    }
}

/// Layer that normalizes transport failures into [`AppError`]s.
#[derive(Debug, Clone)]
pub struct ErrorNormalizeLayer {
    handler: FailureHandler,
}

impl ErrorNormalizeLayer {
    /// Creates the layer.
    pub fn new(
        session: Arc<SessionState>,
        navigator: Arc<dyn Navigator>,
        navigation: &NavigationConfig,
    ) -> Self {
        Self {
            handler: FailureHandler {
                session,
                navigator,
                login_path: navigation.login_path.clone(),
            },
        }
    }
}

impl<S> Layer<S> for ErrorNormalizeLayer {
    type Service = ErrorNormalize<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorNormalize {
            inner,
            handler: self.handler.clone(),
        }
    }
}

/// Service wrapper for [`ErrorNormalizeLayer`].
#[derive(Debug, Clone)]
pub struct ErrorNormalize<S> {
    inner: S,
    handler: FailureHandler,
}

impl<S> Service<ApiRequest> for ErrorNormalize<S>
where
    S: Service<ApiRequest, Response = ApiResponse, Error = TransportFailure>,
    S::Future: Send + 'static,
{
    type Response = ApiResponse;
    type Error = AppError;
    type Future = BoxFuture<'static, Result<ApiResponse, AppError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner
            .poll_ready(cx)
            .map_err(|failure| self.handler.handle("-", "-", failure))
    }

    fn call(&mut self, request: ApiRequest) -> Self::Future {
        let method = request.method.to_string();
        let path = request.path.clone();
        let handler = self.handler.clone();
        let fut = self.inner.call(request);
        Box::pin(async move {
            fut.await
                .map_err(|failure| handler.handle(&method, &path, failure))
        })
    }
}
