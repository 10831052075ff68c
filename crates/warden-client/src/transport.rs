//! HTTP transport backed by `reqwest`.

use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Url};
use tower::Service;
use tracing::debug;

use warden_core::config::ApiConfig;
use warden_core::error::{AppError, ErrorKind};

use crate::request::{ApiRequest, ApiResponse, TransportFailure};

/// Sends [`ApiRequest`]s to the configured base URL.
///
/// Connection and timeout failures surface as status `0`; anything that goes
/// wrong before a request is sent or while reading the body surfaces as
/// [`TransportFailure::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: ApiConfig,
}

impl ReqwestTransport {
    /// Builds the underlying `reqwest` client.
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid user agent '{}': {e}", config.user_agent),
                    e,
                )
            })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportFailure> {
        let raw = self.config.url(&request.path);
        let mut url = Url::parse(&raw).map_err(|e| TransportFailure::Client {
            message: format!("invalid URL '{raw}': {e}"),
        })?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    async fn send(client: Client, url: Url, request: ApiRequest) -> Result<ApiResponse, TransportFailure> {
        debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = client.request(request.method, url).headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status();
        let text = response.text().await.map_err(|e| TransportFailure::Client {
            message: format!("failed to read response body: {e}"),
        })?;
        let body = parse_body(&text);

        if status.is_success() {
            return Ok(ApiResponse {
                status: status.as_u16(),
                body: body.unwrap_or(serde_json::Value::Null),
            });
        }

        Err(TransportFailure::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown Error").to_string(),
            body,
        })
    }
}

impl Service<ApiRequest> for ReqwestTransport {
    type Response = ApiResponse;
    type Error = TransportFailure;
    type Future = BoxFuture<'static, Result<ApiResponse, TransportFailure>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: ApiRequest) -> Self::Future {
        let client = self.client.clone();
        let url = self.url_for(&request);
        Box::pin(async move { Self::send(client, url?, request).await })
    }
}

fn map_send_error(err: reqwest::Error) -> TransportFailure {
    if err.is_connect() || err.is_timeout() {
        debug!(error = %err, "Server unreachable");
        TransportFailure::unreachable()
    } else {
        TransportFailure::Client {
            message: err.to_string(),
        }
    }
}

/// Decodes a body as JSON; non-JSON text is kept as a string value.
fn parse_body(text: &str) -> Option<serde_json::Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(
        serde_json::from_str(text)
            .unwrap_or_else(|_| serde_json::Value::String(text.to_string())),
    )
}

#[cfg(test)]
mod tests {
    use tower::ServiceExt;

    use super::*;

    fn transport(base_url: &str) -> ReqwestTransport {
        ReqwestTransport::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 2,
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_url_includes_query() {
        let t = transport("http://api.test/v1/");
        let request = ApiRequest::get("/admin/logs").with_query("limit", 100);
        let url = t.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://api.test/v1/admin/logs?limit=100");
    }

    #[test]
    fn test_invalid_base_url_is_client_failure() {
        let t = transport("not a url");
        assert!(matches!(
            t.url_for(&ApiRequest::get("/x")),
            Err(TransportFailure::Client { .. })
        ));
    }

    #[test]
    fn test_invalid_user_agent_is_configuration_error() {
        let err = ReqwestTransport::new(&ApiConfig {
            user_agent: "warden\nbroken".to_string(),
            ..ApiConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.starts_with("Invalid user agent"));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body("{\"a\":1}"), Some(serde_json::json!({"a": 1})));
        assert_eq!(
            parse_body("Bad Gateway"),
            Some(serde_json::Value::String("Bad Gateway".to_string()))
        );
    }

    #[tokio::test]
    async fn test_refused_connection_is_status_zero() {
        // bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let failure = transport(&format!("http://127.0.0.1:{port}"))
            .oneshot(ApiRequest::get("/health"))
            .await
            .unwrap_err();
        assert_eq!(failure.status(), Some(0));
    }
}
