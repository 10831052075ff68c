//! Transport-neutral request and response types.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde::Serialize;
use thiserror::Error;

use warden_core::result::AppResult;

/// An outgoing API call, relative to the configured base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path below the base URL (e.g. `"/users/42"`).
    pub path: String,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HeaderMap,
    /// JSON body.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request without body or query.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// `GET path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST path` with a JSON body.
    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> AppResult<Self> {
        Self::new(Method::POST, path).with_json(body)
    }

    /// `PUT path` with a JSON body.
    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> AppResult<Self> {
        Self::new(Method::PUT, path).with_json(body)
    }

    /// `DELETE path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets the JSON body.
    pub fn with_json<B: Serialize>(mut self, body: &B) -> AppResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// The `Authorization` header, if set and valid UTF-8.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body (`Null` when empty).
    pub body: serde_json::Value,
}

/// A failed call as observed by the transport.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportFailure {
    /// The request never produced an HTTP response (building, encoding, or
    /// decoding failed on this side).
    #[error("client error: {message}")]
    Client {
        /// Underlying error description.
        message: String,
    },
    /// The server answered with a non-success status, or the connection
    /// could not be made (status `0`).
    #[error("HTTP {status} {status_text}")]
    Http {
        /// HTTP status code, `0` when no connection was made.
        status: u16,
        /// Reason phrase.
        status_text: String,
        /// Decoded error body, if any.
        body: Option<serde_json::Value>,
    },
}

impl TransportFailure {
    /// A failure to reach the server at all.
    pub fn unreachable() -> Self {
        Self::Http {
            status: 0,
            status_text: "Unknown Error".to_string(),
            body: None,
        }
    }

    /// The HTTP status, if the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client { .. } => None,
            Self::Http { status, .. } => Some(*status),
        }
    }
}
