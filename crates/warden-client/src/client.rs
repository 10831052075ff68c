//! Envelope-decoding API client.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tower::ServiceExt;
use tracing::debug;

use warden_auth::SessionState;
use warden_core::config::{ApiConfig, NavigationConfig};
use warden_core::result::AppResult;
use warden_core::traits::Navigator;
use warden_core::types::ApiEnvelope;

use crate::pipeline::{self, ApiService};
use crate::request::{ApiRequest, ApiResponse};
use crate::transport::ReqwestTransport;

/// Sends requests through the pipeline and unwraps response envelopes.
///
/// Cheap to clone; clones share the same pipeline.
#[derive(Clone)]
pub struct ApiClient {
    service: Arc<Mutex<ApiService>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Wraps an assembled pipeline.
    pub fn new(service: ApiService) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }

    /// Builds the `reqwest` transport and the interceptor chain from configuration.
    pub fn from_config(
        api: &ApiConfig,
        navigation: &NavigationConfig,
        session: Arc<SessionState>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let transport = ReqwestTransport::new(api)?;
        Ok(Self::new(pipeline::build(
            transport, session, navigator, navigation,
        )))
    }

    /// Sends a raw request through the pipeline.
    pub async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let service = self
            .service
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        service.oneshot(request).await
    }

    /// Sends a request and decodes the envelope payload.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> AppResult<T> {
        let path = request.path.clone();
        let response = self.send(request).await?;
        let envelope = ApiEnvelope::<T>::from_value(response.body)?;
        debug!(
            path = %path,
            status = response.status,
            request_id = ?envelope.request_id,
            "Decoded response envelope"
        );
        envelope.into_data()
    }

    /// `GET path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.call(ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        self.call(ApiRequest::post(path, body)?).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        self.call(ApiRequest::put(path, body)?).await
    }

    /// `DELETE path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.call(ApiRequest::delete(path)).await
    }
}
