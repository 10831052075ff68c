//! API response envelope.
//!
//! The remote API answers with `{status, data, error, requestId, timestamp}`.
//! Some older endpoints still answer with `{success, data, message,
//! request_id}`; both decode into [`ApiEnvelope`], the legacy form being
//! mapped on the way in.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Outcome marker of a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// The call succeeded and `data` is populated.
    Success,
    /// The call failed and `error` is populated.
    Error,
}

/// Error block of a failed envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Canonical response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Success or error.
    pub status: EnvelopeStatus,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error block on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
    /// Server-side request correlation id.
    #[serde(default, rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Server timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct LegacyEnvelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireEnvelope<T> {
    Canonical(ApiEnvelope<T>),
    Legacy(LegacyEnvelope<T>),
}

impl<T> From<LegacyEnvelope<T>> for ApiEnvelope<T> {
    fn from(legacy: LegacyEnvelope<T>) -> Self {
        let (status, error) = if legacy.success {
            (EnvelopeStatus::Success, None)
        } else {
            (
                EnvelopeStatus::Error,
                Some(ApiErrorBody {
                    code: "ERROR".to_string(),
                    message: legacy
                        .message
                        .unwrap_or_else(|| "Request failed".to_string()),
                    details: None,
                }),
            )
        };
        Self {
            status,
            data: legacy.data,
            error,
            request_id: legacy.request_id,
            timestamp: None,
        }
    }
}

impl<T> ApiEnvelope<T> {
    /// Whether the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }

    /// Unwraps the payload, turning an error envelope into an [`AppError`].
    pub fn into_data(self) -> AppResult<T> {
        match self.status {
            EnvelopeStatus::Success => self
                .data
                .ok_or_else(|| AppError::internal("Response envelope carried no data")),
            EnvelopeStatus::Error => Err(AppError::request(
                self.error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "Request failed".to_string()),
            )),
        }
    }
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    /// Decodes either envelope shape from a JSON value.
    pub fn from_value(value: serde_json::Value) -> AppResult<Self> {
        let wire: WireEnvelope<T> = serde_json::from_value(value)?;
        Ok(match wire {
            WireEnvelope::Canonical(envelope) => envelope,
            WireEnvelope::Legacy(legacy) => legacy.into(),
        })
    }
}
