use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Which service reported a failing status. Only changes the error
/// message prefix; the payload is the same either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// Request went through the control-plane proxy routes.
    ControlPlane,
    /// Request went straight to the dataplane.
    Dataplane,
}

impl fmt::Display for ErrorScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorScope::ControlPlane => write!(f, "API Error"),
            ErrorScope::Dataplane => write!(f, "Dataplane Error"),
        }
    }
}

/// Error type for the hand-written dataplane clients.
///
/// Every non-2xx response is surfaced as `Api` with the original status
/// code and the raw body text. No retry or recovery happens here.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{scope}: {} - {body}", .status.as_u16())]
    Api {
        scope: ErrorScope,
        status: StatusCode,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Structured validation error body returned by the dataplane on 422.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpValidationError {
    pub detail: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationIssue {
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Error type for the typed API bindings in [`crate::api`].
///
/// A 422 gets its own variant because it signals request-validation
/// failure; the structured body is parsed when it matches the known
/// shape and carried raw either way.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("validation error: {body}")]
    Validation {
        body: String,
        detail: Option<HttpValidationError>,
    },

    #[error("unexpected status {}: {body}", .status.as_u16())]
    Status { status: StatusCode, body: String },

    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}
