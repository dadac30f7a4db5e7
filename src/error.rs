//! Error types for the storefront client

use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::StoreError;

/// Main error type for the storefront client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API answered with a non-success status
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        /// HTTP status returned by the gateway
        status: StatusCode,
        /// `message` field of the response envelope, if any
        message: Option<String>,
        /// `errorCode` field of the response envelope, if any
        error_code: Option<String>,
    },

    /// The gateway rejected the call because it did not come through the gateway
    #[error(
        "Gateway error: requests must go through the API gateway at {base_url}. Check that the gateway is running and configured"
    )]
    GatewayMisconfigured {
        /// Base URL the client is configured with
        base_url: String,
    },

    /// A login or refresh payload carried no access token
    #[error("No access token in authentication response")]
    MissingCredential,

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Credential store error
    #[error("Credential store error: {0}")]
    Storage(#[from] StoreError),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for storefront client operations
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Create an API error from a status and optional envelope fields
    pub fn api(status: StatusCode, message: Option<String>, error_code: Option<String>) -> Self {
        Self::Api {
            status,
            message,
            error_code,
        }
    }

    /// Create a gateway misconfiguration error
    pub fn gateway_misconfigured(base_url: impl Into<String>) -> Self {
        Self::GatewayMisconfigured {
            base_url: base_url.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// HTTP status carried by this error, if it came from an API response
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the caller is looking at an authentication failure
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
