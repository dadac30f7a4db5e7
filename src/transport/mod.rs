//! Transport layer between the client and the API gateway
//!
//! The [`Transport`] trait sends one [`PendingRequest`] and hands back the raw
//! [`ApiResponse`], whatever its status. Interpreting statuses (authentication
//! recovery, error mapping) is the client's job, not the transport's.

pub mod http;

#[cfg(test)]
pub(crate) mod scripted;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::request::PendingRequest;
use crate::types::unwrap_envelope;
use crate::utils::body_preview;

/// Transport trait for sending requests to the gateway
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request attempt
    ///
    /// Non-success statuses are returned as `Ok`; only failures to obtain a
    /// response at all are errors.
    ///
    /// # Errors
    /// Returns error if the request cannot be sent or the body cannot be read
    async fn send(&self, request: &PendingRequest) -> Result<ApiResponse>;
}

/// Raw response from the gateway
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Assemble a response
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Response with a JSON body and no headers
    #[must_use]
    pub fn json_body(status: StatusCode, body: &serde_json::Value) -> Self {
        Self::new(status, HeaderMap::new(), body.to_string().into_bytes())
    }

    /// HTTP status
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as lossy UTF-8 text
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body as JSON; an empty body reads as `null`
    ///
    /// # Errors
    /// Returns error if the body is not valid JSON
    pub fn json_value(&self) -> Result<serde_json::Value> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as `T`, after unwrapping one optional envelope layer
    ///
    /// # Errors
    /// Returns error if the payload does not match `T`
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T> {
        let value = unwrap_envelope(self.json_value()?);
        serde_json::from_value(value).map_err(|e| {
            ClientError::invalid_response(format!(
                "Unexpected payload: {e} - Response: {}",
                body_preview(&self.body, 200)
            ))
        })
    }

    /// Envelope `message` field, if the body is a JSON object carrying one
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.envelope_field("message")
    }

    /// Envelope `errorCode` field, if present
    #[must_use]
    pub fn error_code(&self) -> Option<String> {
        self.envelope_field("errorCode")
    }

    fn envelope_field(&self, field: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        value.get(field)?.as_str().map(str::to_string)
    }

    /// Convert a non-success response into [`ClientError::Api`]
    ///
    /// # Errors
    /// Returns `ClientError::Api` if the status is not 2xx
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.into_error())
        }
    }

    /// Build the API error describing this response
    #[must_use]
    pub fn into_error(self) -> ClientError {
        ClientError::api(self.status, self.message(), self.error_code())
    }
}

pub use http::HttpTransport;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Token {
        access_token: String,
    }

    #[test]
    fn test_payload_unwraps_envelope() {
        let response = ApiResponse::json_body(
            StatusCode::OK,
            &json!({"message": "ok", "data": {"accessToken": "T2"}}),
        );
        let token: Token = response.payload().unwrap();
        assert_eq!(token.access_token, "T2");
    }

    #[test]
    fn test_payload_bare() {
        let response = ApiResponse::json_body(StatusCode::OK, &json!({"accessToken": "T2"}));
        let token: Token = response.payload().unwrap();
        assert_eq!(token.access_token, "T2");
    }

    #[test]
    fn test_payload_mismatch_is_invalid_response() {
        let response = ApiResponse::json_body(StatusCode::OK, &json!({"data": [1, 2]}));
        let result: Result<Token> = response.payload();
        assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
    }

    #[test]
    fn test_empty_body_is_null() {
        let response = ApiResponse::new(StatusCode::NO_CONTENT, HeaderMap::new(), Vec::new());
        assert_eq!(response.json_value().unwrap(), serde_json::Value::Null);
        assert!(response.message().is_none());
    }

    #[test]
    fn test_error_for_status() {
        let response = ApiResponse::json_body(
            StatusCode::BAD_REQUEST,
            &json!({"message": "Quantity must be positive", "errorCode": "VALIDATION"}),
        );
        match response.error_for_status() {
            Err(ClientError::Api {
                status,
                message,
                error_code,
            }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message.as_deref(), Some("Quantity must be positive"));
                assert_eq!(error_code.as_deref(), Some("VALIDATION"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }
}
