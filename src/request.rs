//! Outgoing request descriptors
//!
//! A [`PendingRequest`] is an immutable attempt value: attaching a credential
//! or marking the attempt as a retry produces a new value. The `retried`
//! marker is what keeps a request from being refreshed and replayed more than
//! once.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::types::AccessCredential;

/// One attempt at an API call
#[derive(Debug, Clone)]
pub struct PendingRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl PendingRequest {
    /// Create a request for `path` (relative to the gateway base URL)
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            retried: false,
        }
    }

    /// `GET path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST path`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT path`
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `PATCH path`
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append several query parameters
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Set a header
    ///
    /// # Errors
    ///
    /// Returns an error if the name or value is not a legal header.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::invalid_config(format!("Invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::invalid_config(format!("Invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// HTTP method
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Headers
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// JSON body, if any
    #[must_use]
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Whether this attempt is already the one allowed replay
    #[must_use]
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// `Authorization` header currently attached, if any
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
    }

    /// Copy with `Authorization: Bearer <credential>`
    ///
    /// A credential that is not a legal header value is not attached.
    #[must_use]
    pub fn with_bearer(&self, credential: &AccessCredential) -> Self {
        let mut next = self.clone();
        match credential.header_value() {
            Some(value) => {
                next.headers.insert(AUTHORIZATION, value);
            }
            None => {
                tracing::warn!(path = %self.path, "Stored credential is not a valid header value");
                next.headers.remove(AUTHORIZATION);
            }
        }
        next
    }

    /// Copy without an `Authorization` header
    #[must_use]
    pub fn without_authorization(&self) -> Self {
        let mut next = self.clone();
        next.headers.remove(AUTHORIZATION);
        next
    }

    /// The replay of this attempt, with the retry marker set
    #[must_use]
    pub fn into_retry(mut self) -> Self {
        self.retried = true;
        self
    }
}

impl std::fmt::Display for PendingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
