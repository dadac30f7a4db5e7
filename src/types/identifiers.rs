//! Newtype wrappers for type safety

use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

// ============================================================================
// Access Credential
// ============================================================================

/// Short-lived bearer token authorizing API calls.
///
/// The value is opaque: no expiry metadata is available client-side. `Debug`
/// never prints the token itself.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessCredential(String);

impl AccessCredential {
    /// Wrap a raw token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Bearer <token>` as a string
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// `Bearer <token>` as a sensitive header value.
    ///
    /// Returns `None` if the token contains bytes that are not legal in a header.
    #[must_use]
    pub fn header_value(&self) -> Option<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.bearer()).ok()?;
        value.set_sensitive(true);
        Some(value)
    }
}

impl std::fmt::Debug for AccessCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessCredential(<{} bytes>)", self.0.len())
    }
}

impl From<String> for AccessCredential {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccessCredential {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ============================================================================
// Session ID
// ============================================================================

/// Identifier of a server-side login session (one per device)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the session ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
