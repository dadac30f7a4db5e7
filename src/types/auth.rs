//! Authentication and account types

use serde::{Deserialize, Serialize};

use super::identifiers::{AccessCredential, SessionId};

// ============================================================================
// Session Metadata
// ============================================================================

/// Device/session fingerprint sent with login and refresh calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    /// Raw user agent string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Client IP, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Coarse device name ("Mac Device", "Android Device", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    /// `desktop`, `mobile` or `tablet`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

impl SessionMeta {
    /// Derive session metadata from a user agent string
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        let is_mobile = ["Mobile", "Android", "iPhone", "iPad"]
            .iter()
            .any(|needle| user_agent.contains(needle));
        let device_type = if !is_mobile {
            "desktop"
        } else if user_agent.contains("iPad") {
            "tablet"
        } else {
            "mobile"
        };

        // Android UAs mention Linux and iOS UAs mention Mac OS X, so test those first.
        let device_name = if user_agent.contains("Windows") {
            "Windows Device"
        } else if user_agent.contains("Android") {
            "Android Device"
        } else if user_agent.contains("iPhone") || user_agent.contains("iPad") {
            "iOS Device"
        } else if user_agent.contains("Mac") {
            "Mac Device"
        } else if user_agent.contains("Linux") {
            "Linux Device"
        } else {
            "Unknown Device"
        };

        Self {
            user_agent: Some(user_agent.to_string()),
            ip_address: None,
            device_name: Some(device_name.to_string()),
            device_type: Some(device_type.to_string()),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Login request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// Filled in by the client before sending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_meta_request: Option<SessionMeta>,
}

impl LoginRequest {
    /// Create a login request without session metadata
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            session_meta_request: None,
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// Display name
    pub name: String,
}

/// Forgot-password / resend-OTP request
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    /// Account email
    pub email: String,
}

/// OTP verification request
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest {
    /// Account email
    pub email: String,
    /// One-time code received by email
    pub otp: String,
}

/// Password reset request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// Account email
    pub email: String,
    /// Verified one-time code
    pub otp: String,
    /// New password
    pub new_password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Result of login (and the payload shape of refresh)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResponse {
    /// Logged-in user; refresh responses may omit it
    #[serde(default)]
    pub user: Option<UserSession>,
    /// New access credential
    #[serde(default)]
    pub access_token: Option<AccessCredential>,
}

/// Current user as seen by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// User ID
    pub id: i64,
    /// Email
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar URL
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Single role name
    pub role: String,
    /// Permission names granted through the role
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Last update timestamp (ISO-8601)
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl UserSession {
    /// Whether the user holds a permission
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Gender on the user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other
    Other,
}

/// Extended profile of the current user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User ID
    pub id: i64,
    /// Email
    pub email: String,
    /// Display name
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    #[serde(default)]
    pub date_birth: Option<String>,
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Gender
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Avatar URL
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One active login session of the current user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// Session identifier
    pub session_id: SessionId,
    /// User agent recorded at login
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Device name recorded at login
    #[serde(default)]
    pub device_name: Option<String>,
    /// Device type recorded at login
    #[serde(default)]
    pub device_type: Option<String>,
    /// Login timestamp
    #[serde(default)]
    pub login_at: Option<String>,
    /// Whether this is the session making the call
    #[serde(default)]
    pub current: bool,
}

/// Response to forgot-password and resend-OTP
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpResponse {
    /// Status message
    pub message: String,
    /// OTP handle, if the backend exposes one
    #[serde(default)]
    pub otp_id: Option<String>,
}

/// Response to OTP verification
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpResponse {
    /// Status message
    pub message: String,
    /// Whether the code was accepted
    #[serde(default)]
    pub verified: bool,
}

/// Response to a password reset
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordResponse {
    /// Status message
    pub message: String,
}
