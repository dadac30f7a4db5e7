//! Account and session endpoints

use crate::client::ApiClient;
use crate::endpoints::auth as paths;
use crate::error::{ClientError, Result};
use crate::request::PendingRequest;
use crate::types::{
    AuthTokenResponse, ForgotPasswordRequest, LoginRequest, OtpResponse, RegisterRequest,
    ResetPasswordRequest, ResetPasswordResponse, SessionInfo, SessionMeta, UserProfile,
    UserSession, VerifyOtpRequest, VerifyOtpResponse,
};

use super::fetch_list;

/// Authentication facade, see [`ApiClient::auth`]
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create an account
    ///
    /// # Errors
    /// Returns an error if the call fails (e.g. the email is taken)
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserSession> {
        self.client
            .fetch(PendingRequest::post(paths::REGISTER).json(request)?)
            .await
    }

    /// Log in and store the returned access credential
    ///
    /// The session metadata derived from the configured user agent is added
    /// to the request.
    ///
    /// # Errors
    /// Returns [`ClientError::MissingCredential`] if the response carries no
    /// access token, or any error from the call itself
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<AuthTokenResponse> {
        let mut request = LoginRequest::new(email, password);
        request.session_meta_request = Some(SessionMeta::from_user_agent(
            &self.client.config().user_agent,
        ));

        let response: AuthTokenResponse = self
            .client
            .fetch(PendingRequest::post(paths::LOGIN).json(&request)?)
            .await?;

        let Some(credential) = response
            .access_token
            .as_ref()
            .filter(|credential| !credential.as_str().is_empty())
        else {
            tracing::error!(email = %request.email, "Login response carried no access token");
            return Err(ClientError::MissingCredential);
        };

        self.client.credential_store().write(credential)?;
        tracing::info!(email = %request.email, "Logged in");
        Ok(response)
    }

    /// Log out; the stored credential is removed even if the call fails
    ///
    /// # Errors
    /// Returns the error of the logout call, after clearing the store
    pub async fn logout(&self) -> Result<()> {
        let outcome = self.client.fetch_unit(PendingRequest::post(paths::LOGOUT)).await;
        self.client.credential_store().clear()?;
        tracing::info!("Logged out");
        outcome
    }

    /// Current user
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn current_user(&self) -> Result<UserSession> {
        self.client.fetch(PendingRequest::get(paths::ME)).await
    }

    /// Current user's full profile
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn current_user_details(&self) -> Result<UserProfile> {
        self.client.fetch(PendingRequest::get(paths::ME_DETAILS)).await
    }

    /// Active sessions of the current user
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn sessions(&self) -> Result<Vec<SessionInfo>> {
        fetch_list(self.client, PendingRequest::get(paths::SESSIONS)).await
    }

    /// Revoke one session
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.client
            .fetch_unit(PendingRequest::delete(paths::session(session_id)))
            .await
    }

    /// Send a password reset code
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn forgot_password(&self, email: impl Into<String>) -> Result<OtpResponse> {
        let request = ForgotPasswordRequest {
            email: email.into(),
        };
        self.client
            .fetch(PendingRequest::post(paths::FORGOT_PASSWORD).json(&request)?)
            .await
    }

    /// Send the reset code again
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn resend_otp(&self, email: impl Into<String>) -> Result<OtpResponse> {
        let request = ForgotPasswordRequest {
            email: email.into(),
        };
        self.client
            .fetch(PendingRequest::post(paths::RESEND_OTP).json(&request)?)
            .await
    }

    /// Check a reset code
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<VerifyOtpResponse> {
        self.client
            .fetch(PendingRequest::post(paths::VERIFY_OTP).json(request)?)
            .await
    }

    /// Set a new password with a verified code
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<ResetPasswordResponse> {
        self.client
            .fetch(PendingRequest::post(paths::RESET_PASSWORD).json(request)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialStore;
    use crate::services::testing::fixture;
    use crate::transport::scripted::status;
    use crate::types::AccessCredential;
    use reqwest::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_stores_credential_and_sends_meta() {
        let f = fixture(|_| {
            status(
                StatusCode::OK,
                json!({
                    "message": "Login successful",
                    "data": {
                        "accessToken": "T5",
                        "user": {"id": 1, "email": "a@b.c", "name": "Alice", "role": "USER"}
                    }
                }),
            )
        });

        let response = f.client.auth().login("a@b.c", "pw").await.unwrap();
        assert_eq!(response.user.unwrap().name, "Alice");
        assert_eq!(f.store.read().unwrap(), Some(AccessCredential::new("T5")));

        let sent = &f.transport.sent_to(paths::LOGIN)[0];
        assert_eq!(sent.authorization(), None);
        let body = sent.body().unwrap();
        assert_eq!(body["email"], "a@b.c");
        assert_eq!(body["sessionMetaRequest"]["deviceName"], "Linux Device");
        assert_eq!(body["sessionMetaRequest"]["deviceType"], "desktop");
    }

    #[tokio::test]
    async fn test_login_without_token() {
        let f = fixture(|_| status(StatusCode::OK, json!({"data": {"user": null}})));

        let err = f.client.auth().login("a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, ClientError::MissingCredential));
        // Previous credential untouched
        assert_eq!(f.store.read().unwrap(), Some(AccessCredential::new("T1")));
    }

    #[tokio::test]
    async fn test_logout_clears_store_even_on_failure() {
        let f = fixture(|_| status(StatusCode::INTERNAL_SERVER_ERROR, json!({"message": "boom"})));

        let err = f.client.auth().logout().await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(f.store.read().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sessions_absent_data_is_empty() {
        let f = fixture(|_| status(StatusCode::OK, json!({"message": "ok", "data": null})));
        assert!(f.client.auth().sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sessions_and_delete() {
        let f = fixture(|request: &PendingRequest| {
            if request.path() == paths::SESSIONS {
                status(
                    StatusCode::OK,
                    json!({"data": [{"sessionId": "s-1", "deviceName": "Mac Device", "current": true}]}),
                )
            } else {
                status(StatusCode::OK, json!({"message": "Session deleted"}))
            }
        });

        let sessions = f.client.auth().sessions().await.unwrap();
        assert_eq!(sessions[0].session_id.as_str(), "s-1");
        assert!(sessions[0].current);

        f.client.auth().delete_session("s-1").await.unwrap();
        let sent = &f.transport.sent_to("/api/auth/sessions/s-1")[0];
        assert_eq!(sent.method(), &reqwest::Method::DELETE);
        assert_eq!(sent.authorization(), Some("Bearer T1"));
    }

    #[tokio::test]
    async fn test_password_reset_flow_is_public() {
        let f = fixture(|request: &PendingRequest| match request.path() {
            paths::FORGOT_PASSWORD => status(StatusCode::OK, json!({"message": "OTP sent", "otpId": "o-1"})),
            paths::VERIFY_OTP => status(StatusCode::OK, json!({"message": "OK", "verified": true})),
            _ => status(StatusCode::OK, json!({"message": "Password updated"})),
        });

        let otp = f.client.auth().forgot_password("a@b.c").await.unwrap();
        assert_eq!(otp.otp_id.as_deref(), Some("o-1"));

        let verified = f
            .client
            .auth()
            .verify_otp(&VerifyOtpRequest {
                email: "a@b.c".to_string(),
                otp: "123456".to_string(),
            })
            .await
            .unwrap();
        assert!(verified.verified);

        let reset = f
            .client
            .auth()
            .reset_password(&ResetPasswordRequest {
                email: "a@b.c".to_string(),
                otp: "123456".to_string(),
                new_password: "new-secret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(reset.message, "Password updated");

        for sent in f.transport.sent() {
            assert_eq!(sent.authorization(), None, "{sent} should be public");
        }
        let reset_body = f.transport.sent_to(paths::RESET_PASSWORD)[0].body().cloned().unwrap();
        assert_eq!(reset_body["newPassword"], "new-secret");
    }
}
