//! Silent session refresh
//!
//! When a protected call comes back 401, the client asks the
//! [`SessionRefresher`] for a new access credential. The refresher POSTs the
//! refresh endpoint directly through the transport (never through the
//! client, so a failing refresh cannot recurse), with the session metadata
//! as JSON body. The long-lived refresh credential rides the transport's
//! cookie jar.
//!
//! With coalescing enabled, refreshes are serialized behind an async gate:
//! a caller whose rejected attempt carried a credential, and that queued
//! behind a refresh which already replaced it, reuses the stored one instead
//! of calling the endpoint again. An attempt that carried no credential
//! always refreshes.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::callbacks::ExpiryReason;
use crate::error::ClientError;
use crate::request::PendingRequest;
use crate::transport::Transport;
use crate::types::{AccessCredential, AuthTokenResponse, SessionMeta};

use super::store::SharedCredentialStore;

/// Phase of one logical request's authentication recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// First attempt in flight
    Idle,
    /// A 401 was seen; obtaining a new credential
    Refreshing,
    /// The single replay has been issued; further 401s propagate
    Retried,
}

impl RefreshState {
    /// Starting state for an attempt; an attempt already marked as the
    /// replay starts out `Retried`
    #[must_use]
    pub fn for_attempt(request: &PendingRequest) -> Self {
        if request.is_retried() {
            Self::Retried
        } else {
            Self::Idle
        }
    }

    /// State after a 401, or `None` when the 401 must propagate
    #[must_use]
    pub fn after_rejection(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Refreshing),
            Self::Refreshing | Self::Retried => None,
        }
    }

    /// State after a credential was recovered and the replay issued
    #[must_use]
    pub fn after_recovery(self) -> Self {
        debug_assert_eq!(self, Self::Refreshing);
        Self::Retried
    }
}

/// How a credential was recovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// The refresh endpoint issued a new credential
    Refreshed(AccessCredential),
    /// Another caller already refreshed; the stored credential is reused
    Reused(AccessCredential),
}

impl Recovery {
    /// The recovered credential
    #[must_use]
    pub fn credential(&self) -> &AccessCredential {
        match self {
            Self::Refreshed(credential) | Self::Reused(credential) => credential,
        }
    }
}

/// A refresh attempt that did not produce a credential
#[derive(Debug, Error)]
#[error("Session refresh failed: {reason}")]
pub struct RefreshFailure {
    /// Classified cause, as reported to session observers
    pub reason: ExpiryReason,
    /// Underlying error
    #[source]
    pub error: ClientError,
}

impl RefreshFailure {
    fn new(reason: ExpiryReason, error: ClientError) -> Self {
        Self { reason, error }
    }
}

/// Obtains new access credentials from the refresh endpoint
pub struct SessionRefresher {
    transport: Arc<dyn Transport>,
    store: SharedCredentialStore,
    refresh_path: String,
    session_meta: SessionMeta,
    coalesce: bool,
    gate: Mutex<()>,
}

impl std::fmt::Debug for SessionRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRefresher")
            .field("refresh_path", &self.refresh_path)
            .field("session_meta", &self.session_meta)
            .field("coalesce", &self.coalesce)
            .finish_non_exhaustive()
    }
}

impl SessionRefresher {
    /// Create a refresher
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        store: SharedCredentialStore,
        refresh_path: impl Into<String>,
        session_meta: SessionMeta,
        coalesce: bool,
    ) -> Self {
        Self {
            transport,
            store,
            refresh_path: refresh_path.into(),
            session_meta,
            coalesce,
            gate: Mutex::new(()),
        }
    }

    /// Recover from a 401 that was answered to `stale` (the credential the
    /// failed attempt carried, if any).
    ///
    /// Only an attempt that carried a credential can be satisfied by a
    /// concurrent refresh; `stale == None` always calls the refresh endpoint.
    ///
    /// # Errors
    /// Returns [`RefreshFailure`] if no credential could be obtained. The
    /// store is left as is; clearing it is the caller's decision.
    pub async fn recover(
        &self,
        stale: Option<&AccessCredential>,
    ) -> Result<Recovery, RefreshFailure> {
        if !self.coalesce {
            return self.call_refresh().await.map(Recovery::Refreshed);
        }

        let _gate = self.gate.lock().await;
        let Some(stale) = stale else {
            return self.call_refresh().await.map(Recovery::Refreshed);
        };
        match self.store.read() {
            Ok(Some(current)) if &current != stale => {
                tracing::debug!("Credential already refreshed by a concurrent request; reusing it");
                return Ok(Recovery::Reused(current));
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Could not read credential store before refresh"),
        }
        self.call_refresh().await.map(Recovery::Refreshed)
    }

    /// Refresh unconditionally, still behind the gate when coalescing
    ///
    /// # Errors
    /// Returns [`RefreshFailure`] if no credential could be obtained
    pub async fn refresh(&self) -> Result<AccessCredential, RefreshFailure> {
        if self.coalesce {
            let _gate = self.gate.lock().await;
            self.call_refresh().await
        } else {
            self.call_refresh().await
        }
    }

    async fn call_refresh(&self) -> Result<AccessCredential, RefreshFailure> {
        tracing::info!(path = %self.refresh_path, "Refreshing access credential");

        let request = PendingRequest::post(self.refresh_path.as_str())
            .json(&self.session_meta)
            .map_err(|e| RefreshFailure::new(ExpiryReason::Transport(e.to_string()), e))?;

        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Refresh call failed");
                return Err(RefreshFailure::new(
                    ExpiryReason::Transport(e.to_string()),
                    e,
                ));
            }
        };

        if !response.is_success() {
            let status = response.status();
            tracing::warn!(%status, "Refresh rejected");
            return Err(RefreshFailure::new(
                ExpiryReason::RefreshRejected { status },
                response.into_error(),
            ));
        }

        let credential = response
            .payload::<AuthTokenResponse>()
            .ok()
            .and_then(|payload| payload.access_token)
            .filter(|credential| !credential.as_str().is_empty())
            .ok_or_else(|| {
                tracing::warn!("Refresh response carried no access token");
                RefreshFailure::new(ExpiryReason::MissingCredential, ClientError::MissingCredential)
            })?;

        if let Err(e) = self.store.write(&credential) {
            tracing::warn!(error = %e, "Could not persist refreshed credential");
        }
        tracing::info!("Access credential refreshed");
        Ok(credential)
    }

    /// Whether refreshes are coalesced
    #[must_use]
    pub fn is_coalescing(&self) -> bool {
        self.coalesce
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialStore, MemoryCredentialStore};
    use crate::transport::scripted::{ScriptedTransport, status};
    use reqwest::StatusCode;
    use serde_json::json;

    const REFRESH: &str = "/api/auth/refresh-token";

    fn refresher(
        transport: &Arc<ScriptedTransport>,
        store: &Arc<MemoryCredentialStore>,
        coalesce: bool,
    ) -> SessionRefresher {
        SessionRefresher::new(
            transport.clone(),
            store.clone(),
            REFRESH,
            SessionMeta::from_user_agent("Mozilla/5.0 (Windows NT 10.0)"),
            coalesce,
        )
    }

    #[tokio::test]
    async fn test_refresh_stores_new_credential() {
        let transport = Arc::new(ScriptedTransport::new(|_| {
            status(StatusCode::OK, json!({"message": "ok", "data": {"accessToken": "T2"}}))
        }));
        let store = Arc::new(MemoryCredentialStore::with_credential(AccessCredential::new("T1")));
        let refresher = refresher(&transport, &store, true);

        let recovery = refresher.recover(Some(&AccessCredential::new("T1"))).await.unwrap();
        assert_eq!(recovery, Recovery::Refreshed(AccessCredential::new("T2")));
        assert_eq!(store.read().unwrap(), Some(AccessCredential::new("T2")));

        let sent = transport.sent_to(REFRESH);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method(), &reqwest::Method::POST);
        assert_eq!(sent[0].authorization(), None);
        let body = sent[0].body().unwrap();
        assert_eq!(body["deviceType"], "desktop");
        assert_eq!(body["deviceName"], "Windows Device");
    }

    #[tokio::test]
    async fn test_bare_token_payload() {
        let transport = Arc::new(ScriptedTransport::new(|_| {
            status(StatusCode::OK, json!({"accessToken": "T2"}))
        }));
        let store = Arc::new(MemoryCredentialStore::new());
        let refresher = refresher(&transport, &store, false);

        assert_eq!(refresher.refresh().await.unwrap(), AccessCredential::new("T2"));
    }

    #[tokio::test]
    async fn test_rejected_refresh() {
        let transport = Arc::new(ScriptedTransport::new(|_| {
            status(StatusCode::UNAUTHORIZED, json!({"message": "Refresh token expired"}))
        }));
        let store = Arc::new(MemoryCredentialStore::with_credential(AccessCredential::new("T1")));
        let refresher = refresher(&transport, &store, true);

        let failure = refresher.recover(Some(&AccessCredential::new("T1"))).await.unwrap_err();
        assert_eq!(
            failure.reason,
            ExpiryReason::RefreshRejected {
                status: StatusCode::UNAUTHORIZED
            }
        );
        assert!(failure.error.is_unauthorized());
        // Clearing is up to the caller
        assert_eq!(store.read().unwrap(), Some(AccessCredential::new("T1")));
    }

    #[tokio::test]
    async fn test_success_without_token() {
        let transport = Arc::new(ScriptedTransport::new(|_| {
            status(StatusCode::OK, json!({"message": "ok", "data": {"user": null}}))
        }));
        let store = Arc::new(MemoryCredentialStore::new());
        let refresher = refresher(&transport, &store, true);

        let failure = refresher.refresh().await.unwrap_err();
        assert_eq!(failure.reason, ExpiryReason::MissingCredential);
        assert!(matches!(failure.error, ClientError::MissingCredential));
        assert!(store.read().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let transport = Arc::new(ScriptedTransport::fallible(|_| {
            Err(ClientError::invalid_response("connection reset"))
        }));
        let store = Arc::new(MemoryCredentialStore::new());
        let refresher = refresher(&transport, &store, true);

        let failure = refresher.refresh().await.unwrap_err();
        assert!(matches!(failure.reason, ExpiryReason::Transport(_)));
    }

    #[tokio::test]
    async fn test_reuses_credential_refreshed_elsewhere() {
        let transport = Arc::new(ScriptedTransport::new(|_| {
            status(StatusCode::OK, json!({"accessToken": "T3"}))
        }));
        let store = Arc::new(MemoryCredentialStore::with_credential(AccessCredential::new("T2")));
        let refresher = refresher(&transport, &store, true);

        let recovery = refresher.recover(Some(&AccessCredential::new("T1"))).await.unwrap();
        assert_eq!(recovery, Recovery::Reused(AccessCredential::new("T2")));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_uncoalesced_always_calls() {
        let transport = Arc::new(ScriptedTransport::new(|_| {
            status(StatusCode::OK, json!({"accessToken": "T3"}))
        }));
        let store = Arc::new(MemoryCredentialStore::with_credential(AccessCredential::new("T2")));
        let refresher = refresher(&transport, &store, false);

        let recovery = refresher.recover(Some(&AccessCredential::new("T1"))).await.unwrap();
        assert_eq!(recovery.credential(), &AccessCredential::new("T3"));
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_recoveries_share_one_call() {
        let transport = Arc::new(ScriptedTransport::new(|_| {
            status(StatusCode::OK, json!({"accessToken": "T2"}))
        }));
        let store = Arc::new(MemoryCredentialStore::with_credential(AccessCredential::new("T1")));
        let refresher = refresher(&transport, &store, true);
        let stale = AccessCredential::new("T1");

        let (a, b) = tokio::join!(refresher.recover(Some(&stale)), refresher.recover(Some(&stale)));

        assert_eq!(a.unwrap().credential(), &AccessCredential::new("T2"));
        assert_eq!(b.unwrap().credential(), &AccessCredential::new("T2"));
        assert_eq!(transport.sent_to(REFRESH).len(), 1);
    }

    #[tokio::test]
    async fn test_credential_less_attempt_always_refreshes() {
        let transport = Arc::new(ScriptedTransport::new(|_| {
            status(StatusCode::OK, json!({"accessToken": "T2"}))
        }));
        let store = Arc::new(MemoryCredentialStore::with_credential(AccessCredential::new("T1")));
        let refresher = refresher(&transport, &store, true);

        let recovery = refresher.recover(None).await.unwrap();
        assert_eq!(recovery, Recovery::Refreshed(AccessCredential::new("T2")));
        assert_eq!(transport.sent_to(REFRESH).len(), 1);
    }

    #[test]
    fn test_state_transitions() {
        let fresh = PendingRequest::get("/api/users/me");
        let state = RefreshState::for_attempt(&fresh);
        assert_eq!(state, RefreshState::Idle);

        let state = state.after_rejection().unwrap();
        assert_eq!(state, RefreshState::Refreshing);
        assert_eq!(state.after_rejection(), None);

        let state = state.after_recovery();
        assert_eq!(state, RefreshState::Retried);
        assert_eq!(state.after_rejection(), None);

        assert_eq!(RefreshState::for_attempt(&fresh.into_retry()), RefreshState::Retried);
    }
}
