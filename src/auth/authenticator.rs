//! Bearer credential attachment
//!
//! Every outgoing request passes through [`RequestAuthenticator::authenticate`].
//! Public paths never carry a credential; everything else carries the stored
//! one when there is one, and goes out unauthenticated otherwise.

use crate::endpoints;
use crate::request::PendingRequest;
use crate::types::AccessCredential;

use super::store::SharedCredentialStore;

/// Path prefixes exempt from credential attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicEndpoints {
    prefixes: Vec<String>,
}

impl Default for PublicEndpoints {
    fn default() -> Self {
        Self::new([
            endpoints::catalog::PRODUCTS,
            endpoints::catalog::CATEGORIES,
            endpoints::auth::LOGIN,
            endpoints::auth::REGISTER,
            endpoints::auth::LOGOUT,
            endpoints::auth::REFRESH_TOKEN,
            endpoints::auth::FORGOT_PASSWORD,
            endpoints::auth::RESEND_OTP,
            endpoints::auth::VERIFY_OTP,
            endpoints::auth::RESET_PASSWORD,
            "/api/inventory/product/",
            "/api/inventory/check",
            endpoints::payments::VNPAY_CALLBACK,
        ])
    }
}

impl PublicEndpoints {
    /// Allow-list from explicit prefixes
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Empty allow-list: every path is protected
    #[must_use]
    pub fn none() -> Self {
        Self {
            prefixes: Vec::new(),
        }
    }

    /// Add a prefix
    #[must_use]
    pub fn with(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    /// Whether `path` starts with any allow-listed prefix
    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Configured prefixes
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

/// Outcome of the attachment decision for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// Path is allow-listed; no credential
    Public,
    /// Protected path with a stored credential
    Bearer(AccessCredential),
    /// Protected path, but nothing stored; the server will reject it
    Anonymous,
}

impl AuthDecision {
    /// Credential the request will carry, if any
    #[must_use]
    pub fn credential(&self) -> Option<&AccessCredential> {
        match self {
            Self::Bearer(credential) => Some(credential),
            Self::Public | Self::Anonymous => None,
        }
    }
}

/// Decides, per request, whether to attach the current credential
#[derive(Clone)]
pub struct RequestAuthenticator {
    public_endpoints: PublicEndpoints,
    store: SharedCredentialStore,
}

impl std::fmt::Debug for RequestAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAuthenticator")
            .field("public_endpoints", &self.public_endpoints)
            .field("store", &"<credential store>")
            .finish()
    }
}

impl RequestAuthenticator {
    /// Create an authenticator over a credential store
    #[must_use]
    pub fn new(public_endpoints: PublicEndpoints, store: SharedCredentialStore) -> Self {
        Self {
            public_endpoints,
            store,
        }
    }

    /// Decide what `request` should carry, reading the store
    #[must_use]
    pub fn decide(&self, request: &PendingRequest) -> AuthDecision {
        if self.public_endpoints.is_public(request.path()) {
            return AuthDecision::Public;
        }
        match self.store.read() {
            Ok(Some(credential)) => AuthDecision::Bearer(credential),
            Ok(None) => AuthDecision::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read credential store; sending unauthenticated");
                AuthDecision::Anonymous
            }
        }
    }

    /// Attach the stored credential to `request` if its path is protected
    #[must_use]
    pub fn authenticate(&self, request: &PendingRequest) -> PendingRequest {
        let decision = self.decide(request);
        Self::apply(request, decision)
    }

    /// Attach a specific credential (e.g. one just obtained from a refresh)
    /// if the path is protected
    #[must_use]
    pub fn authenticate_with(
        &self,
        request: &PendingRequest,
        credential: &AccessCredential,
    ) -> PendingRequest {
        let decision = if self.public_endpoints.is_public(request.path()) {
            AuthDecision::Public
        } else {
            AuthDecision::Bearer(credential.clone())
        };
        Self::apply(request, decision)
    }

    /// Produce the attempt `decision` describes, leaving `request` untouched
    #[must_use]
    pub fn apply(request: &PendingRequest, decision: AuthDecision) -> PendingRequest {
        match decision {
            AuthDecision::Public => {
                tracing::debug!(request = %request, "Public endpoint, no credential");
                request.without_authorization()
            }
            AuthDecision::Bearer(credential) => {
                tracing::debug!(request = %request, "Attaching bearer credential");
                request.with_bearer(&credential)
            }
            AuthDecision::Anonymous => {
                tracing::debug!(request = %request, "No credential stored for protected endpoint");
                request.without_authorization()
            }
        }
    }

    /// Allow-list in use
    #[must_use]
    pub fn public_endpoints(&self) -> &PublicEndpoints {
        &self.public_endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialStore, MemoryCredentialStore};
    use std::sync::Arc;

    fn authenticator(credential: Option<&str>) -> RequestAuthenticator {
        let store = match credential {
            Some(token) => MemoryCredentialStore::with_credential(AccessCredential::new(token)),
            None => MemoryCredentialStore::new(),
        };
        RequestAuthenticator::new(PublicEndpoints::default(), Arc::new(store))
    }

    #[test]
    fn test_public_paths_never_carry_credential() {
        let auth = authenticator(Some("T1"));
        for path in [
            "/api/products",
            "/api/products/7",
            "/api/categories/slug/mugs",
            "/api/auth/login",
            "/api/auth/refresh-token",
            "/api/inventory/product/3/check",
            "/api/payments/vnpay-callback",
        ] {
            let request = auth.authenticate(&PendingRequest::get(path));
            assert_eq!(request.authorization(), None, "{path} should be public");
        }
    }

    #[test]
    fn test_public_path_strips_existing_header() {
        let auth = authenticator(Some("T1"));
        let request = PendingRequest::get("/api/products").with_bearer(&AccessCredential::new("old"));
        assert_eq!(auth.authenticate(&request).authorization(), None);
    }

    #[test]
    fn test_protected_path_gets_bearer() {
        let auth = authenticator(Some("T1"));
        let request = auth.authenticate(&PendingRequest::get("/api/users/me"));
        assert_eq!(request.authorization(), Some("Bearer T1"));
        assert_eq!(
            auth.decide(&PendingRequest::get("/api/orders/my-orders")),
            AuthDecision::Bearer(AccessCredential::new("T1"))
        );
    }

    #[test]
    fn test_protected_path_without_credential() {
        let auth = authenticator(None);
        let request = PendingRequest::get("/api/users/me");
        assert_eq!(auth.decide(&request), AuthDecision::Anonymous);
        assert_eq!(auth.authenticate(&request).authorization(), None);
    }

    #[test]
    fn test_prefix_match_not_substring() {
        let auth = authenticator(Some("T1"));
        // "/api/admin/products" contains "/api/products" but does not start with it
        let request = auth.authenticate(&PendingRequest::get("/api/admin/products"));
        assert_eq!(request.authorization(), Some("Bearer T1"));
    }

    #[test]
    fn test_authenticate_with_explicit_credential() {
        let auth = authenticator(Some("T1"));
        let fresh = AccessCredential::new("T2");
        let request = auth.authenticate_with(&PendingRequest::get("/api/users/me"), &fresh);
        assert_eq!(request.authorization(), Some("Bearer T2"));

        let public = auth.authenticate_with(&PendingRequest::get("/api/products"), &fresh);
        assert_eq!(public.authorization(), None);
    }

    #[test]
    fn test_reads_store_on_every_call() {
        let store = Arc::new(MemoryCredentialStore::new());
        let auth = RequestAuthenticator::new(PublicEndpoints::default(), store.clone());
        let request = PendingRequest::get("/api/users/me");

        assert_eq!(auth.authenticate(&request).authorization(), None);
        store.write(&AccessCredential::new("T9")).unwrap();
        assert_eq!(auth.authenticate(&request).authorization(), Some("Bearer T9"));
    }

    #[test]
    fn test_custom_allow_list() {
        let endpoints = PublicEndpoints::none().with("/health");
        assert!(endpoints.is_public("/health/live"));
        assert!(!endpoints.is_public("/api/products"));
        assert_eq!(endpoints.prefixes().len(), 1);
    }
}
