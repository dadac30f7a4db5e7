//! `ApiClient`, the authenticated entry point to the storefront gateway
//!
//! Every call goes through [`ApiClient::execute`], which:
//!
//! 1. attaches the stored bearer credential unless the path is public
//! 2. sends the attempt through the [`Transport`]
//! 3. on a 401, refreshes the session once and replays the request with the
//!    new credential
//!
//! ```text
//!  Idle ──401──▶ Refreshing ──ok──▶ Retried ──▶ replay outcome
//!                     │
//!                     └──fail──▶ clear store, SessionEvent::Expired, original 401
//! ```
//!
//! A 401 on the replay, on the refresh endpoint itself, or one that signals a
//! call bypassing the gateway is never recovered.
//!
//! # Example
//!
//! ```no_run
//! use storefront_client::{ApiClient, ClientConfig, ProductQuery};
//!
//! # async fn example() -> storefront_client::Result<()> {
//! let client = ApiClient::new(ClientConfig::from_env())?;
//!
//! client.auth().login("alice@example.com", "secret").await?;
//! let page = client.catalog().products(&ProductQuery::default()).await?;
//! for product in page.content {
//!     println!("{} - {}", product.name, product.effective_price());
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::auth::{
    MemoryCredentialStore, Recovery, RefreshState, RequestAuthenticator, SessionRefresher,
    SharedCredentialStore,
};
use crate::callbacks::{ExpiryReason, SessionEvent, SessionObserver, SharedSessionObserver};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::request::PendingRequest;
use crate::services::{
    AdminCatalogService, AuthService, CatalogService, InventoryService, OrderService,
    PaymentService,
};
use crate::transport::{ApiResponse, HttpTransport, Transport};
use crate::types::{AccessCredential, SessionMeta};

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    store: Option<SharedCredentialStore>,
    transport: Option<Arc<dyn Transport>>,
    observers: Vec<SharedSessionObserver>,
}

impl ApiClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client configuration (default: [`ClientConfig::from_env`])
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the credential store (default: in-memory)
    #[must_use]
    pub fn store(mut self, store: SharedCredentialStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the transport (default: [`HttpTransport`] for the configured base URL)
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Register a session observer
    #[must_use]
    pub fn observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Register an already shared session observer
    #[must_use]
    pub fn shared_observer(mut self, observer: SharedSessionObserver) -> Self {
        self.observers.push(observer);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP transport cannot be created
    /// (invalid base URL, TLS backend failure).
    pub fn build(self) -> Result<ApiClient> {
        let config = self.config.unwrap_or_default();
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&config)?),
        };
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new()));

        let authenticator =
            RequestAuthenticator::new(config.public_endpoints.clone(), store.clone());
        let refresher = SessionRefresher::new(
            transport.clone(),
            store.clone(),
            config.refresh_path.clone(),
            SessionMeta::from_user_agent(&config.user_agent),
            config.coalesce_refresh,
        );

        tracing::debug!(
            base_url = %config.base_url,
            coalesce_refresh = config.coalesce_refresh,
            observers = self.observers.len(),
            "Created API client"
        );

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                config,
                transport,
                store,
                authenticator,
                refresher,
                observers: self.observers,
            }),
        })
    }
}

struct ClientInner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    store: SharedCredentialStore,
    authenticator: RequestAuthenticator,
    refresher: SessionRefresher,
    observers: Vec<SharedSessionObserver>,
}

/// Authenticated client for the storefront API gateway
///
/// Cheap to clone; clones share the credential store, transport (and its
/// cookie jar), refresh gate and observers.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.inner.config)
            .field("observers", &self.inner.observers.len())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client with the default transport and an in-memory store
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a new builder
    #[must_use]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Client configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Credential store shared by every clone of this client
    #[must_use]
    pub fn credential_store(&self) -> &SharedCredentialStore {
        &self.inner.store
    }

    /// Whether an access credential is currently stored
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.inner.store.read(), Ok(Some(_)))
    }

    /// Send a request, recovering once from an expired access credential
    ///
    /// Returns the response of the first attempt, or of the replay after a
    /// successful refresh.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] for any non-2xx outcome, including the original
    ///   401 when the session could not be recovered
    /// - [`ClientError::GatewayMisconfigured`] when the 401 says the call did
    ///   not come through the gateway
    /// - transport errors as returned by the [`Transport`]
    pub async fn execute(&self, request: PendingRequest) -> Result<ApiResponse> {
        let inner = &self.inner;

        let decision = inner.authenticator.decide(&request);
        let stale = decision.credential().cloned();
        let mut state = RefreshState::for_attempt(&request);
        let mut attempt = RequestAuthenticator::apply(&request, decision);

        loop {
            let response = inner.transport.send(&attempt).await?;
            if response.status() != StatusCode::UNAUTHORIZED {
                return response.error_for_status();
            }

            if is_gateway_rejection(&response) {
                tracing::error!(
                    base_url = %inner.config.base_url,
                    request = %attempt,
                    "Request rejected for bypassing the API gateway"
                );
                return Err(ClientError::gateway_misconfigured(
                    inner.config.base_url.clone(),
                ));
            }

            let Some(next) = state.after_rejection() else {
                tracing::debug!(request = %attempt, ?state, "Replay rejected; not refreshing again");
                return Err(response.into_error());
            };

            if inner.config.is_refresh_path(attempt.path()) {
                self.expire(ExpiryReason::RefreshEndpointRejected);
                return Err(response.into_error());
            }

            state = next;
            tracing::debug!(request = %attempt, ?state, "Access credential rejected");

            match inner.refresher.recover(stale.as_ref()).await {
                Ok(recovery) => {
                    if let Recovery::Refreshed(_) = &recovery {
                        self.emit(&SessionEvent::Refreshed);
                    }
                    attempt = inner
                        .authenticator
                        .authenticate_with(&attempt.into_retry(), recovery.credential());
                    state = state.after_recovery();
                    tracing::debug!(request = %attempt, ?state, "Replaying request");
                }
                Err(failure) => {
                    tracing::warn!(request = %attempt, error = %failure, "Session could not be recovered");
                    self.expire(failure.reason);
                    return Err(response.into_error());
                }
            }
        }
    }

    /// Send a request and decode its payload, unwrapping one envelope layer
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the payload does not match `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: PendingRequest) -> Result<T> {
        self.execute(request).await?.payload()
    }

    /// Send a request whose payload is of no interest
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn fetch_unit(&self, request: PendingRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    /// Refresh the session on demand
    ///
    /// On failure the store is cleared and observers see
    /// [`SessionEvent::Expired`], exactly as for a failed silent refresh.
    ///
    /// # Errors
    ///
    /// Returns the refresh error (the refresh endpoint's rejection,
    /// [`ClientError::MissingCredential`], or a transport error).
    pub async fn refresh_session(&self) -> Result<AccessCredential> {
        match self.inner.refresher.refresh().await {
            Ok(credential) => {
                self.emit(&SessionEvent::Refreshed);
                Ok(credential)
            }
            Err(failure) => {
                self.expire(failure.reason);
                Err(failure.error)
            }
        }
    }

    /// Authentication endpoints
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    /// Product and category endpoints
    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self)
    }

    /// Order endpoints
    #[must_use]
    pub fn orders(&self) -> OrderService<'_> {
        OrderService::new(self)
    }

    /// Inventory endpoints
    #[must_use]
    pub fn inventory(&self) -> InventoryService<'_> {
        InventoryService::new(self)
    }

    /// Payment endpoints
    #[must_use]
    pub fn payments(&self) -> PaymentService<'_> {
        PaymentService::new(self)
    }

    /// Admin product and category management
    #[must_use]
    pub fn admin_catalog(&self) -> AdminCatalogService<'_> {
        AdminCatalogService::new(self)
    }

    fn emit(&self, event: &SessionEvent) {
        for observer in &self.inner.observers {
            observer.on_session_event(event);
        }
    }

    fn expire(&self, reason: ExpiryReason) {
        if let Err(e) = self.inner.store.clear() {
            tracing::warn!(error = %e, "Could not clear credential store");
        }
        tracing::info!(%reason, "Session expired");
        self.emit(&SessionEvent::Expired { reason });
    }
}

/// 401 whose message says the call did not come through the gateway
fn is_gateway_rejection(response: &ApiResponse) -> bool {
    response
        .message()
        .is_some_and(|message| message.contains("gateway secret") || message.contains("Gateway"))
}
