//! Authentication for gateway calls
//!
//! Three cooperating pieces keep requests authenticated:
//!
//! - [`RequestAuthenticator`] attaches `Authorization: Bearer <token>` to every
//!   request whose path is not on the public allow-list
//! - [`SessionRefresher`] exchanges the refresh cookie for a new access token
//!   when a protected call is rejected with 401
//! - [`CredentialStore`] is the single place the access token lives
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use storefront_client::auth::{MemoryCredentialStore, PublicEndpoints, RequestAuthenticator};
//! use storefront_client::{AccessCredential, PendingRequest};
//!
//! let store = Arc::new(MemoryCredentialStore::with_credential(AccessCredential::new("T1")));
//! let authenticator = RequestAuthenticator::new(PublicEndpoints::default(), store);
//!
//! let me = authenticator.authenticate(&PendingRequest::get("/api/auth/me"));
//! assert_eq!(me.authorization(), Some("Bearer T1"));
//!
//! let products = authenticator.authenticate(&PendingRequest::get("/api/products"));
//! assert_eq!(products.authorization(), None);
//! ```
//!
//! # Storage
//!
//! [`FileCredentialStore`] keeps the token in the platform config directory
//! (e.g. `~/.config/storefront-client/` on Linux), one file per API origin,
//! readable only by the current user.

mod authenticator;
mod refresh;
mod store;

pub use authenticator::{AuthDecision, PublicEndpoints, RequestAuthenticator};
pub use refresh::{Recovery, RefreshFailure, RefreshState, SessionRefresher};
pub use store::{
    ACCESS_TOKEN_KEY, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    SharedCredentialStore, StoreError,
};
