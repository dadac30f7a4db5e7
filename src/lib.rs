//! # Storefront Client
//!
//! Authenticated async client for the storefront API gateway.
//! Tokio-based, strongly typed, with transparent session recovery.
//!
//! ## Quick Start
//!
//! ```no_run
//! use storefront_client::{ApiClient, ClientConfig, ProductQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::from_env())?;
//!
//!     // Public endpoints need no login
//!     let page = client.catalog().products(&ProductQuery::default().size(5)).await?;
//!     println!("{} products", page.total_elements);
//!
//!     // Login stores the access credential; later calls carry it
//!     client.auth().login("alice@example.com", "secret").await?;
//!     for order in client.orders().mine().await? {
//!         println!("{} {}", order.order_number, order.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Core Features
//!
//! ### 1. Credential attachment
//!
//! Every request not on the public allow-list ([`auth::PublicEndpoints`])
//! carries `Authorization: Bearer <token>` read from the
//! [`CredentialStore`] at send time.
//!
//! ### 2. Silent refresh
//!
//! A 401 on a protected call triggers one refresh through
//! `/api/auth/refresh-token` (the refresh credential is an HTTP-only cookie
//! kept in the transport's cookie jar) and one replay of the original
//! request with the new token. See [`client`] for the state machine.
//!
//! ### 3. Session events
//!
//! When recovery fails, the store is cleared and observers receive
//! [`SessionEvent::Expired`]. [`LoginRedirect`] turns that into navigation:
//!
//! ```no_run
//! use storefront_client::{ApiClient, ClientConfig, LoginRedirect, Navigator};
//!
//! struct Router;
//!
//! impl Navigator for Router {
//!     fn current_path(&self) -> String {
//!         "/orders".to_string()
//!     }
//!
//!     fn navigate(&self, path: &str) {
//!         println!("-> {path}");
//!     }
//! }
//!
//! # fn example() -> storefront_client::Result<()> {
//! let config = ClientConfig::from_env();
//! let redirect = LoginRedirect::new(Router, config.login_view.clone());
//! let client = ApiClient::builder().config(config).observer(redirect).build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### 4. Persistent sessions
//!
//! ```no_run
//! use std::sync::Arc;
//! use storefront_client::{ApiClient, ClientConfig, FileCredentialStore};
//!
//! # fn example() -> storefront_client::Result<()> {
//! let config = ClientConfig::from_env();
//! let store = Arc::new(FileCredentialStore::for_origin(&config.base_url));
//! let client = ApiClient::builder().config(config).store(store).build()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod callbacks;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod services;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use auth::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, PublicEndpoints,
    RequestAuthenticator, SessionRefresher, SharedCredentialStore,
};
pub use callbacks::{
    ExpiryReason, LoginRedirect, Navigator, SessionEvent, SessionObserver, SharedSessionObserver,
};
pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use request::PendingRequest;
pub use transport::{ApiResponse, HttpTransport, Transport};
pub use types::{
    AccessCredential, AuthTokenResponse, CategoryAdmin, CategoryInfo, CategoryRequest, Inventory,
    InventoryAdjustRequest, InventoryCreateRequest, InventoryFilter, InventoryUpdateRequest, Order,
    OrderCreateRequest, OrderFilter, OrderItemRequest, OrderStatus, OrderUpdateRequest, Page,
    Payment, PaymentCreateRequest, PaymentQuery, PaymentStatus, PaymentUrl, ProductAdmin,
    ProductCreateRequest, ProductDetail, ProductListItem, ProductQuery, ProductSummary,
    ProductUpdateRequest, SessionMeta, UserProfile, UserSession,
};

/// Version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
