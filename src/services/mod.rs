//! Typed facades over the gateway endpoints
//!
//! Each facade borrows an [`ApiClient`] and turns one endpoint into one async
//! method, so every call gets credential attachment and session recovery.
//! Payloads are decoded after unwrapping one optional envelope layer.

mod admin;
mod auth;
mod catalog;
mod inventory;
mod orders;
mod payments;

pub use admin::AdminCatalogService;
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use inventory::InventoryService;
pub use orders::OrderService;
pub use payments::PaymentService;

use serde::de::DeserializeOwned;

use crate::client::ApiClient;
use crate::error::{ClientError, Result};
use crate::request::PendingRequest;
use crate::types::unwrap_envelope;

/// Fetch a list payload; anything that is not an array reads as empty
async fn fetch_list<T: DeserializeOwned>(
    client: &ApiClient,
    request: PendingRequest,
) -> Result<Vec<T>> {
    let value = unwrap_envelope(client.execute(request).await?.json_value()?);
    if !value.is_array() {
        tracing::debug!("List payload missing; treating as empty");
        return Ok(Vec::new());
    }
    serde_json::from_value(value)
        .map_err(|e| ClientError::invalid_response(format!("Unexpected list payload: {e}")))
}
