//! Inventory endpoints

use crate::client::ApiClient;
use crate::endpoints::inventory as paths;
use crate::error::Result;
use crate::request::PendingRequest;
use crate::types::{
    Inventory, InventoryAdjustRequest, InventoryCreateRequest, InventoryFilter,
    InventoryUpdateRequest, Page, unwrap_envelope,
};

use super::fetch_list;

/// Inventory facade, see [`ApiClient::inventory`]
#[derive(Debug, Clone, Copy)]
pub struct InventoryService<'a> {
    client: &'a ApiClient,
}

impl<'a> InventoryService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create the stock record of a product
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn create(&self, request: &InventoryCreateRequest) -> Result<Inventory> {
        self.client
            .fetch(PendingRequest::post(paths::BASE).json(request)?)
            .await
    }

    /// One stock record by id
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn get(&self, id: i64) -> Result<Inventory> {
        self.client.fetch(PendingRequest::get(paths::by_id(id))).await
    }

    /// Admin listing
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn list(
        &self,
        filter: &InventoryFilter,
        page: u32,
        size: u32,
    ) -> Result<Page<Inventory>> {
        self.client
            .fetch(PendingRequest::get(paths::BASE).query_pairs(filter.to_pairs(page, size)))
            .await
    }

    /// Overwrite the fields set in `request`
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn update(&self, id: i64, request: &InventoryUpdateRequest) -> Result<Inventory> {
        self.client
            .fetch(PendingRequest::put(paths::by_id(id)).json(request)?)
            .await
    }

    /// Stock record of a product (public)
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn by_product(&self, product_id: i64) -> Result<Inventory> {
        self.client
            .fetch(PendingRequest::get(paths::by_product(product_id)))
            .await
    }

    /// Whether `quantity` units of a product can be ordered (public).
    /// A response without a boolean payload reads as unavailable.
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn check_availability(&self, product_id: i64, quantity: u32) -> Result<bool> {
        let response = self
            .client
            .execute(PendingRequest::get(paths::check(product_id)).query("quantity", quantity))
            .await?;
        Ok(unwrap_envelope(response.json_value()?)
            .as_bool()
            .unwrap_or(false))
    }

    /// Add or subtract stock
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn adjust(&self, id: i64, request: &InventoryAdjustRequest) -> Result<Inventory> {
        self.client
            .fetch(PendingRequest::post(paths::adjust(id)).json(request)?)
            .await
    }

    /// Items under their low-stock threshold
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn low_stock(&self) -> Result<Vec<Inventory>> {
        fetch_list(self.client, PendingRequest::get(paths::LOW_STOCK)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::fixture;
    use crate::transport::scripted::status;
    use reqwest::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_check_availability() {
        let f = fixture(|_| status(StatusCode::OK, json!({"message": "ok", "data": true})));
        assert!(f.client.inventory().check_availability(3, 2).await.unwrap());

        let sent = &f.transport.sent()[0];
        assert_eq!(sent.path(), "/api/inventory/product/3/check");
        assert_eq!(sent.authorization(), None);
        assert_eq!(sent.query_params(), [("quantity".to_string(), "2".to_string())]);
    }

    #[tokio::test]
    async fn test_check_availability_absent_is_false() {
        let f = fixture(|_| status(StatusCode::OK, json!({"message": "ok", "data": null})));
        assert!(!f.client.inventory().check_availability(3, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_adjust_is_authenticated() {
        let f = fixture(|_| {
            status(
                StatusCode::OK,
                json!({"data": {"id": 5, "productId": 3, "quantity": 7, "isLowStock": false}}),
            )
        });

        let inventory = f
            .client
            .inventory()
            .adjust(
                5,
                &InventoryAdjustRequest {
                    quantity: -3,
                    reason: Some("damaged".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(inventory.quantity, 7);

        let sent = &f.transport.sent()[0];
        assert_eq!(sent.path(), "/api/inventory/5/adjust");
        assert_eq!(sent.authorization(), Some("Bearer T1"));
        assert_eq!(sent.body(), Some(&json!({"quantity": -3, "reason": "damaged"})));
    }

    #[tokio::test]
    async fn test_low_stock() {
        let f = fixture(|_| {
            status(
                StatusCode::OK,
                json!({"data": [{"id": 5, "productId": 3, "quantity": 1, "isLowStock": true}]}),
            )
        });
        let items = f.client.inventory().low_stock().await.unwrap();
        assert!(items[0].is_low_stock);
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let f = fixture(|_| {
            status(
                StatusCode::OK,
                json!({"data": {
                    "content": [{"id": 5, "productId": 3, "quantity": 7}],
                    "page": 1,
                    "size": 10,
                    "totalElements": 11,
                    "totalPages": 2
                }}),
            )
        });

        let filter = InventoryFilter {
            product_id: Some(3),
            is_active: None,
        };
        let page = f.client.inventory().list(&filter, 1, 10).await.unwrap();
        assert_eq!(page.content[0].product_id, 3);
        assert!(!page.has_next());

        let sent = &f.transport.sent()[0];
        assert_eq!(sent.path(), "/api/inventory");
        assert_eq!(sent.authorization(), Some("Bearer T1"));
        assert!(sent.query_params().contains(&("productId".to_string(), "3".to_string())));
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let f = fixture(|request: &PendingRequest| {
            let quantity = request.body().and_then(|b| b["quantity"].as_i64()).unwrap_or(0);
            status(
                StatusCode::OK,
                json!({"data": {"id": 5, "productId": 3, "quantity": quantity}}),
            )
        });

        let created = f
            .client
            .inventory()
            .create(&InventoryCreateRequest {
                product_id: 3,
                quantity: 40,
                low_stock_threshold: Some(5),
            })
            .await
            .unwrap();
        assert_eq!(created.quantity, 40);

        let updated = f
            .client
            .inventory()
            .update(
                5,
                &InventoryUpdateRequest {
                    quantity: Some(12),
                    ..InventoryUpdateRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity, 12);

        let sent = f.transport.sent();
        assert_eq!(sent[0].path(), "/api/inventory");
        assert_eq!(sent[1].method(), &reqwest::Method::PUT);
        assert_eq!(sent[1].path(), "/api/inventory/5");
        assert_eq!(sent[1].body(), Some(&json!({"quantity": 12})));
    }
}
