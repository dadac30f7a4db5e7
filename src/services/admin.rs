//! Admin catalog endpoints (authenticated, admin rights)

use crate::client::ApiClient;
use crate::endpoints::admin as paths;
use crate::error::Result;
use crate::request::PendingRequest;
use crate::types::{
    CategoryAdmin, CategoryRequest, Page, ProductAdmin, ProductCreateRequest, ProductListItem,
    ProductQuery, ProductUpdateRequest,
};

/// Admin catalog facade, see [`ApiClient::admin_catalog`]
#[derive(Debug, Clone, Copy)]
pub struct AdminCatalogService<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminCatalogService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Paginated product listing, including unlisted products
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn products(&self, query: &ProductQuery) -> Result<Page<ProductListItem>> {
        self.client
            .fetch(PendingRequest::get(paths::PRODUCTS).query_pairs(query.to_pairs()))
            .await
    }

    /// One product
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn product(&self, id: i64) -> Result<ProductAdmin> {
        self.client.fetch(PendingRequest::get(paths::product(id))).await
    }

    /// Create a product
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn create_product(&self, request: &ProductCreateRequest) -> Result<ProductAdmin> {
        self.client
            .fetch(PendingRequest::post(paths::PRODUCTS).json(request)?)
            .await
    }

    /// Replace a product
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn update_product(
        &self,
        id: i64,
        request: &ProductUpdateRequest,
    ) -> Result<ProductAdmin> {
        self.client
            .fetch(PendingRequest::put(paths::product(id)).json(request)?)
            .await
    }

    /// Change only the fields set in `changes`
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn patch_product(
        &self,
        id: i64,
        changes: &ProductUpdateRequest,
    ) -> Result<ProductAdmin> {
        self.client
            .fetch(PendingRequest::patch(paths::product(id)).json(changes)?)
            .await
    }

    /// Delete a product
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn delete_product(&self, id: i64) -> Result<()> {
        self.client
            .fetch_unit(PendingRequest::delete(paths::product(id)))
            .await
    }

    /// Paginated category listing; takes the same paging, sort and filter
    /// parameters as the product listing
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn categories(&self, query: &ProductQuery) -> Result<Page<CategoryAdmin>> {
        self.client
            .fetch(PendingRequest::get(paths::CATEGORIES).query_pairs(query.to_pairs()))
            .await
    }

    /// One category
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn category(&self, id: i64) -> Result<CategoryAdmin> {
        self.client.fetch(PendingRequest::get(paths::category(id))).await
    }

    /// Create a category
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn create_category(&self, request: &CategoryRequest) -> Result<CategoryAdmin> {
        self.client
            .fetch(PendingRequest::post(paths::CATEGORIES).json(request)?)
            .await
    }

    /// Replace a category
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn update_category(&self, id: i64, request: &CategoryRequest) -> Result<CategoryAdmin> {
        self.client
            .fetch(PendingRequest::put(paths::category(id)).json(request)?)
            .await
    }

    /// Delete a category
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn delete_category(&self, id: i64) -> Result<()> {
        self.client
            .fetch_unit(PendingRequest::delete(paths::category(id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::fixture;
    use crate::transport::scripted::status;
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    fn product() -> serde_json::Value {
        json!({"data": {
            "id": 4,
            "name": "Mug",
            "slug": "mug",
            "price": 10.0,
            "category": {"id": 1, "name": "Kitchen", "slug": "kitchen"},
            "active": true
        }})
    }

    #[tokio::test]
    async fn test_admin_listing_is_authenticated() {
        let f = fixture(|_| {
            status(
                StatusCode::OK,
                json!({"data": {
                    "content": [{"id": 4, "name": "Mug", "price": 10.0, "categoryName": "Kitchen", "active": false}],
                    "page": 0,
                    "size": 20,
                    "totalElements": 1,
                    "totalPages": 1
                }}),
            )
        });

        let page = f
            .client
            .admin_catalog()
            .products(&ProductQuery::default())
            .await
            .unwrap();
        assert!(!page.content[0].active);

        let sent = &f.transport.sent()[0];
        assert_eq!(sent.path(), "/api/admin/products");
        assert_eq!(sent.authorization(), Some("Bearer T1"));
    }

    #[tokio::test]
    async fn test_patch_product_sends_partial_body() {
        let f = fixture(|_| status(StatusCode::OK, product()));

        let changes = ProductUpdateRequest {
            price: Some(9.5),
            ..ProductUpdateRequest::default()
        };
        let updated = f.client.admin_catalog().patch_product(4, &changes).await.unwrap();
        assert_eq!(updated.detail.slug, "mug");

        let sent = &f.transport.sent()[0];
        assert_eq!(sent.method(), &Method::PATCH);
        assert_eq!(sent.path(), "/api/admin/products/4");
        assert_eq!(sent.body(), Some(&json!({"price": 9.5})));
    }

    #[tokio::test]
    async fn test_create_product() {
        let f = fixture(|_| status(StatusCode::CREATED, product()));

        let created = f
            .client
            .admin_catalog()
            .create_product(&ProductCreateRequest {
                name: "Mug".to_string(),
                description: None,
                price: 10.0,
                discount_price: None,
                discount_start_date: None,
                discount_end_date: None,
                category_id: 1,
                active: true,
                featured: None,
                thumbnail_url: Some("https://cdn.example.com/mug.png".to_string()),
                image_urls: None,
            })
            .await
            .unwrap();
        assert_eq!(created.detail.id, 4);

        let body = f.transport.sent()[0].body().cloned().unwrap();
        assert_eq!(body["categoryId"], 1);
        assert_eq!(body["thumbnailUrl"], "https://cdn.example.com/mug.png");
        assert!(body.get("imageUrls").is_none());
    }

    #[tokio::test]
    async fn test_delete_category() {
        let f = fixture(|_| status(StatusCode::OK, json!({"message": "Deleted", "data": null})));

        f.client.admin_catalog().delete_category(2).await.unwrap();

        let sent = &f.transport.sent()[0];
        assert_eq!(sent.method(), &Method::DELETE);
        assert_eq!(sent.path(), "/api/admin/categories/2");
    }

    #[tokio::test]
    async fn test_update_category() {
        let f = fixture(|_| {
            status(
                StatusCode::OK,
                json!({"data": {"id": 2, "name": "Kitchenware", "slug": "kitchenware"}}),
            )
        });

        let category = f
            .client
            .admin_catalog()
            .update_category(
                2,
                &CategoryRequest {
                    name: "Kitchenware".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(category.slug, "kitchenware");
        assert_eq!(f.transport.sent()[0].body(), Some(&json!({"name": "Kitchenware"})));
    }
}
