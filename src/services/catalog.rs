//! Product and category endpoints (public)

use crate::client::ApiClient;
use crate::endpoints::catalog as paths;
use crate::error::Result;
use crate::request::PendingRequest;
use crate::types::{CategoryInfo, Page, ProductDetail, ProductQuery, ProductSummary};

use super::fetch_list;

/// Catalog facade, see [`ApiClient::catalog`]
#[derive(Debug, Clone, Copy)]
pub struct CatalogService<'a> {
    client: &'a ApiClient,
}

impl<'a> CatalogService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Paginated, sorted, filtered product listing
    ///
    /// # Errors
    /// Returns an error if the call fails or the page is malformed
    pub async fn products(&self, query: &ProductQuery) -> Result<Page<ProductSummary>> {
        self.client
            .fetch(PendingRequest::get(paths::PRODUCTS).query_pairs(query.to_pairs()))
            .await
    }

    /// Keyword search
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn search(&self, keyword: &str, page: u32, size: u32) -> Result<Page<ProductSummary>> {
        self.client
            .fetch(
                PendingRequest::get(paths::SEARCH)
                    .query("keyword", keyword)
                    .query("page", page)
                    .query("size", size),
            )
            .await
    }

    /// Featured products
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn featured(&self, page: u32, size: u32) -> Result<Page<ProductSummary>> {
        self.client
            .fetch(
                PendingRequest::get(paths::FEATURED)
                    .query("page", page)
                    .query("size", size),
            )
            .await
    }

    /// Products of one category
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn by_category(
        &self,
        category_id: i64,
        page: u32,
        size: u32,
    ) -> Result<Page<ProductSummary>> {
        self.client
            .fetch(
                PendingRequest::get(paths::products_in_category(category_id))
                    .query("page", page)
                    .query("size", size),
            )
            .await
    }

    /// One product by id
    ///
    /// # Errors
    /// Returns an error if the call fails (404 for unknown ids)
    pub async fn product(&self, id: i64) -> Result<ProductDetail> {
        self.client.fetch(PendingRequest::get(paths::product(id))).await
    }

    /// One product by slug
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn product_by_slug(&self, slug: &str) -> Result<ProductDetail> {
        self.client
            .fetch(PendingRequest::get(paths::product_by_slug(slug)))
            .await
    }

    /// All categories; a missing payload reads as none
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn categories(&self) -> Result<Vec<CategoryInfo>> {
        fetch_list(self.client, PendingRequest::get(paths::CATEGORIES)).await
    }

    /// One category by id
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn category(&self, id: i64) -> Result<CategoryInfo> {
        self.client.fetch(PendingRequest::get(paths::category(id))).await
    }

    /// One category by slug
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn category_by_slug(&self, slug: &str) -> Result<CategoryInfo> {
        self.client
            .fetch(PendingRequest::get(paths::category_by_slug(slug)))
            .await
    }
}
