//! Order endpoints (authenticated)

use crate::client::ApiClient;
use crate::endpoints::orders as paths;
use crate::error::Result;
use crate::request::PendingRequest;
use crate::types::{Order, OrderCreateRequest, OrderFilter, OrderUpdateRequest, Page};

use super::fetch_list;

/// Order facade, see [`ApiClient::orders`]
#[derive(Debug, Clone, Copy)]
pub struct OrderService<'a> {
    client: &'a ApiClient,
}

impl<'a> OrderService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Place an order
    ///
    /// # Errors
    /// Returns an error if the call fails (e.g. insufficient stock)
    pub async fn create(&self, request: &OrderCreateRequest) -> Result<Order> {
        self.client
            .fetch(PendingRequest::post(paths::BASE).json(request)?)
            .await
    }

    /// One order by id
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn get(&self, id: i64) -> Result<Order> {
        self.client.fetch(PendingRequest::get(paths::by_id(id))).await
    }

    /// One order by its order number
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn by_number(&self, order_number: &str) -> Result<Order> {
        self.client
            .fetch(PendingRequest::get(paths::by_number(order_number)))
            .await
    }

    /// Orders of the current user
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn mine(&self) -> Result<Vec<Order>> {
        fetch_list(self.client, PendingRequest::get(paths::MY_ORDERS)).await
    }

    /// Admin listing with filters
    ///
    /// # Errors
    /// Returns an error if the call fails (403 without admin rights)
    pub async fn list(&self, filter: &OrderFilter, page: u32, size: u32) -> Result<Page<Order>> {
        self.client
            .fetch(PendingRequest::get(paths::BASE).query_pairs(filter.to_pairs(page, size)))
            .await
    }

    /// Admin status change
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn update_status(&self, id: i64, request: &OrderUpdateRequest) -> Result<Order> {
        self.client
            .fetch(PendingRequest::put(paths::status(id)).json(request)?)
            .await
    }

    /// Cancel an order
    ///
    /// # Errors
    /// Returns an error if the call fails (e.g. already shipped)
    pub async fn cancel(&self, id: i64) -> Result<()> {
        self.client
            .fetch_unit(PendingRequest::put(paths::cancel(id)).json(&serde_json::json!({}))?)
            .await
    }
}
