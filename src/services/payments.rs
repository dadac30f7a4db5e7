//! Payment endpoints (authenticated)

use crate::client::ApiClient;
use crate::endpoints::payments as paths;
use crate::error::Result;
use crate::request::PendingRequest;
use crate::types::{Page, Payment, PaymentCreateRequest, PaymentQuery, PaymentUrl};

use super::fetch_list;

/// Payment facade, see [`ApiClient::payments`]
#[derive(Debug, Clone, Copy)]
pub struct PaymentService<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create a payment for an order and get the provider URL the customer
    /// must open to pay
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn create(&self, request: &PaymentCreateRequest) -> Result<PaymentUrl> {
        self.client
            .fetch(PendingRequest::post(paths::CREATE).json(request)?)
            .await
    }

    /// One payment of the current user
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn get(&self, id: i64) -> Result<Payment> {
        self.client.fetch(PendingRequest::get(paths::by_id(id))).await
    }

    /// Payment of one of the current user's orders
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn by_order(&self, order_id: i64) -> Result<Payment> {
        self.client
            .fetch(PendingRequest::get(paths::by_order(order_id)))
            .await
    }

    /// Payments of the current user
    ///
    /// # Errors
    /// Returns an error if the call fails
    pub async fn mine(&self) -> Result<Vec<Payment>> {
        fetch_list(self.client, PendingRequest::get(paths::MY_PAYMENTS)).await
    }

    /// Admin listing
    ///
    /// # Errors
    /// Returns an error if the call fails (403 without admin rights)
    pub async fn list(&self, query: &PaymentQuery) -> Result<Page<Payment>> {
        self.client
            .fetch(PendingRequest::get(paths::BASE).query_pairs(query.to_pairs()))
            .await
    }
}
