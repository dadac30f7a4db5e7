//! Payment types

use serde::{Deserialize, Serialize};

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Created, customer not yet redirected back
    Pending,
    /// Provider is processing
    Processing,
    /// Paid
    Success,
    /// Provider reported a failure
    Failed,
    /// Cancelled by the customer
    Cancelled,
    /// Refunded
    Refunded,
}

impl PaymentStatus {
    /// Whether the payment reached a final state
    #[must_use]
    pub fn is_final(self) -> bool {
        !matches!(self, Self::Pending | Self::Processing)
    }
}

/// Request for a new payment of an order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreateRequest {
    /// Order being paid
    pub order_id: i64,
    /// Amount to charge
    pub amount: f64,
    /// Text shown by the payment provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_description: Option<String>,
}

/// Provider redirect for a freshly created payment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUrl {
    /// URL the customer must open to pay
    pub payment_url: String,
    /// Created payment
    pub payment_id: i64,
    /// Backend message
    #[serde(default)]
    pub message: Option<String>,
}

/// Payment record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Payment ID
    pub id: i64,
    /// Paid order
    pub order_id: i64,
    /// Paying user
    pub user_id: i64,
    /// Charged amount
    pub amount: f64,
    /// Current status
    pub status: PaymentStatus,
    /// Payment method, e.g. `VNPAY`
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Merchant transaction reference
    #[serde(default)]
    pub vnpay_txn_ref: Option<String>,
    /// Provider transaction number
    #[serde(default)]
    pub vnpay_transaction_no: Option<String>,
    /// Provider response code
    #[serde(default)]
    pub vnpay_response_code: Option<String>,
    /// Provider message
    #[serde(default)]
    pub vnpay_message: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Admin payment listing query
#[derive(Debug, Clone, Default)]
pub struct PaymentQuery {
    /// Backend filter expression, e.g. `status:SUCCESS`
    pub filter: Option<String>,
    /// Zero-based page index
    pub page: Option<u32>,
    /// Page size
    pub size: Option<u32>,
    /// Sort expression, e.g. `createdAt,desc`
    pub sort: Option<String>,
}

impl PaymentQuery {
    /// Flatten into query pairs, leaving out unset parameters
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(filter) = self.filter.as_deref().filter(|f| !f.is_empty()) {
            pairs.push(("filter".to_string(), filter.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("sort".to_string(), sort.to_string()));
        }
        pairs
    }
}
