//! Order types

use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created, awaiting confirmation/payment
    Pending,
    /// Confirmed
    Confirmed,
    /// Being prepared
    Processing,
    /// Handed to the carrier
    Shipped,
    /// Delivered to the customer
    Delivered,
    /// Cancelled
    Cancelled,
}

impl OrderStatus {
    /// Whether the customer may still cancel
    #[must_use]
    pub fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        };
        f.pad(s)
    }
}

/// Line item of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Line ID
    pub id: i64,
    /// Product ID
    pub product_id: i64,
    /// Product name at order time
    pub product_name: String,
    /// Product image at order time
    #[serde(default)]
    pub product_image: Option<String>,
    /// Unit price at order time
    pub price: f64,
    /// Quantity
    pub quantity: u32,
}

/// Order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order ID
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Human-facing order number
    pub order_number: String,
    /// Order total
    pub total_amount: f64,
    /// Current status
    pub status: OrderStatus,
    /// Shipping address
    #[serde(default)]
    pub shipping_address: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Customer notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Line items
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Line of an order being created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    /// Product ID
    pub product_id: i64,
    /// Quantity
    pub quantity: u32,
}

/// Create-order request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    /// Lines to order
    pub items: Vec<OrderItemRequest>,
    /// Shipping address
    pub shipping_address: String,
    /// Contact phone
    pub phone: String,
    /// Optional customer notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Admin status update
#[derive(Debug, Clone, Serialize)]
pub struct OrderUpdateRequest {
    /// New status
    pub status: OrderStatus,
    /// Optional notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Admin listing filters for `GET /api/orders`
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Restrict to a user
    pub user_id: Option<i64>,
    /// Restrict to a status
    pub status: Option<OrderStatus>,
    /// Restrict to an order number
    pub order_number: Option<String>,
}

impl OrderFilter {
    /// Flatten into query pairs, page parameters first
    #[must_use]
    pub fn to_pairs(&self, page: u32, size: u32) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), page.to_string()),
            ("size".to_string(), size.to_string()),
        ];
        if let Some(user_id) = self.user_id {
            pairs.push(("userId".to_string(), user_id.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.to_string()));
        }
        if let Some(order_number) = self.order_number.as_deref().filter(|n| !n.is_empty()) {
            pairs.push(("orderNumber".to_string(), order_number.to_string()));
        }
        pairs
    }
}
