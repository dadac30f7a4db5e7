//! Inventory types

use serde::{Deserialize, Serialize};

/// Stock record for one product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    /// Inventory record ID
    pub id: i64,
    /// Product the stock belongs to
    pub product_id: i64,
    /// Units on hand
    pub quantity: i64,
    /// Units reserved by open orders
    #[serde(default)]
    pub reserved_quantity: i64,
    /// Units that can still be sold
    #[serde(default)]
    pub available_quantity: i64,
    /// Threshold under which the item counts as low stock
    #[serde(default)]
    pub low_stock_threshold: i64,
    /// Whether the record is active
    #[serde(default)]
    pub is_active: bool,
    /// Whether the item is under its threshold
    #[serde(default)]
    pub is_low_stock: bool,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// New stock record for a product
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCreateRequest {
    /// Product the stock belongs to
    pub product_id: i64,
    /// Initial units on hand
    pub quantity: i64,
    /// Low-stock threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<i64>,
}

/// Absolute update of a stock record; unset fields are left as they are
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdateRequest {
    /// Units on hand
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Low-stock threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<i64>,
    /// Whether the record is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Filters for the admin inventory listing
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    /// Restrict to a product
    pub product_id: Option<i64>,
    /// Restrict to active or inactive records
    pub is_active: Option<bool>,
}

impl InventoryFilter {
    /// Flatten into query pairs, page parameters first
    #[must_use]
    pub fn to_pairs(&self, page: u32, size: u32) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), page.to_string()),
            ("size".to_string(), size.to_string()),
        ];
        if let Some(product_id) = self.product_id {
            pairs.push(("productId".to_string(), product_id.to_string()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("isActive".to_string(), is_active.to_string()));
        }
        pairs
    }
}

/// Relative stock adjustment (positive adds, negative subtracts)
#[derive(Debug, Clone, Serialize)]
pub struct InventoryAdjustRequest {
    /// Signed delta
    pub quantity: i64,
    /// Audit reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
