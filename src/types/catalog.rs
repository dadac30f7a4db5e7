//! Product catalog types

use serde::{Deserialize, Serialize};

/// Category reference embedded in products
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Category ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: String,
}

/// Product as shown in listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Product ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// List price
    pub price: f64,
    /// Discounted price, if a discount is running
    #[serde(default)]
    pub discount_price: Option<f64>,
}

impl ProductSummary {
    /// Price the customer actually pays
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        match self.discount_price {
            Some(discount) if discount > 0.0 && discount < self.price => discount,
            _ => self.price,
        }
    }
}

/// Full product detail
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    /// Product ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: String,
    /// Long description
    #[serde(default)]
    pub description: Option<String>,
    /// List price
    pub price: f64,
    /// Discounted price
    #[serde(default)]
    pub discount_price: Option<f64>,
    /// Discount window start
    #[serde(default)]
    pub discount_start_date: Option<String>,
    /// Discount window end
    #[serde(default)]
    pub discount_end_date: Option<String>,
    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Gallery image URLs
    #[serde(default)]
    pub images: Vec<String>,
    /// Owning category
    pub category: CategoryInfo,
    /// Whether the product is listed
    #[serde(default)]
    pub active: bool,
    /// Whether the product is featured
    #[serde(default)]
    pub featured: Option<bool>,
}

/// Listing query for `GET /api/products`
#[derive(Debug, Clone)]
pub struct ProductQuery {
    /// Zero-based page index
    pub page: u32,
    /// Page size
    pub size: u32,
    /// Sort expression, e.g. `id,desc`
    pub sort: String,
    /// Extra filters appended as query parameters (empty values are skipped)
    pub filters: Vec<(String, String)>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: "id,desc".to_string(),
            filters: Vec::new(),
        }
    }
}

impl ProductQuery {
    /// Set the page index
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the sort expression
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Add a filter parameter
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Flatten into query pairs
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
            ("sort".to_string(), self.sort.clone()),
        ];
        pairs.extend(
            self.filters
                .iter()
                .filter(|(_, value)| !value.is_empty())
                .cloned(),
        );
        pairs
    }
}

// ============================================================================
// Admin shapes
// ============================================================================

/// Product row of the admin listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    /// Product ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// List price
    pub price: f64,
    /// Discounted price
    #[serde(default)]
    pub discount_price: Option<f64>,
    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Name of the owning category
    #[serde(default)]
    pub category_name: Option<String>,
    /// Whether the product is listed
    #[serde(default)]
    pub active: bool,
    /// Whether the product is featured
    #[serde(default)]
    pub featured: Option<bool>,
}

/// Product as returned by the admin endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAdmin {
    /// Storefront view of the product
    #[serde(flatten)]
    pub detail: ProductDetail,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// New product; image URLs come from a separate upload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    /// Display name
    pub name: String,
    /// Long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// List price
    pub price: f64,
    /// Discounted price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    /// Discount window start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_start_date: Option<String>,
    /// Discount window end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_end_date: Option<String>,
    /// Owning category
    pub category_id: i64,
    /// Whether the product is listed
    pub active: bool,
    /// Whether the product is featured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Thumbnail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Gallery image URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
}

/// Product changes; unset fields are not sent, so the same value serves a
/// full `PUT` and a partial `PATCH`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateRequest {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// List price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Discounted price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    /// Discount window start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_start_date: Option<String>,
    /// Discount window end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_end_date: Option<String>,
    /// Owning category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Whether the product is listed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Whether the product is featured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Thumbnail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Gallery image URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
}

/// Category as returned by the admin endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAdmin {
    /// Category ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Category create/update body
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRequest {
    /// Display name
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
