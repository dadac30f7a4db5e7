//! Gateway endpoint paths
//!
//! Every call goes through the API gateway; these paths are relative to the
//! configured base URL. Caller-supplied text segments are percent-encoded.

use std::borrow::Cow;

fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Authentication endpoints
pub mod auth {
    /// `POST` register a new account
    pub const REGISTER: &str = "/api/auth/register";
    /// `POST` log in
    pub const LOGIN: &str = "/api/auth/login";
    /// `POST` log out (uses the refresh cookie)
    pub const LOGOUT: &str = "/api/auth/logout";
    /// `GET` current user
    pub const ME: &str = "/api/auth/me";
    /// `GET` current user profile
    pub const ME_DETAILS: &str = "/api/auth/me/details";
    /// `POST` exchange the refresh cookie for a new access token
    pub const REFRESH_TOKEN: &str = "/api/auth/refresh-token";
    /// `GET` active sessions of the current user
    pub const SESSIONS: &str = "/api/auth/sessions";
    /// `POST` start a password reset
    pub const FORGOT_PASSWORD: &str = "/api/auth/forgot";
    /// `POST` resend the reset code
    pub const RESEND_OTP: &str = "/api/auth/resend-otp";
    /// `POST` verify the reset code
    pub const VERIFY_OTP: &str = "/api/auth/verify-otp";
    /// `POST` set a new password
    pub const RESET_PASSWORD: &str = "/api/auth/reset";

    /// `DELETE` one session
    #[must_use]
    pub fn session(session_id: &str) -> String {
        format!("{SESSIONS}/{}", super::segment(session_id))
    }
}

/// Public catalog endpoints
pub mod catalog {
    /// `GET` product listing
    pub const PRODUCTS: &str = "/api/products";
    /// `GET` product search
    pub const SEARCH: &str = "/api/products/search";
    /// `GET` featured products
    pub const FEATURED: &str = "/api/products/featured";
    /// `GET` category listing
    pub const CATEGORIES: &str = "/api/categories";

    /// `GET` one product
    #[must_use]
    pub fn product(id: i64) -> String {
        format!("{PRODUCTS}/{id}")
    }

    /// `GET` one product by slug
    #[must_use]
    pub fn product_by_slug(slug: &str) -> String {
        format!("{PRODUCTS}/slug/{}", super::segment(slug))
    }

    /// `GET` products of a category
    #[must_use]
    pub fn products_in_category(category_id: i64) -> String {
        format!("{PRODUCTS}/category/{category_id}")
    }

    /// `GET` one category
    #[must_use]
    pub fn category(id: i64) -> String {
        format!("{CATEGORIES}/{id}")
    }

    /// `GET` one category by slug
    #[must_use]
    pub fn category_by_slug(slug: &str) -> String {
        format!("{CATEGORIES}/slug/{}", super::segment(slug))
    }
}

/// Order endpoints
pub mod orders {
    /// `POST` create, `GET` admin listing
    pub const BASE: &str = "/api/orders";
    /// `GET` orders of the current user
    pub const MY_ORDERS: &str = "/api/orders/my-orders";

    /// `GET` one order
    #[must_use]
    pub fn by_id(id: i64) -> String {
        format!("{BASE}/{id}")
    }

    /// `GET` one order by number
    #[must_use]
    pub fn by_number(order_number: &str) -> String {
        format!("{BASE}/number/{}", super::segment(order_number))
    }

    /// `PUT` admin status update
    #[must_use]
    pub fn status(id: i64) -> String {
        format!("{BASE}/{id}/status")
    }

    /// `PUT` cancel
    #[must_use]
    pub fn cancel(id: i64) -> String {
        format!("{BASE}/{id}/cancel")
    }
}

/// Inventory endpoints
pub mod inventory {
    /// Inventory root
    pub const BASE: &str = "/api/inventory";
    /// `GET` low-stock items
    pub const LOW_STOCK: &str = "/api/inventory/low-stock";

    /// `GET` stock of a product (public)
    #[must_use]
    pub fn by_product(product_id: i64) -> String {
        format!("{BASE}/product/{product_id}")
    }

    /// `GET` availability check (public)
    #[must_use]
    pub fn check(product_id: i64) -> String {
        format!("{BASE}/product/{product_id}/check")
    }

    /// `GET` or `PUT` one record
    #[must_use]
    pub fn by_id(id: i64) -> String {
        format!("{BASE}/{id}")
    }

    /// `POST` relative adjustment
    #[must_use]
    pub fn adjust(id: i64) -> String {
        format!("{BASE}/{id}/adjust")
    }
}

/// Payment endpoints
pub mod payments {
    /// `GET` admin listing
    pub const BASE: &str = "/api/payments";
    /// `POST` create a payment and obtain the provider URL
    pub const CREATE: &str = "/api/payments/create";
    /// `GET` payments of the current user
    pub const MY_PAYMENTS: &str = "/api/payments/my-payments";
    /// `GET` payment provider callback (public)
    pub const VNPAY_CALLBACK: &str = "/api/payments/vnpay-callback";

    /// `GET` one payment
    #[must_use]
    pub fn by_id(id: i64) -> String {
        format!("{BASE}/{id}")
    }

    /// `GET` payment of an order
    #[must_use]
    pub fn by_order(order_id: i64) -> String {
        format!("{BASE}/order/{order_id}")
    }
}

/// Admin catalog endpoints
pub mod admin {
    /// `GET` listing, `POST` create
    pub const PRODUCTS: &str = "/api/admin/products";
    /// `GET` listing, `POST` create
    pub const CATEGORIES: &str = "/api/admin/categories";

    /// `GET`, `PUT`, `PATCH` or `DELETE` one product
    #[must_use]
    pub fn product(id: i64) -> String {
        format!("{PRODUCTS}/{id}")
    }

    /// `GET`, `PUT` or `DELETE` one category
    #[must_use]
    pub fn category(id: i64) -> String {
        format!("{CATEGORIES}/{id}")
    }
}
