//! Type definitions for the storefront client
//!
//! Identifiers, the response envelope, and the request/response shapes of the
//! backend services reachable through the gateway.

// Module declarations
pub mod auth;
pub mod catalog;
pub mod envelope;
pub mod identifiers;
pub mod inventory;
pub mod order;
pub mod payment;

pub use auth::{
    AuthTokenResponse, ForgotPasswordRequest, Gender, LoginRequest, OtpResponse, RegisterRequest,
    ResetPasswordRequest, ResetPasswordResponse, SessionInfo, SessionMeta, UserProfile,
    UserSession, VerifyOtpRequest, VerifyOtpResponse,
};
pub use catalog::{
    CategoryAdmin, CategoryInfo, CategoryRequest, ProductAdmin, ProductCreateRequest,
    ProductDetail, ProductListItem, ProductQuery, ProductSummary, ProductUpdateRequest,
};
pub use envelope::{ApiEnvelope, Page, unwrap_envelope};
pub use identifiers::{AccessCredential, SessionId};
pub use inventory::{
    Inventory, InventoryAdjustRequest, InventoryCreateRequest, InventoryFilter,
    InventoryUpdateRequest,
};
pub use order::{
    Order, OrderCreateRequest, OrderFilter, OrderItem, OrderItemRequest, OrderStatus,
    OrderUpdateRequest,
};
pub use payment::{Payment, PaymentCreateRequest, PaymentQuery, PaymentStatus, PaymentUrl};
