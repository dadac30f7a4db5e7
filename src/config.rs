//! Client configuration
//!
//! Defaults can be overridden from the environment:
//!
//! - `STOREFRONT_API_BASE_URL` - gateway base URL (default `http://localhost:8080`)
//! - `STOREFRONT_USER_AGENT` - user agent sent to the gateway and used for session metadata

use std::time::Duration;
use typed_builder::TypedBuilder;

use crate::auth::PublicEndpoints;
use crate::endpoints;

/// Environment variable overriding the gateway base URL
pub const BASE_URL_ENV: &str = "STOREFRONT_API_BASE_URL";

/// Environment variable overriding the user agent
pub const USER_AGENT_ENV: &str = "STOREFRONT_USER_AGENT";

/// Gateway used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Login view the session observer redirects to
pub const DEFAULT_LOGIN_VIEW: &str = "/login";

fn default_base_url() -> String {
    std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn default_user_agent() -> String {
    std::env::var(USER_AGENT_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| format!("storefront-client/{}", crate::VERSION))
}

/// Configuration for [`ApiClient`](crate::ApiClient)
///
/// All calls must go through the API gateway; the gateway adds the
/// service-to-service secret itself, so nothing here configures it.
#[derive(Debug, Clone, TypedBuilder)]
#[builder(
    builder_method(doc = "Create a new builder for ClientConfig"),
    builder_type(doc = "Builder for ClientConfig", vis = "pub"),
    build_method(doc = "Build the ClientConfig")
)]
pub struct ClientConfig {
    /// Gateway base URL
    #[builder(default = default_base_url(), setter(into))]
    pub base_url: String,

    /// Path of the session refresh endpoint
    #[builder(default = endpoints::auth::REFRESH_TOKEN.to_string(), setter(into))]
    pub refresh_path: String,

    /// Login view that session observers redirect to
    #[builder(default = DEFAULT_LOGIN_VIEW.to_string(), setter(into))]
    pub login_view: String,

    /// Path prefixes that never carry a bearer credential
    #[builder(default)]
    pub public_endpoints: PublicEndpoints,

    /// User agent, also the source of the session metadata sent on refresh
    #[builder(default = default_user_agent(), setter(into))]
    pub user_agent: String,

    /// Serialize concurrent refreshes and let waiters reuse a fresh credential
    #[builder(default = true)]
    pub coalesce_refresh: bool,

    /// Transport-level timeout per request
    #[builder(default, setter(strip_option))]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientConfig {
    /// Configuration from defaults and environment overrides
    #[must_use]
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Whether `path` is the refresh endpoint
    #[must_use]
    pub fn is_refresh_path(&self, path: &str) -> bool {
        path.starts_with(&self.refresh_path)
    }
}
