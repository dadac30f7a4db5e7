//! reqwest-backed transport
//!
//! The underlying `reqwest::Client` keeps a cookie jar, so the http-only
//! `refresh_token` cookie set by login is replayed on the refresh call without
//! the client ever reading it.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};

use super::{ApiResponse, Transport};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::request::PendingRequest;

/// HTTP transport talking to the gateway
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport for the configured gateway
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ClientError::invalid_config(format!("Invalid base URL {}: {e}", config.base_url))
        })?;

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            http_client: builder.build()?,
        })
    }

    /// Gateway base URL
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a request path
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        // Keep any path prefix on the base URL (e.g. a reverse-proxy mount point).
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::invalid_config(format!("Invalid request path {path}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &PendingRequest) -> Result<ApiResponse> {
        let url = self.url_for(request.path())?;

        let mut builder = self
            .http_client
            .request(request.method().clone(), url)
            .headers(request.headers().clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if !request.query_params().is_empty() {
            builder = builder.query(request.query_params());
        }
        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        tracing::trace!(%status, path = request.path(), bytes = body.len(), "Response received");

        Ok(ApiResponse::new(status, headers, body))
    }
}
