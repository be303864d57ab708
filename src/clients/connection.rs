//! Rate-limit-aware connection for Shopify API communication.
//!
//! [`ShopifyConnection`] wraps a single-request [`Transport`] and makes one
//! promise: a `429 Too Many Requests` is never surfaced. The connection
//! waits for the number of seconds named in `Retry-After` and re-sends the
//! identical request, for as long as the server keeps answering 429. Every
//! other outcome, success or failure, is returned unchanged after the first
//! attempt that produced it.
//!
//! # Retry Behavior
//!
//! - **429**: sleep `Retry-After` seconds (fractional allowed; 1 second if
//!   the header is missing or unparsable), then retry
//! - **Anything else**: returned immediately, no delay
//!
//! An optional ceiling ([`ShopifyConnection::max_retries`]) turns an endless
//! 429 loop into [`HttpError::MaxRetries`].

use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{HttpTransport, Transport};
use crate::config::ShopifyConfig;

/// Wait used when a 429 response carries no usable `Retry-After`.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Connection to one site that transparently retries rate-limited requests.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_session::clients::{HttpMethod, HttpRequest, ShopifyConnection};
/// use shopify_session::ShopifyConfig;
///
/// let connection = ShopifyConnection::new(
///     "https://my-store.myshopify.com/admin/api/2025-10",
///     &ShopifyConfig::default(),
/// )?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "shop.json")
///     .header("X-Shopify-Access-Token", "access-token")
///     .build()?;
///
/// let response = connection.open(&request).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ShopifyConnection<T = HttpTransport> {
    site: String,
    transport: T,
    max_retries: Option<u32>,
}

impl ShopifyConnection<HttpTransport> {
    /// Creates a reqwest-backed connection for `site`.
    ///
    /// Timeout and retry ceiling come from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(site: impl Into<String>, config: &ShopifyConfig) -> Result<Self, HttpError> {
        let mut connection = Self::with_transport(site, HttpTransport::new(config)?);
        connection.max_retries = config.max_retries();
        Ok(connection)
    }
}

impl<T: Transport> ShopifyConnection<T> {
    /// Creates a connection for `site` over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(site: impl Into<String>, transport: T) -> Self {
        Self {
            site: site.into(),
            transport,
            max_retries: None,
        }
    }

    /// Caps the number of retries after a 429 response.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Returns the site every request is sent to.
    #[must_use]
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request`, retrying while the server answers 429.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged for every failure other than
    /// 429. Returns [`HttpError::MaxRetries`] only when a retry ceiling is
    /// configured and reached.
    pub async fn open(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut retries: u32 = 0;

        loop {
            let error = match self.transport.open(&self.site, request).await {
                Err(HttpError::Response(error)) if error.is_rate_limited() => error,
                outcome => return outcome,
            };

            if self.max_retries.is_some_and(|max| retries >= max) {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code: error.code,
                    tries: retries + 1,
                    message: error.message,
                    error_reference: error.error_reference,
                }));
            }

            let delay = Self::retry_delay(&error);
            retries += 1;
            tracing::warn!(
                "Rate limited on {} {}; retry {} in {:.3}s",
                request.http_method,
                request.path,
                retries,
                delay.as_secs_f64()
            );

            tokio::time::sleep(delay).await;
        }
    }

    fn retry_delay(error: &HttpResponseError) -> Duration {
        match error.retry_after().map(Duration::try_from_secs_f64) {
            Some(Ok(delay)) => delay,
            _ => {
                tracing::warn!(
                    "429 response without a usable Retry-After header; waiting {}s",
                    RETRY_WAIT_TIME
                );
                Duration::from_secs(RETRY_WAIT_TIME)
            }
        }
    }
}
