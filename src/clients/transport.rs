//! Single-request transport for Shopify API communication.
//!
//! The [`Transport`] trait is the seam between
//! [`ShopifyConnection`](crate::clients::ShopifyConnection) and the network:
//! one call, one HTTP exchange, no retries. [`HttpTransport`] is the
//! reqwest-backed implementation.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ShopifyConfig;

/// Sends exactly one HTTP request.
///
/// Implementations return `Ok` for 2xx responses and
/// [`HttpError::Response`] for every other status, carrying the status
/// code, headers and body. They must not retry.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends `request` to `site` and returns the parsed response.
    async fn open(&self, site: &str, request: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// reqwest-backed [`Transport`].
///
/// # Thread Safety
///
/// `HttpTransport` is `Send + Sync`; the inner reqwest client shares its
/// connection pool across clones.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a transport honoring the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be initialized.
    pub fn new(config: &ShopifyConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for HttpTransport {
    async fn open(&self, site: &str, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = request.url(site);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body_type) = &request.body_type {
            req_builder = req_builder.header("Content-Type", body_type.as_content_type());
        }
        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text).unwrap_or_else(|_| {
                // Keep non-JSON error bodies (proxies, 5xx pages) readable
                if code >= 400 {
                    serde_json::json!({ "raw_body": body_text })
                } else {
                    serde_json::json!({})
                }
            })
        };

        let response = HttpResponse::new(code, res_headers, body);

        if let Some(reason) = response.deprecation_reason() {
            tracing::warn!(
                "Deprecated request to Shopify API at {}, received reason: {}",
                request.path,
                reason
            );
        }
        if let Some(limit) = response.api_call_limit {
            tracing::debug!(
                "API call limit for {}: {}/{}",
                request.path,
                limit.request_count,
                limit.bucket_size
            );
        }

        if response.is_ok() {
            Ok(response)
        } else {
            Err(HttpError::Response(HttpResponseError::from_response(response)))
        }
    }
}
