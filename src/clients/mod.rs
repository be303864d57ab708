//! HTTP transport types for Shopify API communication.
//!
//! # Overview
//!
//! - [`ShopifyConnection`]: per-site connection that retries 429 responses
//! - [`Transport`]: the single-request seam under the connection
//! - [`HttpTransport`]: the reqwest-backed transport
//! - [`HttpRequest`] / [`HttpResponse`]: request and parsed response
//! - [`HttpError`]: everything that can go wrong on the wire
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: waits for `Retry-After` seconds (1 second if the
//!   header is absent) and re-sends the same request, indefinitely unless a
//!   ceiling is configured
//! - **Anything else**: returned immediately without retry
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_session::clients::{HttpMethod, HttpRequest, ShopifyConnection};
//! use shopify_session::ShopifyConfig;
//!
//! let connection = ShopifyConnection::new(
//!     "https://my-store.myshopify.com/admin/api/2025-10",
//!     &ShopifyConfig::default(),
//! )?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "products.json")
//!     .header("X-Shopify-Access-Token", "access-token")
//!     .build()?;
//!
//! let response = connection.open(&request).await?;
//! ```

mod connection;
mod errors;
mod http_request;
mod http_response;
mod transport;

pub use connection::{ShopifyConnection, RETRY_WAIT_TIME};
pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiCallLimit, HttpResponse};
pub use transport::{HttpTransport, Transport};
