//! Configuration types for the Shopify session SDK.
//!
//! This module provides the process-wide configuration used to build the
//! static resource defaults, plus the validated value types sessions and
//! sites are made of.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ShopifyConfig`]: Process-wide settings (user agent, retry ceiling, timeout)
//! - [`ShopifyConfigBuilder`]: A builder for constructing [`ShopifyConfig`] instances
//! - [`ShopDomain`]: A validated shop domain
//! - [`SiteUrl`]: A validated site URL with embedded credentials split out
//! - [`ApiVersion`]: A Shopify API version and the version registry
//!
//! # Example
//!
//! ```rust
//! use shopify_session::ShopifyConfig;
//! use std::time::Duration;
//!
//! let config = ShopifyConfig::builder()
//!     .user_agent_prefix("MyApp/1.0")
//!     .max_retries(10)
//!     .timeout(Duration::from_secs(30))
//!     .build();
//!
//! assert_eq!(config.max_retries(), Some(10));
//! ```

mod newtypes;
mod version;

pub use newtypes::{ShopDomain, SiteUrl};
pub use version::{ApiVersion, UNSTABLE};

use std::collections::HashMap;
use std::time::Duration;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process-wide configuration for resource requests.
///
/// A `ShopifyConfig` describes the static defaults every execution context
/// starts from. It never carries tenant data: shops, tokens and versions
/// come from a [`Session`](crate::Session) activated per thread or task.
///
/// # Thread Safety
///
/// `ShopifyConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Retry Ceiling
///
/// `max_retries` bounds how many times a rate-limited (429) request is
/// re-issued. The default is `None`: retry for as long as the server keeps
/// answering 429.
#[derive(Clone, Debug, Default)]
pub struct ShopifyConfig {
    user_agent_prefix: Option<String>,
    max_retries: Option<u32>,
    timeout: Option<Duration>,
    default_headers: HashMap<String, String>,
}

impl ShopifyConfig {
    /// Creates a new builder for constructing a `ShopifyConfig`.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the 429 retry ceiling, if configured.
    #[must_use]
    pub const fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the extra static headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds the `User-Agent` header value.
    ///
    /// Format: `[<prefix> | ]ShopifyAPI/<version> Rust`.
    #[must_use]
    pub fn user_agent(&self) -> String {
        let prefix = self
            .user_agent_prefix
            .as_deref()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        format!("{prefix}ShopifyAPI/{SDK_VERSION} Rust")
    }
}

// Verify ShopifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
};

/// Builder for constructing [`ShopifyConfig`] instances.
///
/// All fields are optional.
///
/// # Defaults
///
/// - `user_agent_prefix`: `None`
/// - `max_retries`: `None` (unbounded 429 retries)
/// - `timeout`: `None` (reqwest default)
/// - `default_headers`: empty
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    user_agent_prefix: Option<String>,
    max_retries: Option<u32>,
    timeout: Option<Duration>,
    default_headers: HashMap<String, String>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Caps the number of retries after a 429 response.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a static header sent with every request.
    ///
    /// `User-Agent` is always set by the SDK and cannot be overridden here.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Builds the [`ShopifyConfig`].
    #[must_use]
    pub fn build(self) -> ShopifyConfig {
        ShopifyConfig {
            user_agent_prefix: self.user_agent_prefix,
            max_retries: self.max_retries,
            timeout: self.timeout,
            default_headers: self.default_headers,
        }
    }
}
