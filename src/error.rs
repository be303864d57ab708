//! Error types for the Shopify session SDK.
//!
//! This module contains the configuration and validation errors raised while
//! building sessions, resolving API versions, and activating a site.
//!
//! # Error Handling
//!
//! All constructors return `Result<T, ConfigError>` to enable fail-fast
//! validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use shopify_session::{ApiVersion, ConfigError};
//!
//! let result = ApiVersion::resolve("1999-01");
//! assert!(matches!(result, Err(ConfigError::VersionNotFound { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name', a host such as 'shop-name.myshopify.com', or 'host:port'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version string is malformed.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// API version is well formed but has not been defined in the registry.
    #[error("API version '{version}' is not defined. Call ApiVersion::define_known_versions() or ApiVersion::define_version() first.")]
    VersionNotFound {
        /// The version token that could not be resolved.
        version: String,
    },

    /// Site URL is invalid.
    #[error("Invalid site URL '{url}'. Please provide an absolute URL with scheme (e.g., 'https://shop.myshopify.com/admin').")]
    InvalidSiteUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Process-wide resource defaults can only be installed once.
    #[error("Resource defaults are already initialized. ShopifyResource::init() must run before the first request.")]
    DefaultsAlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shop_domain_error_message() {
        let error = ConfigError::InvalidShopDomain {
            domain: "bad domain!".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("bad domain!"));
        assert!(message.contains("Expected format"));
    }

    #[test]
    fn test_version_not_found_error_message() {
        let error = ConfigError::VersionNotFound {
            version: "2019-04".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("2019-04"));
        assert!(message.contains("define_known_versions"));
    }

    #[test]
    fn test_invalid_site_url_error_message() {
        let error = ConfigError::InvalidSiteUrl {
            url: "not a url".to_string(),
        };
        assert!(error.to_string().contains("not a url"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::DefaultsAlreadyInitialized;
        let _: &dyn std::error::Error = &error;
    }
}
