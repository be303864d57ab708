//! Session value object for Shopify API authentication.
//!
//! This module provides the [`Session`] type: an immutable bundle of the
//! tenant shop, the resolved API version and the access token. A session is
//! handed to [`ShopifyResource::activate_session`](crate::ShopifyResource::activate_session)
//! to bind it to the calling thread or task.

use crate::config::{ApiVersion, ShopDomain};
use crate::error::ConfigError;
use std::fmt;

/// An authenticated session for one shop and one API version.
///
/// The version token is resolved against the [`ApiVersion`] registry when
/// the session is built, so a session that exists always names a defined
/// version.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync` and immutable after construction.
///
/// # Example
///
/// ```rust
/// use shopify_session::{ApiVersion, Session};
///
/// ApiVersion::define_known_versions();
///
/// let session = Session::new("shop1.myshopify.com", "unstable", "token1").unwrap();
/// assert_eq!(session.site(), "https://shop1.myshopify.com/admin/api/unstable");
/// assert_eq!(session.token(), "token1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    shop: ShopDomain,
    api_version: ApiVersion,
    token: String,
}

impl Session {
    /// Creates a session, resolving `version` against the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if `shop` is not a valid
    /// shop domain, or [`ConfigError::VersionNotFound`] if `version` has not
    /// been defined.
    pub fn new(
        shop: impl Into<String>,
        version: &str,
        token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let shop = ShopDomain::new(shop)?;
        let api_version = ApiVersion::resolve(version)?;

        Ok(Self {
            shop,
            api_version,
            token: token.into(),
        })
    }

    /// Returns the shop this session is for.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the resolved API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the access token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the versioned admin API root, e.g.
    /// `https://shop1.myshopify.com/admin/api/2019-04`.
    #[must_use]
    pub fn site(&self) -> String {
        self.api_version
            .api_path(&format!("https://{}", self.shop.as_ref()))
    }

    /// Returns `true` if the session carries a token.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("shop", &self.shop.as_ref())
            .field("api_version", &self.api_version.name())
            .field("token", &"*****")
            .finish()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn define_versions() {
        ApiVersion::define_known_versions();
        ApiVersion::define_version(ApiVersion::release("2019-04").unwrap());
    }

    #[test]
    fn test_session_site_uses_resolved_version() {
        define_versions();

        let session = Session::new("shop2.myshopify.com", "2019-04", "token2").unwrap();
        assert_eq!(session.site(), "https://shop2.myshopify.com/admin/api/2019-04");
        assert_eq!(session.api_version().name(), "2019-04");
        assert_eq!(session.shop().as_ref(), "shop2.myshopify.com");
    }

    #[test]
    fn test_session_normalizes_short_shop_name() {
        define_versions();

        let session = Session::new("shop1", "unstable", "token1").unwrap();
        assert_eq!(session.site(), "https://shop1.myshopify.com/admin/api/unstable");
    }

    #[test]
    fn test_session_accepts_custom_domain_and_port() {
        define_versions();

        let session = Session::new("shop.example.com", "unstable", "token1").unwrap();
        assert_eq!(session.site(), "https://shop.example.com/admin/api/unstable");

        let session = Session::new("localhost:3000", "2019-04", "token1").unwrap();
        assert_eq!(session.site(), "https://localhost:3000/admin/api/2019-04");
    }

    #[test]
    fn test_session_rejects_unknown_version() {
        define_versions();

        let result = Session::new("shop1.myshopify.com", "1999-01", "token1");
        assert!(matches!(result, Err(ConfigError::VersionNotFound { .. })));
    }

    #[test]
    fn test_session_rejects_invalid_shop() {
        define_versions();

        let result = Session::new("not a shop", "unstable", "token1");
        assert!(matches!(result, Err(ConfigError::InvalidShopDomain { .. })));
    }

    #[test]
    fn test_session_is_valid_requires_token() {
        define_versions();

        assert!(Session::new("shop1", "unstable", "token1").unwrap().is_valid());
        assert!(!Session::new("shop1", "unstable", "").unwrap().is_valid());
    }

    #[test]
    fn test_session_debug_masks_token() {
        define_versions();

        let session = Session::new("shop1", "unstable", "super-secret-token").unwrap();
        let debug_output = format!("{session:?}");
        assert!(!debug_output.contains("super-secret-token"));
        assert!(debug_output.contains("shop1.myshopify.com"));
    }

    #[test]
    fn test_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }
}
