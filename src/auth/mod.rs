//! Authentication types for the Shopify session SDK.
//!
//! - [`Session`]: an immutable {shop, API version, access token} bundle that
//!   is activated per thread or task through
//!   [`ShopifyResource`](crate::ShopifyResource).
//!
//! # Example
//!
//! ```rust
//! use shopify_session::{ApiVersion, Session, ShopifyResource};
//!
//! ApiVersion::define_known_versions();
//! let session = Session::new("my-store", "unstable", "access-token").unwrap();
//!
//! ShopifyResource::activate_session(&session);
//! assert!(ShopifyResource::is_active());
//! ShopifyResource::clear_session();
//! ```

pub mod session;

pub use session::Session;
