//! # Shopify Session
//!
//! Multi-tenant session activation for the Shopify Admin REST API.
//!
//! A single process may serve many shops at once. Each thread (or task)
//! activates its own [`Session`]; the site, access token and API version it
//! binds are visible only to that execution context, while the static
//! defaults (`User-Agent`, `Accept`) are shared by all of them.
//!
//! ## Overview
//!
//! This crate provides:
//! - A process-wide [`ApiVersion`] registry with `unstable` always available
//! - The [`Session`] value object (shop, version, token)
//! - Per-thread and per-task activation via [`ShopifyResource`]
//! - [`clients::ShopifyConnection`], which retries `429 Too Many Requests`
//!   after the server's `Retry-After` delay
//! - A thin [`rest::RestResource`] layer driven by a [`ResourceContext`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_session::{ApiVersion, Session, ShopifyResource};
//!
//! ApiVersion::define_known_versions();
//!
//! let session = Session::new("my-store", "2025-10", "access-token").unwrap();
//! ShopifyResource::activate_session(&session);
//!
//! assert_eq!(
//!     ShopifyResource::site().as_deref(),
//!     Some("https://my-store.myshopify.com/admin/api/2025-10")
//! );
//!
//! ShopifyResource::clear_session();
//! assert!(!ShopifyResource::is_active());
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use shopify_session::rest::resources::Shop;
//! use shopify_session::rest::SingletonResource;
//! use shopify_session::ShopifyResource;
//!
//! ShopifyResource::activate_session(&session);
//! let shop = Shop::current(&ShopifyResource::context()).await?;
//! ```
//!
//! ## Async Runtimes
//!
//! On a multi-threaded runtime a task can move between worker threads, so a
//! thread binding is not enough. Wrap the work in [`ShopifyResource::scope`]:
//!
//! ```rust,ignore
//! let shop = ShopifyResource::scope(&session, async {
//!     Shop::current(&ShopifyResource::context()).await
//! })
//! .await?;
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use shopify_session::{ShopifyConfig, ShopifyResource};
//!
//! let config = ShopifyConfig::builder()
//!     .user_agent_prefix("My App/1.0")
//!     .max_retries(10)
//!     .build();
//!
//! // Only the first call in a process succeeds.
//! let _ = ShopifyResource::init(config);
//! ```

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use auth::Session;
pub use config::{ApiVersion, ShopDomain, ShopifyConfig, ShopifyConfigBuilder, SiteUrl, SDK_VERSION};
pub use error::ConfigError;
pub use rest::{ResourceContext, ResourceError, ShopifyResource};

pub use clients::{
    HttpError, HttpMethod, HttpRequest, HttpResponse, HttpResponseError, ShopifyConnection,
};
