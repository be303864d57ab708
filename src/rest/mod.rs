//! Session activation and REST resources.
//!
//! - [`ShopifyResource`]: binds a [`Session`](crate::Session) or site to the
//!   calling thread or task
//! - [`ResourceContext`]: the site, headers and version requests are built from
//! - [`RestResource`] / [`SingletonResource`]: CRUD operations over a context
//! - [`ResourceError`]: errors from resource operations
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_session::rest::resources::Shop;
//! use shopify_session::rest::SingletonResource;
//! use shopify_session::{ApiVersion, Session, ShopifyResource};
//!
//! ApiVersion::define_known_versions();
//! let session = Session::new("my-store", "2025-10", "access-token")?;
//!
//! ShopifyResource::activate_session(&session);
//! let shop = Shop::current(&ShopifyResource::context()).await?;
//! ShopifyResource::clear_session();
//! ```

mod context;
mod errors;
mod resource;
pub mod resources;

pub use context::{ResourceContext, ShopifyResource, ACCESS_TOKEN_HEADER, AUTHORIZATION_HEADER};
pub use errors::ResourceError;
pub use resource::{RestResource, SingletonResource};
