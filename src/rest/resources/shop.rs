//! Shop resource implementation.
//!
//! The Shop resource is a singleton: there is one shop per active session,
//! fetched with [`SingletonResource::current`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_session::rest::resources::Shop;
//! use shopify_session::rest::SingletonResource;
//! use shopify_session::ShopifyResource;
//!
//! ShopifyResource::activate_session(&session);
//! let shop = Shop::current(&ShopifyResource::context()).await?;
//! println!("Shop: {}", shop.name.as_deref().unwrap_or(""));
//! ```

use serde::{Deserialize, Serialize};

use crate::rest::{RestResource, SingletonResource};

/// A Shopify shop.
///
/// All fields are read-only and are never serialized into requests.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Shop {
    /// The unique identifier of the shop.
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// The name of the shop.
    #[serde(skip_serializing)]
    pub name: Option<String>,

    /// The contact email address for the shop.
    #[serde(skip_serializing)]
    pub email: Option<String>,

    /// The shop's custom domain (e.g., "www.example.com").
    #[serde(skip_serializing)]
    pub domain: Option<String>,

    /// The shop's myshopify.com domain.
    #[serde(skip_serializing)]
    pub myshopify_domain: Option<String>,

    /// The name of the Shopify plan the shop is on.
    #[serde(skip_serializing)]
    pub plan_name: Option<String>,

    /// The three-letter code for the shop's currency.
    #[serde(skip_serializing)]
    pub currency: Option<String>,

    /// The shop's IANA timezone name.
    #[serde(skip_serializing)]
    pub iana_timezone: Option<String>,
}

impl RestResource for Shop {
    type Id = u64;

    const NAME: &'static str = "Shop";
    const PLURAL: &'static str = "shops";

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

impl SingletonResource for Shop {}
