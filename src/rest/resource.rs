//! REST resource traits for CRUD operations.
//!
//! [`RestResource`] gives a serde type `find()`, `all()`, `save()` and
//! `delete()` against the site bound in a [`ResourceContext`]. Every request
//! carries the context's headers and goes through a
//! [`ShopifyConnection`](crate::clients::ShopifyConnection), so rate-limited
//! calls are retried before the resource layer ever sees them.
//!
//! Paths are relative to the context's site:
//!
//! | Operation | Method | Path                  |
//! |-----------|--------|-----------------------|
//! | `find`    | GET    | `<plural>/<id>.json`  |
//! | `all`     | GET    | `<plural>.json`       |
//! | `save`    | POST   | `<plural>.json`       |
//! | `save`    | PUT    | `<plural>/<id>.json`  |
//! | `delete`  | DELETE | `<plural>/<id>.json`  |
//! | `current` | GET    | `<key>.json`          |
//!
//! # Example
//!
//! ```rust,ignore
//! use serde::{Deserialize, Serialize};
//! use shopify_session::rest::RestResource;
//! use shopify_session::ShopifyResource;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Product {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     pub id: Option<u64>,
//!     pub title: String,
//! }
//!
//! impl RestResource for Product {
//!     type Id = u64;
//!     const NAME: &'static str = "Product";
//!     const PLURAL: &'static str = "products";
//!
//!     fn get_id(&self) -> Option<u64> {
//!         self.id
//!     }
//! }
//!
//! ShopifyResource::activate_session(&session);
//! let product = Product::find(&ShopifyResource::context(), 123).await?;
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::{DataType, HttpMethod, HttpRequest, HttpResponse};
use crate::rest::{ResourceContext, ResourceError};

/// A REST resource that can be fetched, created, updated and deleted.
#[allow(async_fn_in_trait)]
pub trait RestResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The type of the resource's identifier.
    type Id: Display + Clone + Send + Sync;

    /// The singular name of the resource (e.g., "Product").
    const NAME: &'static str;

    /// The plural name used in URL paths and collection bodies.
    const PLURAL: &'static str;

    /// Returns the resource's ID, or `None` if it was never saved.
    fn get_id(&self) -> Option<Self::Id>;

    /// Returns the lowercase key wrapping single resources in JSON bodies.
    #[must_use]
    fn resource_key() -> String {
        Self::NAME.to_lowercase()
    }

    /// Finds a single resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoActiveSite`] if `context` is inactive, or
    /// the HTTP error of the failed request unchanged.
    async fn find(context: &ResourceContext, id: Self::Id) -> Result<Self, ResourceError> {
        let path = format!("{}/{id}.json", Self::PLURAL);
        let response = send(context, HttpMethod::Get, &path, None, None).await?;
        extract(Self::NAME, response.body, &Self::resource_key())
    }

    /// Lists resources, optionally filtered by query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoActiveSite`] if `context` is inactive, or
    /// the HTTP error of the failed request unchanged.
    async fn all(
        context: &ResourceContext,
        query: Option<HashMap<String, String>>,
    ) -> Result<Vec<Self>, ResourceError> {
        let path = format!("{}.json", Self::PLURAL);
        let query = query.filter(|q| !q.is_empty());
        let response = send(context, HttpMethod::Get, &path, None, query).await?;
        extract(Self::NAME, response.body, Self::PLURAL)
    }

    /// Creates the resource if it has no ID, otherwise updates it.
    ///
    /// Returns the resource as the server stored it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoActiveSite`] if `context` is inactive,
    /// [`ResourceError::Json`] if the resource cannot be encoded, or the
    /// HTTP error of the failed request unchanged.
    async fn save(&self, context: &ResourceContext) -> Result<Self, ResourceError> {
        let key = Self::resource_key();

        let mut body = serde_json::Map::new();
        body.insert(
            key.clone(),
            serde_json::to_value(self).map_err(|source| ResourceError::Json {
                resource: Self::NAME,
                source,
            })?,
        );

        let (method, path) = match self.get_id() {
            Some(id) => (HttpMethod::Put, format!("{}/{id}.json", Self::PLURAL)),
            None => (HttpMethod::Post, format!("{}.json", Self::PLURAL)),
        };

        let response = send(context, method, &path, Some(Value::Object(body)), None).await?;
        extract(Self::NAME, response.body, &key)
    }

    /// Deletes the resource with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoActiveSite`] if `context` is inactive, or
    /// the HTTP error of the failed request unchanged.
    async fn delete(context: &ResourceContext, id: Self::Id) -> Result<(), ResourceError> {
        let path = format!("{}/{id}.json", Self::PLURAL);
        send(context, HttpMethod::Delete, &path, None, None).await?;
        Ok(())
    }
}

/// A resource with exactly one instance per shop (e.g., `Shop`).
#[allow(async_fn_in_trait)]
pub trait SingletonResource: RestResource {
    /// Fetches the shop's instance from `<key>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoActiveSite`] if `context` is inactive, or
    /// the HTTP error of the failed request unchanged.
    async fn current(context: &ResourceContext) -> Result<Self, ResourceError> {
        let key = Self::resource_key();
        let path = format!("{key}.json");
        let response = send(context, HttpMethod::Get, &path, None, None).await?;
        extract(Self::NAME, response.body, &key)
    }
}

/// Sends one request built from `context` through its connection.
async fn send(
    context: &ResourceContext,
    method: HttpMethod,
    path: &str,
    body: Option<Value>,
    query: Option<HashMap<String, String>>,
) -> Result<HttpResponse, ResourceError> {
    let connection = context.connection()?;

    let mut builder = HttpRequest::builder(method, path).headers(context.headers().clone());
    if let Some(body) = body {
        builder = builder.body(body).body_type(DataType::Json);
    }
    if let Some(query) = query {
        builder = builder.query(query);
    }
    let request = builder.build()?;

    tracing::debug!("{} {}", method, request.url(connection.site()));

    Ok(connection.open(&request).await?)
}

/// Decodes the value under `key` in a response body.
fn extract<T: DeserializeOwned>(
    resource: &'static str,
    mut body: Value,
    key: &str,
) -> Result<T, ResourceError> {
    let value = body
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ResourceError::MissingKey {
            resource,
            key: key.to_string(),
        })?;

    serde_json::from_value(value).map_err(|source| ResourceError::Json { resource, source })
}
