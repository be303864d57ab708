//! Error types for REST resource operations.
//!
//! HTTP failures pass through as [`ResourceError::Http`] without being
//! reinterpreted, so callers keep the status code, headers and body of the
//! response that failed. A 429 never reaches this layer; the connection
//! retries it.
//!
//! # Example
//!
//! ```rust
//! use shopify_session::rest::ResourceError;
//!
//! let error = ResourceError::MissingKey { resource: "Shop", key: "shop".to_string() };
//! assert!(error.to_string().contains("shop"));
//! ```

use crate::clients::{HttpError, InvalidHttpRequestError};
use thiserror::Error;

/// Error type for REST resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No site is bound to the calling thread or task.
    #[error("No active session or site; activate a session before making requests")]
    NoActiveSite,

    /// The response body had no entry under the resource key.
    #[error("Response for {resource} is missing the '{key}' key")]
    MissingKey {
        /// The resource type name.
        resource: &'static str,
        /// The JSON key that was expected.
        key: String,
    },

    /// The response body could not be decoded into the resource type.
    #[error("Failed to decode {resource}: {source}")]
    Json {
        /// The resource type name.
        resource: &'static str,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The request failed at the HTTP layer.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl From<InvalidHttpRequestError> for ResourceError {
    fn from(error: InvalidHttpRequestError) -> Self {
        Self::Http(HttpError::InvalidRequest(error))
    }
}

impl ResourceError {
    /// Returns the HTTP status code of the failed response, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(error) => error.status(),
            _ => None,
        }
    }
}
