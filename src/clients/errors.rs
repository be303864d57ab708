//! HTTP-specific error types for the Shopify session SDK.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, and request validation failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses, carrying status, headers and body
//! - [`MaxHttpRetriesExceededError`]: A configured 429 retry ceiling was reached
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! Rate limiting is just a [`HttpError::Response`] whose `code` is 429;
//! [`ShopifyConnection`](crate::clients::ShopifyConnection) matches on that
//! and never surfaces it unless a retry ceiling is configured.
//!
//! # Example
//!
//! ```rust,ignore
//! match connection.open(&request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::MaxRetries(e)) => println!("Gave up after {} tries", e.tries),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::clients::http_response::HttpResponse;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The original status code, headers and body are kept so callers can act
/// on them. `message` is a JSON summary of the body's `errors`, `error` and
/// `error_description` fields plus an `error_reference` built from
/// `X-Request-Id`.
///
/// # Example
///
/// ```rust
/// use shopify_session::clients::HttpResponseError;
/// use std::collections::HashMap;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"error":"Not found"}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
///     headers: HashMap::new(),
///     body: serde_json::json!({"error": "Not found"}),
/// };
///
/// assert!(!error.is_rate_limited());
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponseError {
    /// Builds the error from a non-2xx response.
    #[must_use]
    pub fn from_response(response: HttpResponse) -> Self {
        let message = Self::serialize_error(&response);
        let error_reference = response.request_id().map(String::from);

        Self {
            code: response.code,
            message,
            error_reference,
            headers: response.headers,
            body: response.body,
        }
    }

    /// Returns `true` for `429 Too Many Requests`.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.code == 429
    }

    /// Returns the `Retry-After` header in seconds, if present and numeric.
    #[must_use]
    pub fn retry_after(&self) -> Option<f64> {
        self.headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
    }

    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(errors) = response.body.get("errors") {
            error_body.insert("errors".to_string(), errors.clone());
        }
        if let Some(error) = response.body.get("error") {
            error_body.insert("error".to_string(), error.clone());
            if let Some(desc) = response.body.get("error_description") {
                error_body.insert("error_description".to_string(), desc.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Error returned when the optional 429 retry ceiling has been reached.
///
/// Only produced when a ceiling is configured through
/// [`ShopifyConfigBuilder::max_retries`](crate::ShopifyConfigBuilder::max_retries)
/// or [`ShopifyConnection::max_retries`](crate::clients::ShopifyConnection::max_retries).
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The configured 429 retry ceiling was reached.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if this error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_with(code: u16, headers: &[(&str, &str)], body: serde_json::Value) -> HttpResponse {
        let headers = headers
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect();
        HttpResponse::new(code, headers, body)
    }

    #[test]
    fn test_from_response_keeps_status_headers_and_body() {
        let response = response_with(
            422,
            &[("x-request-id", "abc-123")],
            json!({"errors": {"title": ["can't be blank"]}}),
        );

        let error = HttpResponseError::from_response(response);
        assert_eq!(error.code, 422);
        assert_eq!(error.error_reference.as_deref(), Some("abc-123"));
        assert_eq!(error.body["errors"]["title"][0], "can't be blank");
        assert!(error.message.contains("can't be blank"));
        assert!(error.message.contains("abc-123"));
        assert!(error.headers.contains_key("x-request-id"));
    }

    #[test]
    fn test_error_description_only_included_with_error() {
        let response = response_with(
            401,
            &[],
            json!({"error": "invalid_token", "error_description": "expired"}),
        );
        let error = HttpResponseError::from_response(response);
        assert!(error.message.contains("expired"));

        let response = response_with(401, &[], json!({"error_description": "expired"}));
        let error = HttpResponseError::from_response(response);
        assert_eq!(error.message, "{}");
    }

    #[test]
    fn test_retry_after_parsing() {
        let error = HttpResponseError::from_response(response_with(
            429,
            &[("retry-after", "2.5")],
            json!({}),
        ));
        assert!(error.is_rate_limited());
        assert!((error.retry_after().unwrap() - 2.5).abs() < f64::EPSILON);

        let error = HttpResponseError::from_response(response_with(
            429,
            &[("retry-after", "soon")],
            json!({}),
        ));
        assert!(error.retry_after().is_none());

        let error = HttpResponseError::from_response(response_with(429, &[], json!({})));
        assert!(error.retry_after().is_none());
    }

    #[test]
    fn test_status_accessor() {
        let error = HttpError::Response(HttpResponseError::from_response(response_with(
            401,
            &[],
            json!({}),
        )));
        assert_eq!(error.status(), Some(401));

        let error = HttpError::InvalidRequest(InvalidHttpRequestError::MissingBodyType);
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 429,
            tries: 3,
            message: r#"{"error":"Rate limited"}"#.to_string(),
            error_reference: None,
        };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_invalid_request_error_messages() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
        assert_eq!(
            InvalidHttpRequestError::MissingBodyType.to_string(),
            "Cannot set a body without also setting body_type."
        );
    }
}
