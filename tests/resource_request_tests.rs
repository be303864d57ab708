//! Integration tests for resource requests made through an activated context.
//!
//! These tests bind a mock server as the site and verify the headers,
//! paths and retry behavior of real HTTP exchanges.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::json;
use shopify_session::rest::resources::Shop;
use shopify_session::rest::{ResourceError, RestResource, SingletonResource};
use shopify_session::{ApiVersion, HttpError, Session, ShopifyResource};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    title: String,
}

impl RestResource for Product {
    type Id = u64;
    const NAME: &'static str = "Product";
    const PLURAL: &'static str = "products";

    fn get_id(&self) -> Option<u64> {
        self.id
    }
}

/// Binds the mock server to the calling thread with Basic credentials.
fn bind_site(server: &MockServer) {
    let uri = server.uri();
    let authority = uri.trim_start_matches("http://");
    ShopifyResource::set_site(&format!("http://user:pass@{authority}/admin")).unwrap();
}

// ============================================================================
// Site Binding Tests
// ============================================================================

#[tokio::test]
async fn test_shop_current_sends_basic_auth_from_site_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/shop.json"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .and(header_exists("User-Agent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "shop": {"id": 690_933_842, "name": "Apple Computers"}
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    bind_site(&server);
    let shop = Shop::current(&ShopifyResource::context()).await.unwrap();

    assert_eq!(shop.name.as_deref(), Some("Apple Computers"));
    assert_eq!(shop.id, Some(690_933_842));

    ShopifyResource::clear_session();
}

#[tokio::test]
async fn test_delete_sends_custom_headers() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/products/1.json"))
        .and(header("X-Custom", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    bind_site(&server);
    ShopifyResource::set_headers([("X-Custom", "abc")]);

    Product::delete(&ShopifyResource::context(), 1).await.unwrap();

    ShopifyResource::clear_session();
}

#[tokio::test]
async fn test_session_token_header_is_sent() {
    ApiVersion::define_known_versions();
    let session = Session::new("shop1", "unstable", "token1").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/unstable/products.json"))
        .and(header("X-Shopify-Access-Token", "token1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": 1, "title": "Hat"}, {"id": 2, "title": "Scarf"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Route the session's context to the mock server while keeping its headers.
    ShopifyResource::activate_session(&session);
    ShopifyResource::set_site(&format!("{}/admin/api/unstable", server.uri())).unwrap();

    let mut query = HashMap::new();
    query.insert("limit".to_string(), "2".to_string());
    let products = Product::all(&ShopifyResource::context(), Some(query)).await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].title, "Scarf");

    ShopifyResource::clear_session();
}

#[tokio::test]
async fn test_save_creates_then_updates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/products.json"))
        .and(body_json(json!({"product": {"title": "Hat"}})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"product": {"id": 7, "title": "Hat"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/products/7.json"))
        .and(body_json(json!({"product": {"id": 7, "title": "Cap"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"product": {"id": 7, "title": "Cap"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    bind_site(&server);
    let context = ShopifyResource::context();

    let created = Product { id: None, title: "Hat".to_string() }.save(&context).await.unwrap();
    assert_eq!(created.id, Some(7));

    let updated = Product { title: "Cap".to_string(), ..created }.save(&context).await.unwrap();
    assert_eq!(updated.title, "Cap");

    ShopifyResource::clear_session();
}

#[tokio::test]
async fn test_request_without_active_site_fails() {
    ShopifyResource::clear_session();

    let result = Shop::current(&ShopifyResource::context()).await;

    assert!(matches!(result, Err(ResourceError::NoActiveSite)));
}

// ============================================================================
// Rate Limit Tests
// ============================================================================

#[tokio::test]
async fn test_rate_limited_request_is_retried_after_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/shop.json"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0.2")
                .set_body_json(json!({"errors": "Exceeded 2 calls per second"})),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/shop.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"shop": {"name": "Apple Computers"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    bind_site(&server);
    let started = Instant::now();
    let shop = Shop::current(&ShopifyResource::context()).await.unwrap();

    assert_eq!(shop.name.as_deref(), Some("Apple Computers"));
    assert!(started.elapsed() >= Duration::from_millis(400));

    ShopifyResource::clear_session();
}

#[tokio::test]
async fn test_non_rate_limit_error_is_surfaced_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/products/99.json"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("X-Request-Id", "req-404")
                .set_body_json(json!({"errors": "Not Found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    bind_site(&server);
    let error = Product::find(&ShopifyResource::context(), 99).await.unwrap_err();

    match error {
        ResourceError::Http(HttpError::Response(e)) => {
            assert_eq!(e.code, 404);
            assert_eq!(e.error_reference.as_deref(), Some("req-404"));
            assert_eq!(e.body, json!({"errors": "Not Found"}));
        }
        other => panic!("expected response error, got {other:?}"),
    }

    ShopifyResource::clear_session();
}
