//! HTTP API tests
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot` against
//! in-memory ports.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use domain_product::{
    FailingProductPort, InMemoryProductPort, ProductEntity, ProductPort, ProductService,
    ProductStatus,
};
use interface_api::create_router;
use interface_api::dto::product::ProductResponse;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use test_utils::{PortFixtures, ProductFixtures};
use tower::ServiceExt;

fn router_with(port: Arc<dyn ProductPort>) -> Router {
    create_router(ProductService::new(port))
}

fn empty_router() -> (Router, Arc<InMemoryProductPort>) {
    let port = Arc::new(InMemoryProductPort::new());
    (router_with(port.clone()), port)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let (app, _) = empty_router();
        let (status, body) = send(app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_with_healthy_port() {
        let (app, _) = empty_router();
        let (status, body) = send(app, Method::GET, "/health/ready", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["storage"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_with_failing_port() {
        let app = router_with(Arc::new(FailingProductPort::new("db down")));
        let (status, body) = send(app, Method::GET, "/health/ready", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["storage"]["message"], "db down");
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let (app, _) = empty_router();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn test_create_returns_201_and_disabled_product() {
        let (app, port) = empty_router();
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "Product 1", "price": "10"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let product: ProductResponse = serde_json::from_value(body).unwrap();
        assert_eq!(product.name, "Product 1");
        assert_eq!(product.price, dec!(10));
        assert_eq!(product.status, "disabled");
        assert!(product.id.starts_with("PRD-"));
        assert_eq!(port.save_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (app, _) = empty_router();
        let (_, created) = send(
            app.clone(),
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "Product 1", "price": 10})),
        )
        .await;

        let uri = format!("/api/v1/products/{}", created["id"].as_str().unwrap());
        let (status, fetched) = send(app, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_fractional_price_roundtrips() {
        let (app, _) = empty_router();
        let (status, created) = send(
            app.clone(),
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "Product 1", "price": "10.12345"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let uri = format!("/api/v1/products/{}", created["id"].as_str().unwrap());
        let (_, fetched) = send(app, Method::GET, &uri, None).await;

        let product: ProductResponse = serde_json::from_value(fetched).unwrap();
        assert_eq!(product.price, dec!(10.12345));
    }

    #[tokio::test]
    async fn test_create_with_empty_name_is_422() {
        let (app, port) = empty_router();
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "", "price": "10"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(port.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_create_with_negative_price_is_422() {
        let (app, port) = empty_router();
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "Product 1", "price": "-1"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(port.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let (app, _) = empty_router();
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/products",
            Some(json!({"title": "Product 1"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let app = router_with(Arc::new(FailingProductPort::new("db down")));
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "Product 1", "price": "10"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "storage_error");
    }
}

mod lookup {
    use super::*;

    #[tokio::test]
    async fn test_unknown_id_is_404() {
        let (app, _) = empty_router();
        let (status, body) = send(app, Method::GET, "/api/v1/products/nonexistent", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_get_seeded_product_by_bare_uuid() {
        let product = ProductFixtures::enabled();
        let port = Arc::new(PortFixtures::seeded(vec![product.clone()]).await);
        let app = router_with(port);

        let uri = format!("/api/v1/products/{}", product.id().as_uuid());
        let (status, body) = send(app, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "enabled");
        assert_eq!(body["id"], product.id().to_string());
    }
}

mod transitions {
    use super::*;

    #[tokio::test]
    async fn test_enable_then_disable() {
        let product = ProductFixtures::disabled();
        let port = Arc::new(PortFixtures::seeded(vec![product.clone()]).await);
        let app = router_with(port.clone());
        let base = format!("/api/v1/products/{}", product.id());

        let (status, body) = send(app.clone(), Method::POST, &format!("{}/enable", base), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "enabled");

        let (status, body) = send(app, Method::POST, &format!("{}/disable", base), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "disabled");

        assert_eq!(port.save_calls(), 2);
        let stored = port.get(product.id()).await.unwrap();
        assert_eq!(stored.status(), ProductStatus::Disabled);
    }

    #[tokio::test]
    async fn test_enable_zero_price_is_422_without_save() {
        let product = ProductFixtures::free();
        let port = Arc::new(PortFixtures::seeded(vec![product.clone()]).await);
        let app = router_with(port.clone());

        let uri = format!("/api/v1/products/{}/enable", product.id());
        let (status, body) = send(app, Method::POST, &uri, None).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"].as_str().unwrap().contains("greater than zero"));
        assert_eq!(port.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_disable_unknown_is_404() {
        let (app, _) = empty_router();
        let uri = format!("/api/v1/products/{}/disable", ProductFixtures::disabled().id());
        let (status, _) = send(app, Method::POST, &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
