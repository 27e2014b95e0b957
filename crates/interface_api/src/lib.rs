//! HTTP API Layer
//!
//! This crate provides the REST API for the product catalog using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for products and health checks
//! - **Middleware**: Request id propagation and request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Handlers only talk to `ProductService`; the storage backend is chosen by
//! the binary and injected through the service's port.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use domain_product::ProductService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::request_log_middleware;
use crate::handlers::{health, product};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ProductService,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Product service wired to a storage adapter
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(service: ProductService) -> Router {
    let state = AppState { service };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Product routes
    let product_routes = Router::new()
        .route("/", post(product::create_product))
        .route("/:id", get(product::get_product))
        .route("/:id/enable", post(product::enable_product))
        .route("/:id/disable", post(product::disable_product));

    let api_routes = Router::new()
        .nest("/products", product_routes)
        .layer(axum_middleware::from_fn(request_log_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
