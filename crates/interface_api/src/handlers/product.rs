//! Product handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use domain_product::ProductEntity;
use tracing::info;
use validator::Validate;

use crate::{AppState, error::ApiError};
use crate::dto::product::*;

/// Creates a new disabled product
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let product = state.service.create(&request.name, request.price).await?;
    info!(product_id = %product.id(), "Product created via API");

    Ok((StatusCode::CREATED, Json(ProductResponse::from_entity(&product))))
}

/// Gets a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.service.get(&id).await?;
    Ok(Json(ProductResponse::from_entity(&product)))
}

/// Enables a product; its price must be greater than zero
pub async fn enable_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.service.enable_by_id(&id).await?;
    Ok(Json(ProductResponse::from_entity(&product)))
}

/// Disables a product
pub async fn disable_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.service.disable_by_id(&id).await?;
    Ok(Json(ProductResponse::from_entity(&product)))
}
