//! Product DTOs

use domain_product::ProductEntity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductResponse {
    /// Prefixed identifier (`PRD-<uuid>`)
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub status: String,
}

impl ProductResponse {
    pub fn from_entity(product: &dyn ProductEntity) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            price: product.price(),
            status: product.status().as_str().to_string(),
        }
    }
}
