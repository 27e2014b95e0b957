//! Product Adapter
//!
//! This module provides the internal (database) adapter for the product
//! domain, implementing the `ProductPort` trait on top of any repository
//! that implements `ProductStore`.
//!
//! # Overview
//!
//! The `ProductAdapter` serves as the bridge between the domain layer's
//! port interface and the database layer. It:
//!
//! - Translates domain products into repository rows and back
//! - Returns the row the database stored, not the caller's copy
//! - Handles error translation between database and port errors
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresProductAdapter;
//! use domain_product::{ProductPort, ProductService};
//! use std::sync::Arc;
//!
//! let adapter = PostgresProductAdapter::new(pool);
//! let service = ProductService::new(Arc::new(adapter));
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckable, HealthCheckResult, PortError, ProductId};
use domain_product::{Product, ProductEntity, ProductPort, ProductStatus};

use crate::error::DatabaseError;
use crate::repositories::product::{ProductRepository, ProductRow};
use crate::repositories::ProductStore;

/// Repository-backed implementation of the ProductPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - connection and pool failures -> `PortError::Connection`
/// - constraint violations -> `PortError::Conflict`
/// - other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct ProductAdapter<S> {
    repository: S,
}

/// Product adapter backed by PostgreSQL
pub type PostgresProductAdapter = ProductAdapter<ProductRepository>;

impl<S: ProductStore> ProductAdapter<S> {
    /// Wraps an existing repository
    pub fn with_repository(repository: S) -> Self {
        Self { repository }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &S {
        &self.repository
    }
}

impl ProductAdapter<ProductRepository> {
    /// Creates a new PostgreSQL product adapter
    pub fn new(pool: PgPool) -> Self {
        Self::with_repository(ProductRepository::new(pool))
    }
}

impl<S: ProductStore> DomainPort for ProductAdapter<S> {}

#[async_trait]
impl<S: ProductStore> HealthCheckable for ProductAdapter<S> {
    /// Checks database connectivity with `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult::healthy(S::ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(
                S::ADAPTER_ID,
                latency_ms,
                format!("Database error: {}", e),
            ),
        }
    }
}

#[async_trait]
impl<S: ProductStore> ProductPort for ProductAdapter<S> {
    #[instrument(skip(self), fields(adapter = S::ADAPTER_ID, product_id = %id))]
    async fn get(&self, id: ProductId) -> Result<Product, PortError> {
        debug!("Fetching product by ID");

        let row = self
            .repository
            .fetch(id.into())
            .await
            .map_err(|e| db_to_port_error(e, id))?;

        row_to_product(row)
    }

    #[instrument(skip(self, product), fields(adapter = S::ADAPTER_ID, product_id = %product.id()))]
    async fn save(&self, product: &dyn ProductEntity) -> Result<Product, PortError> {
        let (stored, outcome) = self
            .repository
            .store(&entity_to_row(product))
            .await
            .map_err(|e| db_to_port_error(e, product.id()))?;

        debug!(?outcome, "Product saved");
        row_to_product(stored)
    }
}

/// Converts a database error into a port error for the given product
fn db_to_port_error(e: DatabaseError, id: ProductId) -> PortError {
    match e {
        DatabaseError::NotFound(_) => PortError::not_found("Product", id),
        DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted => {
            PortError::connection(e.to_string()).with_source(e)
        }
        DatabaseError::DuplicateEntry(_) | DatabaseError::ConstraintViolation(_) => {
            PortError::conflict(e.to_string())
        }
        _ => PortError::internal(e.to_string()).with_source(e),
    }
}

/// Reads a product's state through its accessors into a row
fn entity_to_row(product: &dyn ProductEntity) -> ProductRow {
    ProductRow {
        id: product.id().into(),
        name: product.name().to_string(),
        price: product.price(),
        status: product.status().as_str().to_string(),
    }
}

/// Converts a database row to a domain Product
fn row_to_product(row: ProductRow) -> Result<Product, PortError> {
    let status: ProductStatus = row.status.parse().map_err(|_| {
        PortError::internal(format!(
            "Stored product {} has unknown status '{}'",
            row.id, row.status
        ))
    })?;

    Ok(Product::from_parts(
        ProductId::from(row.id),
        row.name,
        row.price,
        status,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::UpsertOutcome;
    use core_kernel::AdapterHealth;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    /// Store that keeps two decimal places and has no reachable database
    struct CentsStore;

    #[async_trait]
    impl ProductStore for CentsStore {
        const ADAPTER_ID: &'static str = "cents-store";

        async fn fetch(&self, id: Uuid) -> Result<ProductRow, DatabaseError> {
            Err(DatabaseError::not_found("Product", id))
        }

        async fn store(
            &self,
            row: &ProductRow,
        ) -> Result<(ProductRow, UpsertOutcome), DatabaseError> {
            let stored = ProductRow {
                price: row.price.round_dp(2),
                ..row.clone()
            };
            Ok((stored, UpsertOutcome::Inserted))
        }

        async fn ping(&self) -> Result<(), DatabaseError> {
            Err(DatabaseError::ConnectionFailed("refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_save_returns_stored_row() {
        let adapter = ProductAdapter::with_repository(CentsStore);
        let product = Product::new("Product 1", dec!(10.12345)).unwrap();

        let saved = adapter.save(&product).await.unwrap();

        assert_eq!(saved.price(), dec!(10.12));
        assert_eq!(saved.id(), product.id());
    }

    #[tokio::test]
    async fn test_get_and_health_go_through_store() {
        let adapter = ProductAdapter::with_repository(CentsStore);

        assert!(adapter.get(ProductId::new()).await.unwrap_err().is_not_found());

        let health = adapter.health_check().await;
        assert_eq!(health.status, AdapterHealth::Unhealthy);
        assert_eq!(health.adapter_id, "cents-store");
        assert!(health.message.unwrap().contains("refused"));
    }

    #[test]
    fn test_row_conversion_roundtrip() {
        let product = Product::new("Product 1", dec!(10)).unwrap();
        let restored = row_to_product(entity_to_row(&product)).unwrap();
        assert_eq!(restored, product);
    }

    #[test]
    fn test_unknown_status_is_internal_error() {
        let row = ProductRow {
            id: Uuid::now_v7(),
            name: "Product 1".to_string(),
            price: dec!(1),
            status: "archived".to_string(),
        };
        let err = row_to_product(row).unwrap_err();
        assert!(matches!(err, PortError::Internal { .. }));
    }

    #[test]
    fn test_error_translation() {
        let id = ProductId::new();

        assert!(db_to_port_error(DatabaseError::not_found("Product", id), id).is_not_found());
        assert!(db_to_port_error(DatabaseError::PoolExhausted, id).is_transient());
        assert!(matches!(
            db_to_port_error(DatabaseError::DuplicateEntry("dup".into()), id),
            PortError::Conflict { .. }
        ));
        assert!(matches!(
            db_to_port_error(DatabaseError::QueryFailed("syntax".into()), id),
            PortError::Internal { .. }
        ));
    }
}
