//! Repository implementations for domain entities
//!
//! This module provides concrete repositories that handle database access
//! for the products table. Repositories encapsulate SQL queries and work
//! with row types; mapping to domain types happens in the adapters.
//!
//! # Architecture
//!
//! - Runtime-checked queries (`sqlx::query`/`query_as`) bound by position
//! - Upserts run inside a transaction and return the stored row
//! - One repository per storage engine, sharing the `ProductRow` shape and
//!   the `ProductStore` trait the adapters are generic over

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DatabaseError;

pub mod product;
pub mod sqlite_product;

/// Row-level storage operations a product adapter needs
#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    /// Identifier reported by the adapter's health check
    const ADAPTER_ID: &'static str;

    /// Loads the row for `id`, or `DatabaseError::NotFound`
    async fn fetch(&self, id: Uuid) -> Result<ProductRow, DatabaseError>;

    /// Upserts the row and returns it as stored
    async fn store(&self, row: &ProductRow) -> Result<(ProductRow, UpsertOutcome), DatabaseError>;

    /// Runs a trivial query to prove the database answers
    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub use product::{ProductRepository, ProductRow, UpsertOutcome};
pub use sqlite_product::SqliteProductRepository;
