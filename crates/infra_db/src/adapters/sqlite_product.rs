//! SQLite Product Adapter
//!
//! Implements `ProductPort` on top of `SqliteProductRepository`. Used for
//! single-file deployments and for exercising the full service stack against
//! an in-memory database in tests.

use crate::adapters::product::ProductAdapter;
use crate::error::DatabaseError;
use crate::pool::{create_sqlite_pool, DatabaseConfig};
use crate::repositories::sqlite_product::SqliteProductRepository;
use sqlx::SqlitePool;

/// Product adapter backed by SQLite
pub type SqliteProductAdapter = ProductAdapter<SqliteProductRepository>;

impl ProductAdapter<SqliteProductRepository> {
    /// Creates a new SQLite product adapter over an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_repository(SqliteProductRepository::new(pool))
    }

    /// Opens the database behind `config`, creating the products table if needed
    pub async fn connect(config: DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = create_sqlite_pool(config).await?;
        let adapter = Self::new(pool);
        adapter.repository().ensure_schema().await?;
        Ok(adapter)
    }
}
