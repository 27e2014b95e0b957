//! Infrastructure Database Layer
//!
//! This crate provides the persistence layer for the product catalog,
//! storing products in PostgreSQL (or SQLite) using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern, providing data access abstractions
//! that hide the database implementation details from the domain layer.
//! Repositories work on plain rows; adapters implement `ProductPort` on top of
//! them and translate database errors into port errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool_from_url, run_migrations, PostgresProductAdapter};
//!
//! let pool = create_pool_from_url("postgres://localhost/products").await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresProductAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{
    create_pool, create_pool_from_url, create_sqlite_pool, run_migrations, DatabaseConfig,
    DatabasePool,
};
pub use error::DatabaseError;
pub use repositories::{
    ProductRepository, ProductRow, ProductStore, SqliteProductRepository, UpsertOutcome,
};
pub use adapters::{PostgresProductAdapter, ProductAdapter, SqliteProductAdapter};
