//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the database layer.
//!
//! # Architecture
//!
//! `ProductAdapter` is generic over a `ProductStore` repository. It:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! Each backend is an alias with its own constructors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresProductAdapter;
//! use domain_product::ProductPort;
//!
//! let adapter = PostgresProductAdapter::new(pool);
//! let product = adapter.get(product_id).await?;
//! ```

pub mod product;
pub mod sqlite_product;

pub use product::{PostgresProductAdapter, ProductAdapter};
pub use sqlite_product::SqliteProductAdapter;
