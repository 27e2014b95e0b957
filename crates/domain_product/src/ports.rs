//! Product Domain Ports
//!
//! This module defines the persistence port the product service depends on,
//! enabling swappable storage (PostgreSQL, SQLite, in-memory).
//!
//! # Architecture
//!
//! The `ProductPort` trait is the whole contract between the domain and
//! storage:
//!
//! - **get**: point lookup by id, `PortError::NotFound` when absent
//! - **save**: upsert by id; inserts when absent, otherwise updates
//!   name, price and status
//!
//! Saving the same product state twice leaves storage unchanged after the
//! first call.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_product::{ProductPort, ProductService};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn ProductPort> = Arc::new(PostgresProductAdapter::new(pool));
//! let service = ProductService::new(port);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, ProductId};

use crate::product::{Product, ProductEntity};

/// The persistence port for products
///
/// All methods are async and return `Result<T, PortError>` so that every
/// adapter reports failures the same way.
#[async_trait]
pub trait ProductPort: DomainPort + HealthCheckable {
    /// Retrieves a product by ID
    ///
    /// # Returns
    ///
    /// The stored product, or `PortError::NotFound`
    async fn get(&self, id: ProductId) -> Result<Product, PortError>;

    /// Inserts or updates a product keyed by its ID
    ///
    /// # Arguments
    ///
    /// * `product` - Any product representation; its state is read through
    ///   the `ProductEntity` accessors
    ///
    /// # Returns
    ///
    /// The state that was persisted
    async fn save(&self, product: &dyn ProductEntity) -> Result<Product, PortError>;
}

/// Extension trait for ProductPort with convenience methods
#[async_trait]
pub trait ProductPortExt: ProductPort {
    /// Gets a product, mapping NotFound to `None`
    async fn find(&self, id: ProductId) -> Result<Option<Product>, PortError> {
        match self.get(id).await {
            Ok(product) => Ok(Some(product)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Checks if a product exists
    async fn exists(&self, id: ProductId) -> Result<bool, PortError> {
        Ok(self.find(id).await?.is_some())
    }
}

// Blanket implementation for all ProductPort implementors
impl<T: ProductPort + ?Sized> ProductPortExt for T {}

/// Test doubles for ProductPort
///
/// These adapters keep everything in memory and count calls so tests can
/// assert on how the service used its port.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    /// In-memory upsert store recording every saved state
    #[derive(Debug, Default)]
    pub struct InMemoryProductPort {
        products: RwLock<HashMap<ProductId, Product>>,
        history: RwLock<Vec<Product>>,
        get_calls: AtomicUsize,
        save_calls: AtomicUsize,
    }

    impl InMemoryProductPort {
        /// Creates an empty port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with products; seeding is not counted as saves
        pub async fn with_products(products: Vec<Product>) -> Self {
            let port = Self::new();
            {
                let mut stored = port.products.write().await;
                for product in products {
                    stored.insert(product.id(), product);
                }
            }
            port
        }

        /// Number of `get` calls received
        pub fn get_calls(&self) -> usize {
            self.get_calls.load(Ordering::SeqCst)
        }

        /// Number of `save` calls received
        pub fn save_calls(&self) -> usize {
            self.save_calls.load(Ordering::SeqCst)
        }

        /// Every state passed to `save`, oldest first
        pub async fn history(&self) -> Vec<Product> {
            self.history.read().await.clone()
        }

        /// Number of stored products
        pub async fn len(&self) -> usize {
            self.products.read().await.len()
        }

        /// Returns true if nothing is stored
        pub async fn is_empty(&self) -> bool {
            self.products.read().await.is_empty()
        }
    }

    impl DomainPort for InMemoryProductPort {}

    #[async_trait]
    impl HealthCheckable for InMemoryProductPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("in-memory-product-port", 0)
        }
    }

    #[async_trait]
    impl ProductPort for InMemoryProductPort {
        async fn get(&self, id: ProductId) -> Result<Product, PortError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.products
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Product", id))
        }

        async fn save(&self, product: &dyn ProductEntity) -> Result<Product, PortError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            let snapshot = product.snapshot();
            self.products.write().await.insert(snapshot.id(), snapshot.clone());
            self.history.write().await.push(snapshot.clone());
            Ok(snapshot)
        }
    }

    /// Port whose every call fails with a connection error
    #[derive(Debug)]
    pub struct FailingProductPort {
        message: String,
        get_calls: AtomicUsize,
        save_calls: AtomicUsize,
    }

    impl FailingProductPort {
        /// Creates a port failing with `PortError::Connection { message }`
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
                get_calls: AtomicUsize::new(0),
                save_calls: AtomicUsize::new(0),
            }
        }

        /// Number of `get` calls received
        pub fn get_calls(&self) -> usize {
            self.get_calls.load(Ordering::SeqCst)
        }

        /// Number of `save` calls received
        pub fn save_calls(&self) -> usize {
            self.save_calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for FailingProductPort {}

    #[async_trait]
    impl HealthCheckable for FailingProductPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::unhealthy("failing-product-port", 0, self.message.clone())
        }
    }

    #[async_trait]
    impl ProductPort for FailingProductPort {
        async fn get(&self, _id: ProductId) -> Result<Product, PortError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            Err(PortError::connection(self.message.clone()))
        }

        async fn save(&self, _product: &dyn ProductEntity) -> Result<Product, PortError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            Err(PortError::connection(self.message.clone()))
        }
    }
}
