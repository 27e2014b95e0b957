//! Product application service
//!
//! The `ProductService` is the business-rule gatekeeper between callers and
//! persistence. It validates and mutates products in memory, then hands the
//! result to the `ProductPort`. Errors from the entity or the port are
//! returned as they are; nothing is retried.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use core_kernel::{HealthCheckResult, PortError, ProductId};

use crate::error::ProductError;
use crate::ports::ProductPort;
use crate::product::{Product, ProductEntity};

/// Service orchestrating product create/get/enable/disable
///
/// Every successful create, enable or disable performs exactly one
/// `save` on the port; `get` never writes.
#[derive(Clone)]
pub struct ProductService {
    port: Arc<dyn ProductPort>,
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

impl ProductService {
    /// Creates a service backed by the given persistence port
    pub fn new(port: Arc<dyn ProductPort>) -> Self {
        Self { port }
    }

    /// Retrieves a product by its ID
    ///
    /// # Arguments
    ///
    /// * `id` - Product id, with or without the `PRD-` prefix
    ///
    /// # Errors
    ///
    /// Returns the port's `NotFound` error when no product matches. A string
    /// that is not a valid id cannot match any product and is reported the
    /// same way.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Product, ProductError> {
        let product_id: ProductId = id
            .parse()
            .map_err(|_| PortError::not_found("Product", id))?;

        Ok(self.port.get(product_id).await?)
    }

    /// Creates and persists a new disabled product
    ///
    /// # Arguments
    ///
    /// * `name` - Display name, must not be blank
    /// * `price` - Price, must not be negative
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Validation` before touching storage if the
    /// data is invalid, or the port error if the save fails
    #[instrument(skip(self), fields(product_id))]
    pub async fn create(&self, name: &str, price: Decimal) -> Result<Product, ProductError> {
        let product = Product::new(name, price).inspect_err(|e| {
            warn!(error = %e, "Rejected product creation");
        })?;
        tracing::Span::current().record("product_id", tracing::field::display(product.id()));

        let saved = self.port.save(&product).await?;
        info!("Product created");
        Ok(saved)
    }

    /// Enables a product and persists the change
    ///
    /// # Errors
    ///
    /// Returns the entity's validation error if the price is not positive;
    /// nothing is saved in that case.
    #[instrument(skip(self, product), fields(product_id = %product.id()))]
    pub async fn enable<P: ProductEntity>(&self, product: &mut P) -> Result<Product, ProductError> {
        product.enable()?;
        debug!("Product enabled in memory");

        let saved = self.port.save(&*product).await?;
        info!("Product enabled");
        Ok(saved)
    }

    /// Disables a product and persists the change
    #[instrument(skip(self, product), fields(product_id = %product.id()))]
    pub async fn disable<P: ProductEntity>(&self, product: &mut P) -> Result<Product, ProductError> {
        product.disable();
        debug!("Product disabled in memory");

        let saved = self.port.save(&*product).await?;
        info!("Product disabled");
        Ok(saved)
    }

    /// Loads a product by ID, then enables it
    pub async fn enable_by_id(&self, id: &str) -> Result<Product, ProductError> {
        let mut product = self.get(id).await?;
        self.enable(&mut product).await
    }

    /// Loads a product by ID, then disables it
    pub async fn disable_by_id(&self, id: &str) -> Result<Product, ProductError> {
        let mut product = self.get(id).await?;
        self.disable(&mut product).await
    }

    /// Reports the health of the underlying port
    pub async fn health_check(&self) -> HealthCheckResult {
        self.port.health_check().await
    }
}
