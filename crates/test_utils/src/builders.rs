//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::ProductId;
use domain_product::{Product, ProductStatus, StubProduct};
use rust_decimal::Decimal;

use crate::fixtures::PriceFixtures;

/// Builder for constructing test products
///
/// The built product is not validated, so tests can produce states that
/// `Product::new` would refuse (negative prices, blank names).
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    id: ProductId,
    name: String,
    price: Decimal,
    status: ProductStatus,
}

impl Default for ProductBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: ProductId::new(),
            name: "Product 1".to_string(),
            price: PriceFixtures::standard(),
            status: ProductStatus::Disabled,
        }
    }

    /// Sets the product ID
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = id;
        self
    }

    /// Sets the product name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Sets the status
    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    /// Shorthand for `with_status(ProductStatus::Enabled)`
    pub fn enabled(self) -> Self {
        self.with_status(ProductStatus::Enabled)
    }

    /// Builds the product
    pub fn build(self) -> Product {
        Product::from_parts(self.id, self.name, self.price, self.status)
    }

    /// Builds a stub entity with the builder's name and price
    pub fn build_stub(self) -> StubProduct {
        StubProduct::new(&self.name, self.price)
    }
}
