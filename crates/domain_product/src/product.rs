//! Product entity
//!
//! A product carries its identity plus the two fields the business cares
//! about: the price and whether the product is sellable (its status).
//! The only rules living on the entity are the enable/disable transitions.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ProductId;
use crate::error::ProductError;

/// Lifecycle flag controlling whether a product can be sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// The product is sellable
    Enabled,
    /// The product is not sellable (initial state)
    Disabled,
}

impl ProductStatus {
    /// Returns the storage/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Enabled => "enabled",
            ProductStatus::Disabled => "disabled",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(ProductStatus::Enabled),
            "disabled" => Ok(ProductStatus::Disabled),
            other => Err(ProductError::validation(format!(
                "unknown product status '{}'",
                other
            ))),
        }
    }
}

/// Capability set every product representation exposes
///
/// The service and the persistence adapters only talk to products through
/// this trait, so test doubles can stand in for [`Product`].
pub trait ProductEntity: Send + Sync {
    /// Identity of the product
    fn id(&self) -> ProductId;

    /// Display name
    fn name(&self) -> &str;

    /// Current price
    fn price(&self) -> Decimal;

    /// Current status
    fn status(&self) -> ProductStatus;

    /// Marks the product as enabled
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Validation` if the price is not strictly
    /// positive. The status is left unchanged in that case.
    fn enable(&mut self) -> Result<(), ProductError>;

    /// Marks the product as disabled. Never fails.
    fn disable(&mut self);

    /// Copies the current state into a plain [`Product`] value
    fn snapshot(&self) -> Product {
        Product::from_parts(self.id(), self.name(), self.price(), self.status())
    }
}

/// A sellable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    status: ProductStatus,
}

impl Product {
    /// Creates a new disabled product with a freshly generated id
    ///
    /// # Arguments
    ///
    /// * `name` - Display name, must not be blank
    /// * `price` - Price, must not be negative
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Validation` if the name is blank or the
    /// price is negative
    pub fn new(name: impl Into<String>, price: Decimal) -> Result<Self, ProductError> {
        let product = Self {
            id: ProductId::new(),
            name: name.into(),
            price,
            status: ProductStatus::Disabled,
        };
        product.validate()?;
        Ok(product)
    }

    /// Rebuilds a product from stored fields without validating them
    pub fn from_parts(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        status: ProductStatus,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            status,
        }
    }

    /// Checks the data invariants: a non-blank name and a non-negative price
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::validation("product name must not be empty"));
        }
        if self.price < Decimal::ZERO {
            return Err(ProductError::validation(format!(
                "product price must not be negative, got {}",
                self.price
            )));
        }
        Ok(())
    }

    /// Returns true if the product is currently sellable
    pub fn is_enabled(&self) -> bool {
        self.status == ProductStatus::Enabled
    }
}

impl ProductEntity for Product {
    fn id(&self) -> ProductId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Decimal {
        self.price
    }

    fn status(&self) -> ProductStatus {
        self.status
    }

    fn enable(&mut self) -> Result<(), ProductError> {
        if self.price > Decimal::ZERO {
            self.status = ProductStatus::Enabled;
            Ok(())
        } else {
            Err(ProductError::validation(format!(
                "price must be greater than zero to enable the product, got {}",
                self.price
            )))
        }
    }

    fn disable(&mut self) {
        self.status = ProductStatus::Disabled;
    }

    fn snapshot(&self) -> Product {
        self.clone()
    }
}

/// Entity double for exercising the service without real product rules
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;

    /// Product stand-in with a canned `enable` outcome and call counters
    #[derive(Debug)]
    pub struct StubProduct {
        inner: Product,
        enable_error: Option<String>,
        enable_calls: usize,
        disable_calls: usize,
    }

    impl StubProduct {
        /// Creates a stub whose `enable` always succeeds
        pub fn new(name: &str, price: Decimal) -> Self {
            Self {
                inner: Product::from_parts(ProductId::new(), name, price, ProductStatus::Disabled),
                enable_error: None,
                enable_calls: 0,
                disable_calls: 0,
            }
        }

        /// Makes `enable` fail with the given validation message
        pub fn failing_enable(mut self, message: impl Into<String>) -> Self {
            self.enable_error = Some(message.into());
            self
        }

        /// Number of times `enable` was called
        pub fn enable_calls(&self) -> usize {
            self.enable_calls
        }

        /// Number of times `disable` was called
        pub fn disable_calls(&self) -> usize {
            self.disable_calls
        }
    }

    impl ProductEntity for StubProduct {
        fn id(&self) -> ProductId {
            self.inner.id
        }

        fn name(&self) -> &str {
            &self.inner.name
        }

        fn price(&self) -> Decimal {
            self.inner.price
        }

        fn status(&self) -> ProductStatus {
            self.inner.status
        }

        fn enable(&mut self) -> Result<(), ProductError> {
            self.enable_calls += 1;
            match &self.enable_error {
                Some(message) => Err(ProductError::validation(message.clone())),
                None => {
                    self.inner.status = ProductStatus::Enabled;
                    Ok(())
                }
            }
        }

        fn disable(&mut self) {
            self.disable_calls += 1;
            self.inner.status = ProductStatus::Disabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_product_is_disabled() {
        let product = Product::new("Product 1", dec!(10)).unwrap();

        assert_eq!(product.name(), "Product 1");
        assert_eq!(product.price(), dec!(10));
        assert_eq!(product.status(), ProductStatus::Disabled);
        assert!(!product.is_enabled());
    }

    #[test]
    fn test_new_rejects_negative_price() {
        let result = Product::new("Product 1", dec!(-0.01));
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_new_accepts_zero_price() {
        assert!(Product::new("Free sample", Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_new_rejects_blank_name() {
        assert!(Product::new("   ", dec!(10)).is_err());
    }

    #[test]
    fn test_enable_with_zero_price_fails() {
        let mut product = Product::new("Free sample", Decimal::ZERO).unwrap();

        let err = product.enable().unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
        assert_eq!(product.status(), ProductStatus::Disabled);
    }

    #[test]
    fn test_disable_enabled_product() {
        let mut product = Product::new("Product 1", dec!(10)).unwrap();
        product.enable().unwrap();
        product.disable();
        assert_eq!(product.status(), ProductStatus::Disabled);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("enabled".parse::<ProductStatus>().unwrap(), ProductStatus::Enabled);
        assert_eq!("disabled".parse::<ProductStatus>().unwrap(), ProductStatus::Disabled);
        assert!("ENABLED".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_stub_counts_calls() {
        let mut stub = mock::StubProduct::new("Stub", dec!(1)).failing_enable("nope");

        assert!(stub.enable().is_err());
        stub.disable();

        assert_eq!(stub.enable_calls(), 1);
        assert_eq!(stub.disable_calls(), 1);
        assert_eq!(stub.status(), ProductStatus::Disabled);
    }
}
