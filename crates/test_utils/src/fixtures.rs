//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for products and the ports that store them.
//! These fixtures are designed to be consistent and predictable for unit tests.

use core_kernel::ProductId;
use domain_product::{InMemoryProductPort, Product, ProductStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for price test data
pub struct PriceFixtures;

impl PriceFixtures {
    /// A standard price that allows enabling
    pub fn standard() -> Decimal {
        dec!(10)
    }

    /// A price with four decimal places
    pub fn precise() -> Decimal {
        dec!(19.9900)
    }

    /// Zero price; products at this price cannot be enabled
    pub fn zero() -> Decimal {
        Decimal::ZERO
    }

    /// A negative price that fails validation
    pub fn negative() -> Decimal {
        dec!(-1)
    }
}

/// Fixture for product identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// A fixed identifier for tests that need a stable value
    pub fn product_id() -> ProductId {
        "PRD-0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b"
            .parse()
            .expect("fixture id is a valid UUID")
    }

    /// A fresh identifier that no store knows about
    pub fn unknown_product_id() -> ProductId {
        ProductId::new()
    }
}

/// Fixture for product test data
pub struct ProductFixtures;

impl ProductFixtures {
    /// A disabled product with a positive price
    pub fn disabled() -> Product {
        Product::from_parts(
            ProductId::new(),
            "Product 1",
            PriceFixtures::standard(),
            ProductStatus::Disabled,
        )
    }

    /// An enabled product with a positive price
    pub fn enabled() -> Product {
        Product::from_parts(
            ProductId::new(),
            "Product 1",
            PriceFixtures::standard(),
            ProductStatus::Enabled,
        )
    }

    /// A disabled product priced at zero
    pub fn free() -> Product {
        Product::from_parts(
            ProductId::new(),
            "Free Sample",
            PriceFixtures::zero(),
            ProductStatus::Disabled,
        )
    }

    /// The product with the fixed identifier from `IdFixtures::product_id`
    pub fn with_fixed_id() -> Product {
        Product::from_parts(
            IdFixtures::product_id(),
            "Product 1",
            PriceFixtures::standard(),
            ProductStatus::Disabled,
        )
    }

    /// A small mixed catalog
    pub fn catalog() -> Vec<Product> {
        vec![Self::disabled(), Self::enabled(), Self::free()]
    }
}

/// Fixture for product ports
pub struct PortFixtures;

impl PortFixtures {
    /// An in-memory port seeded with the given products
    pub async fn seeded(products: Vec<Product>) -> InMemoryProductPort {
        InMemoryProductPort::with_products(products).await
    }

    /// An in-memory port seeded with `ProductFixtures::catalog`
    pub async fn catalog() -> (InMemoryProductPort, Vec<Product>) {
        let products = ProductFixtures::catalog();
        let port = InMemoryProductPort::with_products(products.clone()).await;
        (port, products)
    }
}
