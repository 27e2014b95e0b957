//! Product Domain
//!
//! This crate holds the product catalogue's business rules: the `Product`
//! entity, the persistence port it is stored through, and the
//! `ProductService` orchestrating both.
//!
//! # Rules
//!
//! - A product is created disabled, with a non-blank name and a non-negative price
//! - Enabling requires a strictly positive price
//! - Disabling always succeeds
//! - Every successful create/enable/disable is persisted with exactly one save
//!
//! # Examples
//!
//! ```rust
//! use domain_product::{Product, ProductEntity, ProductStatus};
//! use rust_decimal_macros::dec;
//!
//! let mut product = Product::new("Product 1", dec!(10)).unwrap();
//! assert_eq!(product.status(), ProductStatus::Disabled);
//!
//! product.enable().unwrap();
//! assert_eq!(product.status(), ProductStatus::Enabled);
//! ```

pub mod product;
pub mod error;
pub mod ports;
pub mod services;

pub use product::{Product, ProductEntity, ProductStatus};
pub use error::ProductError;
pub use ports::{ProductPort, ProductPortExt};
pub use services::ProductService;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{FailingProductPort, InMemoryProductPort};
#[cfg(any(test, feature = "mock"))]
pub use product::mock::StubProduct;
