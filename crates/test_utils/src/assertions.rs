//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{HealthCheckResult, PortError};
use domain_product::{ProductEntity, ProductError, ProductStatus};

/// Asserts that two products carry the same id, name, price and status
///
/// # Panics
///
/// Panics naming the first field that differs
pub fn assert_product_eq(actual: &dyn ProductEntity, expected: &dyn ProductEntity) {
    assert_eq!(actual.id(), expected.id(), "Product id mismatch");
    assert_eq!(
        actual.name(),
        expected.name(),
        "Product name mismatch for {}",
        actual.id()
    );
    assert_eq!(
        actual.price(),
        expected.price(),
        "Product price mismatch for {}",
        actual.id()
    );
    assert_eq!(
        actual.status(),
        expected.status(),
        "Product status mismatch for {}",
        actual.id()
    );
}

/// Asserts that a product is enabled
pub fn assert_enabled(product: &dyn ProductEntity) {
    assert_eq!(
        product.status(),
        ProductStatus::Enabled,
        "Expected product {} to be enabled (price {})",
        product.id(),
        product.price()
    );
}

/// Asserts that a product is disabled
pub fn assert_disabled(product: &dyn ProductEntity) {
    assert_eq!(
        product.status(),
        ProductStatus::Disabled,
        "Expected product {} to be disabled",
        product.id()
    );
}

/// Asserts that a result failed with a validation error mentioning `fragment`
pub fn assert_validation_error<T: std::fmt::Debug>(result: &Result<T, ProductError>, fragment: &str) {
    match result {
        Err(ProductError::Validation(message)) => assert!(
            message.contains(fragment),
            "Validation message '{}' does not contain '{}'",
            message,
            fragment
        ),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

/// Asserts that a result failed because the product does not exist
pub fn assert_not_found<T: std::fmt::Debug>(result: &Result<T, ProductError>) {
    assert!(
        matches!(result, Err(e) if e.is_not_found()),
        "Expected not found error, got {:?}",
        result
    );
}

/// Asserts that a result failed with a storage connection error
pub fn assert_connection_error<T: std::fmt::Debug>(result: &Result<T, ProductError>) {
    assert!(
        matches!(
            result,
            Err(ProductError::Port(PortError::Connection { .. }))
        ),
        "Expected connection error, got {:?}",
        result
    );
}

/// Asserts that a health check reports the adapter as operational
pub fn assert_healthy(result: &HealthCheckResult) {
    assert!(
        result.is_operational(),
        "Expected {} to be healthy, got {:?} ({:?})",
        result.adapter_id,
        result.status,
        result.message
    );
}
