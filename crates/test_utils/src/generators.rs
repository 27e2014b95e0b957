//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::ProductId;
use domain_product::{Product, ProductStatus};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating strictly positive prices with up to ten decimals
pub fn positive_price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000_000i64, 0u32..=10u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for generating negative prices
pub fn negative_price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000_000i64, 0u32..=10u32).prop_map(|(m, s)| Decimal::new(-m, s))
}

/// Strategy for generating prices that cannot enable a product
pub fn non_positive_price_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        9 => negative_price_strategy(),
    ]
}

/// Strategy for generating any valid price, zero included
pub fn price_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        9 => positive_price_strategy(),
    ]
}

/// Strategy for generating non-blank product names
pub fn product_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,39}"
}

/// Strategy for generating names made only of whitespace
pub fn blank_name_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,8}"
}

/// Strategy for generating product statuses
pub fn status_strategy() -> impl Strategy<Value = ProductStatus> {
    prop_oneof![Just(ProductStatus::Enabled), Just(ProductStatus::Disabled)]
}

/// Strategy for generating valid disabled products
pub fn product_strategy() -> impl Strategy<Value = Product> {
    (product_name_strategy(), price_strategy()).prop_map(|(name, price)| {
        Product::from_parts(ProductId::new(), name, price, ProductStatus::Disabled)
    })
}

/// Strategy for generating valid products in either status
///
/// Enabled products always carry a positive price.
pub fn any_product_strategy() -> impl Strategy<Value = Product> {
    (product_name_strategy(), positive_price_strategy(), status_strategy()).prop_map(
        |(name, price, status)| Product::from_parts(ProductId::new(), name, price, status),
    )
}
