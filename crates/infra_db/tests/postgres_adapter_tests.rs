//! PostgreSQL adapter integration tests
//!
//! These run against a throwaway PostgreSQL container and are ignored unless
//! Docker is available: `cargo test -p infra_db -- --ignored`.

use std::sync::Arc;

use core_kernel::{HealthCheckable, ProductId};
use domain_product::{ProductEntity, ProductPort, ProductService, ProductStatus};
use infra_db::{PostgresProductAdapter, ProductRepository, UpsertOutcome};
use rust_decimal_macros::dec;
use test_utils::{
    assert_disabled, assert_enabled, assert_healthy, assert_not_found, assert_product_eq,
    db_test, ProductBuilder, ProductFixtures,
};

db_test!(test_save_and_get_roundtrip, |pool| {
    let adapter = PostgresProductAdapter::new(pool);
    let product = ProductBuilder::new().with_price(dec!(19.99)).build();

    adapter.save(&product).await.unwrap();
    let loaded = adapter.get(product.id()).await.unwrap();

    assert_product_eq(&loaded, &product);
});

db_test!(test_second_save_updates_in_place, |pool| {
    let repository = ProductRepository::new(pool.clone());
    let adapter = PostgresProductAdapter::new(pool.clone());
    let mut product = ProductFixtures::disabled();

    adapter.save(&product).await.unwrap();
    product.enable().unwrap();
    adapter.save(&product).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert!(repository.exists(product.id().into()).await.unwrap());
    assert_enabled(&adapter.get(product.id()).await.unwrap());
});

db_test!(test_upsert_reports_outcome, |pool| {
    let repository = ProductRepository::new(pool);
    let row = infra_db::ProductRow {
        id: ProductId::new().into(),
        name: "Product 1".to_string(),
        price: dec!(10),
        status: "disabled".to_string(),
    };

    let (stored, outcome) = repository.upsert(&row).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Inserted);
    assert_eq!(stored, row);

    let (_, outcome) = repository.upsert(&row).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Updated);
});

db_test!(test_fractional_and_large_prices_stored_exactly, |pool| {
    let adapter = PostgresProductAdapter::new(pool);

    for price in [dec!(10.12345), dec!(123456789012345678.123456789)] {
        let product = ProductBuilder::new().with_price(price).build();

        let saved = adapter.save(&product).await.unwrap();
        let loaded = adapter.get(product.id()).await.unwrap();

        assert_eq!(saved.price(), price);
        assert_eq!(loaded, saved);
    }
});

db_test!(test_concurrent_first_saves_both_succeed, |pool| {
    let adapter = PostgresProductAdapter::new(pool.clone());
    let first = ProductBuilder::new().with_price(dec!(1)).build();
    let second = ProductBuilder::new()
        .with_id(first.id())
        .with_price(dec!(2))
        .build();

    let (a, b) = tokio::join!(adapter.save(&first), adapter.save(&second));
    a.unwrap();
    b.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
    let stored = adapter.get(first.id()).await.unwrap();
    assert!(stored == first || stored == second);
});

db_test!(test_negative_price_rejected_by_schema, |pool| {
    let adapter = PostgresProductAdapter::new(pool);
    let product = ProductBuilder::new().with_price(dec!(-1)).build();

    let err = adapter.save(&product).await.unwrap_err();
    assert!(matches!(err, core_kernel::PortError::Conflict { .. }));
});

db_test!(test_service_lifecycle, |pool| {
    let adapter = Arc::new(PostgresProductAdapter::new(pool));
    assert_healthy(&adapter.health_check().await);

    let service = ProductService::new(adapter);
    let created = service.create("Product 1", dec!(10)).await.unwrap();
    let id = created.id().to_string();

    let enabled = service.enable_by_id(&id).await.unwrap();
    assert_eq!(enabled.status(), ProductStatus::Enabled);

    let disabled = service.disable_by_id(&id).await.unwrap();
    assert_disabled(&disabled);

    assert_not_found(&service.get(&ProductId::new().to_string()).await);
});
