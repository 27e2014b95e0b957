//! Product repository implementation (SQLite)
//!
//! Same table and upsert semantics as the PostgreSQL repository, including
//! the `ON CONFLICT (id) DO NOTHING` insert that falls back to an update.
//! SQLite has no exact decimal or UUID column types, so ids are stored as
//! hyphenated text and prices as their decimal string.

use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::repositories::product::{ProductRow, UpsertOutcome};
use crate::repositories::ProductStore;

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id      TEXT PRIMARY KEY NOT NULL,
    name    TEXT NOT NULL CHECK (length(trim(name)) > 0),
    price   TEXT NOT NULL,
    status  TEXT NOT NULL CHECK (status IN ('enabled', 'disabled'))
)
"#;

/// Raw SQLite row for the products table
#[derive(Debug, Clone, sqlx::FromRow)]
struct SqliteProductRow {
    id: String,
    name: String,
    price: String,
    status: String,
}

impl TryFrom<SqliteProductRow> for ProductRow {
    type Error = DatabaseError;

    fn try_from(row: SqliteProductRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|e| {
            DatabaseError::SerializationError(format!("invalid product id '{}': {}", row.id, e))
        })?;
        let price = Decimal::from_str(&row.price).map_err(|e| {
            DatabaseError::SerializationError(format!("invalid price '{}': {}", row.price, e))
        })?;

        Ok(ProductRow {
            id,
            name: row.name,
            price,
            status: row.status,
        })
    }
}

/// Repository for managing product rows in SQLite
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the products table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_PRODUCTS_TABLE).execute(&self.pool).await?;
        info!("SQLite products table ready");
        Ok(())
    }

    /// Retrieves a product row by its identifier
    pub async fn get_by_id(&self, id: Uuid) -> Result<ProductRow, DatabaseError> {
        let row = sqlx::query_as::<_, SqliteProductRow>(
            "SELECT id, name, price, status FROM products WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Product", id))?;

        row.try_into()
    }

    /// Checks whether a row exists for the identifier
    pub async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        exists_on(&mut conn, id).await
    }

    /// Inserts a new product row
    pub async fn insert(&self, row: &ProductRow) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        insert_on(&mut conn, row).await
    }

    /// Updates name, price and status of an existing row
    pub async fn update(&self, row: &ProductRow) -> Result<u64, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        Ok(update_on(&mut conn, row).await?.map_or(0, |_| 1))
    }

    /// Inserts the row if its id is unknown, otherwise updates it
    ///
    /// Returns the row read back from the table with the outcome.
    pub async fn upsert(
        &self,
        row: &ProductRow,
    ) -> Result<(ProductRow, UpsertOutcome), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let (stored, outcome) = match insert_if_absent_on(&mut tx, row).await? {
            Some(stored) => (stored, UpsertOutcome::Inserted),
            None => {
                let stored = update_on(&mut tx, row)
                    .await?
                    .ok_or_else(|| DatabaseError::not_found("Product", row.id))?;
                (stored, UpsertOutcome::Updated)
            }
        };

        tx.commit().await?;
        debug!(product_id = %row.id, ?outcome, "Product row saved");
        Ok((stored.try_into()?, outcome))
    }
}

#[async_trait]
impl ProductStore for SqliteProductRepository {
    const ADAPTER_ID: &'static str = "sqlite-product-adapter";

    async fn fetch(&self, id: Uuid) -> Result<ProductRow, DatabaseError> {
        self.get_by_id(id).await
    }

    async fn store(&self, row: &ProductRow) -> Result<(ProductRow, UpsertOutcome), DatabaseError> {
        self.upsert(row).await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

async fn exists_on(conn: &mut SqliteConnection, id: Uuid) -> Result<bool, DatabaseError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = ?")
        .bind(id.to_string())
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

async fn insert_on(conn: &mut SqliteConnection, row: &ProductRow) -> Result<(), DatabaseError> {
    sqlx::query("INSERT INTO products (id, name, price, status) VALUES (?, ?, ?, ?)")
        .bind(row.id.to_string())
        .bind(&row.name)
        .bind(row.price.to_string())
        .bind(&row.status)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn insert_if_absent_on(
    conn: &mut SqliteConnection,
    row: &ProductRow,
) -> Result<Option<SqliteProductRow>, DatabaseError> {
    let stored = sqlx::query_as::<_, SqliteProductRow>(
        "INSERT INTO products (id, name, price, status) VALUES (?, ?, ?, ?) \
         ON CONFLICT (id) DO NOTHING \
         RETURNING id, name, price, status",
    )
    .bind(row.id.to_string())
    .bind(&row.name)
    .bind(row.price.to_string())
    .bind(&row.status)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(stored)
}

async fn update_on(
    conn: &mut SqliteConnection,
    row: &ProductRow,
) -> Result<Option<SqliteProductRow>, DatabaseError> {
    let stored = sqlx::query_as::<_, SqliteProductRow>(
        "UPDATE products SET name = ?, price = ?, status = ? WHERE id = ? \
         RETURNING id, name, price, status",
    )
    .bind(&row.name)
    .bind(row.price.to_string())
    .bind(&row.status)
    .bind(row.id.to_string())
    .fetch_optional(&mut *conn)
    .await?;
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{create_sqlite_pool, DatabaseConfig};
    use rust_decimal_macros::dec;

    async fn repository() -> SqliteProductRepository {
        let pool = create_sqlite_pool(DatabaseConfig::new("sqlite::memory:"))
            .await
            .unwrap();
        let repo = SqliteProductRepository::new(pool);
        repo.ensure_schema().await.unwrap();
        repo
    }

    fn row(price: Decimal, status: &str) -> ProductRow {
        ProductRow {
            id: Uuid::now_v7(),
            name: "Product 1".to_string(),
            price,
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_updates() {
        let repo = repository().await;
        let mut product = row(dec!(10), "disabled");

        let (_, outcome) = repo.upsert(&product).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        product.status = "enabled".to_string();
        product.price = dec!(12.50);
        let (returned, outcome) = repo.upsert(&product).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(returned, product);

        let stored = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(stored, product);
    }

    #[tokio::test]
    async fn test_upsert_returns_stored_fractional_price() {
        let repo = repository().await;
        let product = row(dec!(10.12345), "disabled");

        let (returned, _) = repo.upsert(&product).await.unwrap();
        let stored = repo.get_by_id(product.id).await.unwrap();

        assert_eq!(returned.price.to_string(), "10.12345");
        assert_eq!(stored, returned);
    }

    #[tokio::test]
    async fn test_concurrent_first_upserts_both_succeed() {
        let repo = repository().await;
        let first = row(dec!(1), "disabled");
        let second = ProductRow {
            price: dec!(2),
            ..first.clone()
        };

        let (a, b) = tokio::join!(repo.upsert(&first), repo.upsert(&second));
        let outcomes = [a.unwrap().1, b.unwrap().1];

        assert!(outcomes.contains(&UpsertOutcome::Inserted));
        assert!(outcomes.contains(&UpsertOutcome::Updated));
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(repo.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_price_keeps_exact_decimal() {
        let repo = repository().await;
        let product = row(dec!(19.9900), "disabled");
        repo.insert(&product).await.unwrap();

        let stored = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(stored.price.to_string(), "19.9900");
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let repo = repository().await;
        let product = row(dec!(1), "disabled");
        repo.insert(&product).await.unwrap();

        let err = repo.insert(&product).await.unwrap_err();
        assert!(matches!(err, DatabaseError::DuplicateEntry(_)));
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_unknown_status() {
        let repo = repository().await;
        let err = repo.insert(&row(dec!(1), "archived")).await.unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_update_unknown_id_affects_nothing() {
        let repo = repository().await;
        assert_eq!(repo.update(&row(dec!(1), "enabled")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_row() {
        let repo = repository().await;
        let err = repo.get_by_id(Uuid::now_v7()).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!repo.exists(Uuid::now_v7()).await.unwrap());
    }
}
