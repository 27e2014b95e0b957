//! Product repository implementation (PostgreSQL)
//!
//! This module provides database access for the `products` table. Saving is
//! an upsert: an `INSERT ... ON CONFLICT (id) DO NOTHING` followed, when the
//! id was already taken, by an update of every mutable column, both inside one
//! transaction. A concurrent first save of the same id blocks on the
//! conflicting insert and then updates, so the later commit wins.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::repositories::ProductStore;

/// Outcome of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row existed; one was inserted
    Inserted,
    /// A row existed and was updated
    Updated,
}

/// Database row for the products table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub status: String,
}

/// Repository for managing product rows in PostgreSQL
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a product row by its identifier
    ///
    /// # Returns
    ///
    /// The product row or a NotFound error
    pub async fn get_by_id(&self, id: Uuid) -> Result<ProductRow, DatabaseError> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, status
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Product", id))
    }

    /// Checks whether a row exists for the identifier
    pub async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        exists_on(&mut conn, id).await
    }

    /// Inserts a new product row
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` if the id is already taken
    pub async fn insert(&self, row: &ProductRow) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        insert_on(&mut conn, row).await
    }

    /// Updates name, price and status of an existing row
    ///
    /// # Returns
    ///
    /// The number of rows affected (0 when the id is unknown)
    pub async fn update(&self, row: &ProductRow) -> Result<u64, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        Ok(update_on(&mut conn, row).await?.map_or(0, |_| 1))
    }

    /// Inserts the row if its id is unknown, otherwise updates it
    ///
    /// # Returns
    ///
    /// The row as stored by the database, and whether it was inserted or updated
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
        Ok((stored, outcome))
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    const ADAPTER_ID: &'static str = "postgres-product-adapter";

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

async fn exists_on(conn: &mut PgConnection, id: Uuid) -> Result<bool, DatabaseError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = $1")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

async fn insert_on(conn: &mut PgConnection, row: &ProductRow) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"
        INSERT INTO products (id, name, price, status)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(row.id)
    .bind(&row.name)
    .bind(row.price)
    .bind(&row.status)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_if_absent_on(
    conn: &mut PgConnection,
    row: &ProductRow,
) -> Result<Option<ProductRow>, DatabaseError> {
    let stored = sqlx::query_as::<_, ProductRow>(
        r#"
        INSERT INTO products (id, name, price, status)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO NOTHING
        RETURNING id, name, price, status
        "#,
    )
    .bind(row.id)
    .bind(&row.name)
    .bind(row.price)
    .bind(&row.status)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(stored)
}

async fn update_on(
    conn: &mut PgConnection,
    row: &ProductRow,
) -> Result<Option<ProductRow>, DatabaseError> {
    let stored = sqlx::query_as::<_, ProductRow>(
        r#"
        UPDATE products
        SET name = $2, price = $3, status = $4
        WHERE id = $1
        RETURNING id, name, price, status
        "#,
    )
    .bind(row.id)
    .bind(&row.name)
    .bind(row.price)
    .bind(&row.status)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(stored)
}
