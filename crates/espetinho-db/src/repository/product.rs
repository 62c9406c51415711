//! # Product Repository
//!
//! Product catalog operations. Every product owns exactly one stock row, so
//! each write here touches both tables inside one transaction.
//!
//! ## Product / Stock Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_with_stock                                                     │
//! │    validate ─► BEGIN ─► INSERT stock_items ─► INSERT products ─► COMMIT│
//! │                                                                         │
//! │  update_with_stock                                                     │
//! │    validate ─► BEGIN                                                   │
//! │      ─► UPDATE products.unit_price_cents RETURNING stock_id (NotFound) │
//! │      ─► UPDATE stock_items (description, category, available) ─► COMMIT│
//! │                                                                         │
//! │  delete_with_stock                                                     │
//! │    BEGIN ─► DELETE products RETURNING stock_id (NotFound)              │
//! │      ─► DELETE stock_items if no other product uses it ─► COMMIT       │
//! │                                                                         │
//! │  Any error before COMMIT drops the transaction, which rolls it back.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use espetinho_core::{
    CreatedProduct, NewProduct, Product, ProductDetails, ProductUpdate, StockItem,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use super::stock::{new_stock_fields, stock_update_fields};
use super::table::{self, TableRepository};
use crate::error::{DbError, DbResult};

/// Product joined with its stock row and category.
pub(crate) const PRODUCT_DETAILS_SELECT: &str = r#"
    SELECT p.id, p.name, p.description, p.unit_price_cents, p.stock_id,
           s.category_id, c.name AS category, s.available, s.registered_at
    FROM products p
    JOIN stock_items s ON s.id = p.stock_id
    JOIN categories c ON c.id = s.category_id
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    base: TableRepository<Product>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository {
            base: TableRepository::new(pool),
        }
    }

    fn pool(&self) -> &SqlitePool {
        self.base.pool()
    }

    async fn begin(&self) -> DbResult<Transaction<'static, Sqlite>> {
        self.pool().begin().await.map_err(DbError::in_transaction)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Every product with category, availability and registration time,
    /// most recently registered first.
    pub async fn list_with_details(&self) -> DbResult<Vec<ProductDetails>> {
        let sql = format!("{PRODUCT_DETAILS_SELECT} ORDER BY s.registered_at DESC, p.id DESC");
        let products = sqlx::query_as::<_, ProductDetails>(&sql)
            .fetch_all(self.pool())
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    pub async fn get_with_details(&self, id: i64) -> DbResult<Option<ProductDetails>> {
        let sql = format!("{PRODUCT_DETAILS_SELECT} WHERE p.id = ?");
        let product = sqlx::query_as::<_, ProductDetails>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(product)
    }

    /// The bare product row.
    pub async fn get(&self, id: i64) -> DbResult<Option<Product>> {
        self.base.find_by_id(id).await
    }

    /// Number of products (used by the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        self.base.count().await
    }

    // =========================================================================
    // Product + Stock Writes
    // =========================================================================

    /// Creates the product and its stock row atomically.
    ///
    /// The stock row takes the product name as its description and is
    /// registered now.
    pub async fn create_with_stock(&self, input: &NewProduct) -> DbResult<CreatedProduct> {
        input.validate()?;

        let name = input.name.trim();
        let mut tx = self.begin().await?;

        let stock_id = table::insert_into::<StockItem, _>(
            &mut *tx,
            new_stock_fields(name, input.category_id, input.available, Utc::now()),
        )
        .await?;

        let product_id = table::insert_into::<Product, _>(
            &mut *tx,
            vec![
                ("name", name.into()),
                ("description", input.description.clone().into()),
                ("unit_price_cents", input.unit_price.cents().into()),
                ("stock_id", stock_id.into()),
            ],
        )
        .await?;

        tx.commit().await.map_err(DbError::in_transaction)?;

        info!(
            product_id,
            stock_id,
            price = %input.unit_price,
            "Product created with stock"
        );

        Ok(CreatedProduct {
            product_id,
            stock_id,
        })
    }

    /// Updates the product's price and its stock row's description,
    /// category and availability atomically.
    ///
    /// Returns the number of rows changed across both tables.
    pub async fn update_with_stock(&self, id: i64, input: &ProductUpdate) -> DbResult<u64> {
        input.validate()?;

        let mut tx = self.begin().await?;

        // First statement writes, so the stock id is read under the write lock
        let stock_id: i64 = sqlx::query_scalar(
            "UPDATE products SET unit_price_cents = ? WHERE id = ? RETURNING stock_id",
        )
        .bind(input.unit_price.cents())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Product", id))?;

        let changed = 1 + table::update_row::<StockItem, _>(
            &mut *tx,
            stock_id,
            stock_update_fields(&input.description, input.category_id, input.available),
        )
        .await?;

        tx.commit().await.map_err(DbError::in_transaction)?;

        info!(id, stock_id, price = %input.unit_price, "Product updated");
        Ok(changed)
    }

    /// Deletes the product, then its stock row if no other product uses it.
    ///
    /// A product that past orders still reference is kept and the foreign
    /// key violation is returned.
    pub async fn delete_with_stock(&self, id: i64) -> DbResult<u64> {
        let mut tx = self.begin().await?;

        let stock_id: i64 =
            sqlx::query_scalar("DELETE FROM products WHERE id = ? RETURNING stock_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| DbError::not_found("Product", id))?;

        let orphan = sqlx::query(
            r#"
            DELETE FROM stock_items
            WHERE id = ?1
              AND NOT EXISTS (SELECT 1 FROM products WHERE stock_id = ?1)
            "#,
        )
        .bind(stock_id)
        .execute(&mut *tx)
        .await?;
        let changed = 1 + orphan.rows_affected();

        tx.commit().await.map_err(DbError::in_transaction)?;

        info!(id, stock_id, "Product deleted");
        Ok(changed)
    }
}
