//! # Stock Repository
//!
//! Database operations for the stock ledger.
//!
//! Most stock rows are created and removed by the product manager together
//! with their product. The operations here handle standalone rows from the
//! admin panel's inventory screen.
//!
//! ## Delete Guard
//! ```text
//! delete(id)
//!   │
//!   ├── referenced by a product? ──► ValidationError::InUse (nothing removed)
//!   ├── no such row?             ──► DbError::NotFound
//!   └── otherwise                ──► row removed
//! ```

use chrono::{DateTime, Utc};
use espetinho_core::{StockInput, StockItem, StockItemDetails, ValidationError};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::table::{self, Fields, TableRepository};
use crate::error::{DbError, DbResult};

const STOCK_DETAILS_SELECT: &str = r#"
    SELECT s.id, s.description, s.category_id, c.name AS category,
           s.registered_at, s.available
    FROM stock_items s
    JOIN categories c ON c.id = s.category_id
"#;

/// Columns written when a stock row is created.
pub(crate) fn new_stock_fields(
    description: &str,
    category_id: i64,
    available: bool,
    registered_at: DateTime<Utc>,
) -> Fields {
    vec![
        ("description", description.trim().into()),
        ("category_id", category_id.into()),
        ("registered_at", registered_at.into()),
        ("available", available.into()),
    ]
}

/// Columns written when a stock row is edited.
pub(crate) fn stock_update_fields(description: &str, category_id: i64, available: bool) -> Fields {
    vec![
        ("description", description.trim().into()),
        ("category_id", category_id.into()),
        ("available", available.into()),
    ]
}

/// Repository for stock ledger operations.
#[derive(Debug, Clone)]
pub struct StockRepository {
    base: TableRepository<StockItem>,
}

impl StockRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository {
            base: TableRepository::new(pool),
        }
    }

    /// Every stock row with its category name, newest first.
    pub async fn list(&self) -> DbResult<Vec<StockItemDetails>> {
        let sql = format!("{STOCK_DETAILS_SELECT} ORDER BY s.registered_at DESC, s.id DESC");
        let rows = sqlx::query_as::<_, StockItemDetails>(&sql)
            .fetch_all(self.base.pool())
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> DbResult<Option<StockItemDetails>> {
        let sql = format!("{STOCK_DETAILS_SELECT} WHERE s.id = ?");
        let row = sqlx::query_as::<_, StockItemDetails>(&sql)
            .bind(id)
            .fetch_optional(self.base.pool())
            .await?;
        Ok(row)
    }

    /// Creates a standalone stock row registered now.
    pub async fn create(&self, input: &StockInput) -> DbResult<StockItem> {
        input.validate()?;

        let registered_at = Utc::now();
        let id = self
            .base
            .insert(new_stock_fields(
                &input.description,
                input.category_id,
                input.available,
                registered_at,
            ))
            .await?;

        info!(id, category_id = input.category_id, "Stock item created");

        Ok(StockItem {
            id,
            description: input.description.trim().to_string(),
            category_id: input.category_id,
            registered_at,
            available: input.available,
        })
    }

    /// Rewrites description, category and availability of one row.
    pub async fn update(&self, id: i64, input: &StockInput) -> DbResult<u64> {
        input.validate()?;

        let changed = self
            .base
            .update(
                id,
                stock_update_fields(&input.description, input.category_id, input.available),
            )
            .await?;

        debug!(id, "Stock item updated");
        Ok(changed)
    }

    /// Removes a row no product references.
    pub async fn delete(&self, id: i64) -> DbResult<u64> {
        let mut tx = self.base.pool().begin().await.map_err(DbError::in_transaction)?;

        let references: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE stock_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::in_transaction)?;

        if references > 0 {
            return Err(ValidationError::InUse {
                entity: "Stock item".to_string(),
                id,
            }
            .into());
        }

        let removed = table::delete_row::<StockItem, _>(&mut *tx, id).await?;
        if removed == 0 {
            return Err(DbError::not_found("Stock item", id));
        }

        tx.commit().await.map_err(DbError::in_transaction)?;

        info!(id, "Stock item deleted");
        Ok(removed)
    }

    /// Available rows of one category, by description.
    pub async fn available_by_category(&self, category_id: i64) -> DbResult<Vec<StockItemDetails>> {
        let sql = format!(
            "{STOCK_DETAILS_SELECT} WHERE s.category_id = ? AND s.available = 1 ORDER BY s.description"
        );
        let rows = sqlx::query_as::<_, StockItemDetails>(&sql)
            .bind(category_id)
            .fetch_all(self.base.pool())
            .await?;
        Ok(rows)
    }

    /// Flips the availability flag. NotFound for an unknown id.
    pub async fn set_availability(&self, id: i64, available: bool) -> DbResult<u64> {
        self.base
            .update(id, vec![("available", available.into())])
            .await
    }
}
