//! # Generic Table Access
//!
//! Single-table CRUD shared by every entity repository.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │  impl Table for Product { NAME = "products", ... }                    │
//! │       │                                                               │
//! │       ├── TableRepository<Product>   (owns a pool clone)              │
//! │       │     find_all / find_by_id / insert / update / remove          │
//! │       │                                                               │
//! │       └── insert_into / update_row / delete_row / fetch_by_id         │
//! │             generic over the executor, so the managers can run        │
//! │             them on `&mut *tx` inside a transaction                   │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Column names always come from `&'static str` constants in this crate;
//! only values are bound.

use chrono::{DateTime, Utc};
use espetinho_core::{Category, Customer, Order, OrderItem, Product, StockItem};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::marker::PhantomData;
use tracing::debug;

use crate::error::{DbError, DbResult};

// =============================================================================
// Table Descriptor
// =============================================================================

/// Describes how a row type maps onto its table.
pub trait Table: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    /// Table name.
    const NAME: &'static str;

    /// Entity name used in NotFound errors.
    const ENTITY: &'static str;

    /// ORDER BY clause for `find_all`.
    const ORDER_BY: &'static str = "id";
}

impl Table for Category {
    const NAME: &'static str = "categories";
    const ENTITY: &'static str = "Category";
}

impl Table for StockItem {
    const NAME: &'static str = "stock_items";
    const ENTITY: &'static str = "Stock item";
    const ORDER_BY: &'static str = "registered_at DESC, id DESC";
}

impl Table for Product {
    const NAME: &'static str = "products";
    const ENTITY: &'static str = "Product";
    const ORDER_BY: &'static str = "name";
}

impl Table for Customer {
    const NAME: &'static str = "customers";
    const ENTITY: &'static str = "Customer";
}

impl Table for Order {
    const NAME: &'static str = "orders";
    const ENTITY: &'static str = "Order";
    const ORDER_BY: &'static str = "created_at DESC, id DESC";
}

impl Table for OrderItem {
    const NAME: &'static str = "order_items";
    const ENTITY: &'static str = "Order item";
}

// =============================================================================
// Column Values
// =============================================================================

/// A value bound to a column in a generated INSERT or UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    OptInteger(Option<i64>),
    Text(String),
    OptText(Option<String>),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        Value::OptInteger(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        Value::OptText(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

/// Column/value pairs for one row.
pub type Fields = Vec<(&'static str, Value)>;

fn push_value(builder: &mut QueryBuilder<'_, Sqlite>, value: Value) {
    match value {
        Value::Integer(v) => {
            builder.push_bind(v);
        }
        Value::OptInteger(v) => {
            builder.push_bind(v);
        }
        Value::Text(v) => {
            builder.push_bind(v);
        }
        Value::OptText(v) => {
            builder.push_bind(v);
        }
        Value::Bool(v) => {
            builder.push_bind(v);
        }
        Value::Timestamp(v) => {
            builder.push_bind(v);
        }
    }
}

// =============================================================================
// Executor-Generic Helpers
// =============================================================================

/// Inserts one row and returns its rowid.
pub async fn insert_into<'e, T, E>(executor: E, fields: Fields) -> DbResult<i64>
where
    T: Table,
    E: Executor<'e, Database = Sqlite>,
{
    let mut builder = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {} (", T::NAME));

    let (columns, values): (Vec<_>, Vec<_>) = fields.into_iter().unzip();
    builder.push(columns.join(", "));
    builder.push(") VALUES (");
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        push_value(&mut builder, value);
    }
    builder.push(")");

    let result = builder.build().execute(executor).await?;
    let id = result.last_insert_rowid();

    debug!(table = T::NAME, id, "Row inserted");
    Ok(id)
}

/// Updates the given columns of one row. Returns the number of rows changed.
pub async fn update_row<'e, T, E>(executor: E, id: i64, fields: Fields) -> DbResult<u64>
where
    T: Table,
    E: Executor<'e, Database = Sqlite>,
{
    if fields.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", T::NAME));
    for (i, (column, value)) in fields.into_iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder.push(column);
        builder.push(" = ");
        push_value(&mut builder, value);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(executor).await?;

    debug!(table = T::NAME, id, changed = result.rows_affected(), "Row updated");
    Ok(result.rows_affected())
}

/// Deletes one row. Returns the number of rows removed.
pub async fn delete_row<'e, T, E>(executor: E, id: i64) -> DbResult<u64>
where
    T: Table,
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("DELETE FROM {} WHERE id = ?", T::NAME);
    let result = sqlx::query(&sql).bind(id).execute(executor).await?;

    debug!(table = T::NAME, id, changed = result.rows_affected(), "Row deleted");
    Ok(result.rows_affected())
}

/// Loads one row by id.
pub async fn fetch_by_id<'e, T, E>(executor: E, id: i64) -> DbResult<Option<T>>
where
    T: Table,
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT * FROM {} WHERE id = ?", T::NAME);
    let row = sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

// =============================================================================
// Table Repository
// =============================================================================

/// Pool-backed CRUD for a single table.
///
/// Entity repositories hold one and delegate the plain operations to it.
#[derive(Debug)]
pub struct TableRepository<T> {
    pool: SqlitePool,
    _row: PhantomData<fn() -> T>,
}

impl<T> Clone for TableRepository<T> {
    fn clone(&self) -> Self {
        TableRepository {
            pool: self.pool.clone(),
            _row: PhantomData,
        }
    }
}

impl<T: Table> TableRepository<T> {
    pub fn new(pool: SqlitePool) -> Self {
        TableRepository {
            pool,
            _row: PhantomData,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Every row, in the table's default order.
    pub async fn find_all(&self) -> DbResult<Vec<T>> {
        let sql = format!("SELECT * FROM {} ORDER BY {}", T::NAME, T::ORDER_BY);
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<T>> {
        fetch_by_id::<T, _>(&self.pool, id).await
    }

    /// Like `find_by_id`, but a missing row is `DbError::NotFound`.
    pub async fn get(&self, id: i64) -> DbResult<T> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(T::ENTITY, id))
    }

    pub async fn insert(&self, fields: Fields) -> DbResult<i64> {
        insert_into::<T, _>(&self.pool, fields).await
    }

    /// Updates one row; zero rows changed is `DbError::NotFound`.
    pub async fn update(&self, id: i64, fields: Fields) -> DbResult<u64> {
        match update_row::<T, _>(&self.pool, id, fields).await? {
            0 => Err(DbError::not_found(T::ENTITY, id)),
            changed => Ok(changed),
        }
    }

    /// Deletes one row; zero rows removed is `DbError::NotFound`.
    pub async fn remove(&self, id: i64) -> DbResult<u64> {
        match delete_row::<T, _>(&self.pool, id).await? {
            0 => Err(DbError::not_found(T::ENTITY, id)),
            changed => Ok(changed),
        }
    }

    pub async fn count(&self) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", T::NAME);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_seeded_categories_in_order() {
        let db = test_db().await;
        let repo = TableRepository::<Category>::new(db.pool().clone());

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["ESPETOS", "BEBIDAS", "INSUMOS"]);
    }

    #[tokio::test]
    async fn test_insert_update_remove() {
        let db = test_db().await;
        let repo = TableRepository::<Customer>::new(db.pool().clone());

        let id = repo
            .insert(vec![("name", "Ana".into()), ("phone", "5561999999999".into())])
            .await
            .unwrap();

        let customer = repo.get(id).await.unwrap();
        assert_eq!(customer.name, "Ana");

        repo.update(id, vec![("name", "Ana Maria".into())])
            .await
            .unwrap();
        assert_eq!(repo.get(id).await.unwrap().name, "Ana Maria");
        assert_eq!(repo.count().await.unwrap(), 1);

        assert_eq!(repo.remove(id).await.unwrap(), 1);
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() {
        let db = test_db().await;
        let repo = TableRepository::<Customer>::new(db.pool().clone());

        assert!(matches!(
            repo.update(99, vec![("name", "X".into())]).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(repo.remove(99).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.get(99).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_helpers_run_inside_transaction() {
        let db = test_db().await;

        let mut tx = db.pool().begin().await.unwrap();
        let id = insert_into::<Customer, _>(
            &mut *tx,
            vec![("name", "Rolled".into()), ("phone", "1".into())],
        )
        .await
        .unwrap();
        let inside = fetch_by_id::<Customer, _>(&mut *tx, id).await.unwrap();
        assert!(inside.is_some());
        tx.rollback().await.unwrap();

        let after = fetch_by_id::<Customer, _>(db.pool(), id).await.unwrap();
        assert!(after.is_none());
    }
}
