//! # Order Repository
//!
//! Database operations for orders and their line items.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. PLACE                                                               │
//! │     └── create_with_items() → Order { status: PENDING } + N items      │
//! │         (one transaction: all rows or none)                            │
//! │                                                                         │
//! │  2. KITCHEN                                                             │
//! │     └── update_status("PREPARING") → update_status("READY") → ...      │
//! │         Any known status is accepted. Jumps outside the nominal flow   │
//! │         are written and logged at WARN.                                │
//! │                                                                         │
//! │  3. HISTORY                                                             │
//! │     └── Orders are never deleted. Item prices are snapshots.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use espetinho_core::validation::{self, parse_order_status};
use espetinho_core::{
    Money, NewOrderItem, Order, OrderItem, OrderItemDetails, OrderStatus, OrderSummary,
    OrderWithItems,
};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::table::{self, TableRepository};
use crate::error::{DbError, DbResult};

const ORDER_SUMMARY_SELECT: &str = r#"
    SELECT o.id, o.created_at, o.status, o.total_cents, o.customer_id,
           c.name AS customer_name, c.phone AS customer_phone
    FROM orders o
    LEFT JOIN customers c ON c.id = o.customer_id
"#;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    base: TableRepository<Order>,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository {
            base: TableRepository::new(pool),
        }
    }

    fn pool(&self) -> &SqlitePool {
        self.base.pool()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts the order (PENDING, created at `placed_at`) and every item in
    /// one transaction.
    ///
    /// Product ids are not checked up front; an unknown id fails its item's
    /// foreign key and the whole order is rolled back.
    ///
    /// ## Snapshot Pattern
    /// Each item stores the unit price it was sold at. Later price changes
    /// on the product never touch it.
    pub async fn create_with_items(
        &self,
        customer_id: Option<i64>,
        total: Money,
        items: &[NewOrderItem],
        placed_at: DateTime<Utc>,
    ) -> DbResult<Order> {
        validation::validate_order_total(total)?;

        let status = OrderStatus::Pending;
        let mut tx = self.pool().begin().await.map_err(DbError::in_transaction)?;

        let id = table::insert_into::<Order, _>(
            &mut *tx,
            vec![
                ("created_at", placed_at.into()),
                ("status", status.as_str().into()),
                ("total_cents", total.cents().into()),
                ("customer_id", customer_id.into()),
            ],
        )
        .await?;

        for item in items {
            table::insert_into::<OrderItem, _>(
                &mut *tx,
                vec![
                    ("order_id", id.into()),
                    ("product_id", item.product_id.into()),
                    ("quantity", item.quantity.into()),
                    ("unit_price_cents", item.unit_price.cents().into()),
                ],
            )
            .await?;
        }

        tx.commit().await.map_err(DbError::in_transaction)?;

        info!(
            id,
            ?customer_id,
            items = items.len(),
            total = %total,
            "Order created"
        );

        Ok(Order {
            id,
            created_at: placed_at,
            status,
            total_cents: total.cents(),
            customer_id,
        })
    }

    /// Sets the status of an order.
    ///
    /// `status` must name one of the five statuses (English or the legacy
    /// Portuguese names). The current status does not restrict the new one.
    pub async fn update_status(&self, id: i64, status: &str) -> DbResult<u64> {
        let next = parse_order_status(status)?;

        let mut tx = self.pool().begin().await.map_err(DbError::in_transaction)?;

        let current: Option<OrderStatus> =
            sqlx::query_scalar("SELECT status FROM orders WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(DbError::in_transaction)?;

        let current = current.ok_or_else(|| DbError::not_found("Order", id))?;

        if current != next && !current.is_nominal_transition(next) {
            warn!(
                id,
                from = %current,
                to = %next,
                "Order status change outside the usual flow"
            );
        }

        let changed =
            table::update_row::<Order, _>(&mut *tx, id, vec![("status", next.as_str().into())])
                .await?;

        tx.commit().await.map_err(DbError::in_transaction)?;

        info!(id, from = %current, to = %next, "Order status updated");
        Ok(changed)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn get(&self, id: i64) -> DbResult<Option<Order>> {
        self.base.find_by_id(id).await
    }

    /// Every order with its customer, newest first.
    pub async fn list(&self) -> DbResult<Vec<OrderSummary>> {
        let sql = format!("{ORDER_SUMMARY_SELECT} ORDER BY o.created_at DESC, o.id DESC");
        let orders = sqlx::query_as::<_, OrderSummary>(&sql)
            .fetch_all(self.pool())
            .await?;

        debug!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    /// PENDING orders, oldest first (the kitchen queue).
    pub async fn pending(&self) -> DbResult<Vec<OrderSummary>> {
        let sql = format!("{ORDER_SUMMARY_SELECT} WHERE o.status = ? ORDER BY o.created_at, o.id");
        let orders = sqlx::query_as::<_, OrderSummary>(&sql)
            .bind(OrderStatus::Pending)
            .fetch_all(self.pool())
            .await?;
        Ok(orders)
    }

    /// Line items of an order with the product's name and description.
    pub async fn items_of(&self, order_id: i64) -> DbResult<Vec<OrderItemDetails>> {
        let items = sqlx::query_as::<_, OrderItemDetails>(
            r#"
            SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.unit_price_cents,
                   p.name AS product_name, p.description AS product_description
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = ?
            ORDER BY oi.id
            "#,
        )
        .bind(order_id)
        .fetch_all(self.pool())
        .await?;
        Ok(items)
    }

    /// The order with its customer and items.
    pub async fn get_with_items(&self, id: i64) -> DbResult<Option<OrderWithItems>> {
        let sql = format!("{ORDER_SUMMARY_SELECT} WHERE o.id = ?");
        let order = sqlx::query_as::<_, OrderSummary>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = self.items_of(id).await?;
        Ok(Some(OrderWithItems { order, items }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
