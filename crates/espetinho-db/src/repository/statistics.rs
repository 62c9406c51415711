//! Statistics Repository
//!
//! Order count and revenue over the trailing 24 hours. Recomputed from the
//! orders table on every call.

use chrono::{DateTime, Utc};
use espetinho_core::{Money, Statistics};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

#[derive(Debug, Clone)]
pub struct StatisticsRepository {
    pool: SqlitePool,
}

impl StatisticsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StatisticsRepository { pool }
    }

    /// Counts orders created at or after `now - 24h` and sums their totals.
    ///
    /// Every status counts, canceled orders included. With no orders in the
    /// window both figures are zero.
    pub async fn compute(&self, now: DateTime<Utc>) -> DbResult<Statistics> {
        let window_start = Statistics::window_start(now);

        let (order_count, revenue_cents): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(total_cents), 0)
            FROM orders
            WHERE created_at >= ?
            "#,
        )
        .bind(window_start)
        .fetch_one(&self.pool)
        .await?;

        debug!(order_count, revenue_cents, "Statistics computed");

        Ok(Statistics {
            order_count,
            revenue: Money::from_cents(revenue_cents),
            window_start,
            computed_at: now,
        })
    }
}
