//! Customer Repository
//!
//! Customers are identified by phone number and created on demand when an
//! order arrives. They are never deleted.

use espetinho_core::{Customer, CustomerOrder};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::table::TableRepository;
use crate::error::{DbError, DbResult};

#[derive(Debug, Clone)]
pub struct CustomerRepository {
    base: TableRepository<Customer>,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository {
            base: TableRepository::new(pool),
        }
    }

    pub async fn get(&self, id: i64) -> DbResult<Option<Customer>> {
        self.base.find_by_id(id).await
    }

    /// First customer registered with `phone`, if any.
    pub async fn find_by_phone(&self, phone: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE phone = ? ORDER BY id LIMIT 1",
        )
        .bind(phone.trim())
        .fetch_optional(self.base.pool())
        .await?;
        Ok(customer)
    }

    /// Returns the customer registered with `phone`, creating it if needed.
    ///
    /// An existing record is returned unchanged: a different `name` does not
    /// overwrite the stored one. The unique phone index makes concurrent
    /// calls for the same phone converge on one row.
    pub async fn find_or_create(&self, name: &str, phone: &str) -> DbResult<Customer> {
        let phone = phone.trim();

        let inserted: Option<i64> = sqlx::query_scalar(
            "INSERT INTO customers (name, phone) VALUES (?, ?) \
             ON CONFLICT (phone) DO NOTHING RETURNING id",
        )
        .bind(name.trim())
        .bind(phone)
        .fetch_optional(self.base.pool())
        .await?;

        match inserted {
            Some(id) => info!(id, "Customer created"),
            None => debug!("Customer found by phone"),
        }

        self.find_by_phone(phone)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", phone))
    }

    /// A customer's orders with their item counts, newest first.
    pub async fn orders_of(&self, customer_id: i64) -> DbResult<Vec<CustomerOrder>> {
        let orders = sqlx::query_as::<_, CustomerOrder>(
            r#"
            SELECT o.id, o.created_at, o.status, o.total_cents,
                   COUNT(oi.id) AS item_count
            FROM orders o
            LEFT JOIN order_items oi ON oi.order_id = o.id
            WHERE o.customer_id = ?
            GROUP BY o.id
            ORDER BY o.created_at DESC, o.id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.base.pool())
        .await?;
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_find_or_create_keeps_first_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let first = db
            .customers()
            .find_or_create("Ana", "5561999999999")
            .await
            .unwrap();
        let second = db
            .customers()
            .find_or_create("Ana Paula", "5561999999999")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Ana");

        let stored = db.customers().get(first.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ana");
    }

    #[tokio::test]
    async fn test_concurrent_find_or_create_yields_one_customer() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("espetinho.db")).max_connections(4))
            .await
            .unwrap();

        for round in 0..10 {
            let phone = format!("55619999900{:02}", round);
            let (repo_a, repo_b) = (db.customers(), db.customers());
            let (a, b) = tokio::join!(
                repo_a.find_or_create("Ana", &phone),
                repo_b.find_or_create("Bia", &phone),
            );
            assert_eq!(a.unwrap().id, b.unwrap().id);

            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE phone = ?")
                .bind(&phone)
                .fetch_one(db.pool())
                .await
                .unwrap();
            assert_eq!(count, 1);
        }
    }

    #[tokio::test]
    async fn test_duplicate_phone_insert_is_refused() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.customers().find_or_create("Ana", "111").await.unwrap();

        let duplicate = sqlx::query("INSERT INTO customers (name, phone) VALUES ('Bia', '111')")
            .execute(db.pool())
            .await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_distinct_phones_are_distinct_customers() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let ana = db.customers().find_or_create("Ana", "111").await.unwrap();
        let bia = db.customers().find_or_create("Ana", "222").await.unwrap();
        assert_ne!(ana.id, bia.id);

        assert!(db.customers().find_by_phone("333").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_orders_of_unknown_customer_is_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.customers().orders_of(5).await.unwrap().is_empty());
    }
}
