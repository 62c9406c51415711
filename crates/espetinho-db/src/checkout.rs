//! # Order Placement
//!
//! Turns an order submitted from the menu site into stored rows.
//!
//! ```text
//! place_order(db, NewOrder)
//!   │
//!   ├── validate (name, phone, total, quantity and price ranges)
//!   │
//!   ├── customers().find_or_create(name, phone)
//!   │     ├── Ok(customer) ──► customer_id = Some(id)
//!   │     └── Err(e)       ──► WARN, customer_id = None
//!   │
//!   └── orders().create_with_items(customer_id, total, items, now)
//! ```
//!
//! A failed customer lookup never blocks the order: the kitchen still gets
//! it, just without a customer attached.

use chrono::Utc;
use espetinho_core::{NewOrder, Order};
use tracing::{info, warn};

use crate::error::DbResult;
use crate::pool::Database;

/// Validates and stores an order, resolving its customer by phone.
pub async fn place_order(db: &Database, request: &NewOrder) -> DbResult<Order> {
    request.validate()?;

    let items_total = request.items_total()?;
    if items_total != request.total {
        // Stored as submitted; the menu site computes its own total
        info!(
            submitted = %request.total,
            computed = %items_total,
            "Order total differs from item sum"
        );
    }

    let customer_id = match db
        .customers()
        .find_or_create(&request.customer_name, &request.phone)
        .await
    {
        Ok(customer) => Some(customer.id),
        Err(err) => {
            warn!(error = %err, "Customer lookup failed, placing order without customer");
            None
        }
    };

    db.orders()
        .create_with_items(customer_id, request.total, &request.items, Utc::now())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use crate::DbError;
    use espetinho_core::{Money, NewOrderItem, NewProduct, OrderStatus, ProductUpdate};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn skewer_id(db: &Database) -> i64 {
        db.products()
            .create_with_stock(&NewProduct {
                name: "Beef Skewer".to_string(),
                description: None,
                unit_price: Money::from_cents(1250),
                category_id: 1,
                available: true,
            })
            .await
            .unwrap()
            .product_id
    }

    fn ana_order(product_id: i64) -> NewOrder {
        NewOrder {
            customer_name: "Ana".to_string(),
            phone: "5561999999999".to_string(),
            items: vec![NewOrderItem {
                product_id,
                quantity: 2,
                unit_price: Money::from_cents(1250),
            }],
            total: Money::from_cents(2500),
        }
    }

    #[tokio::test]
    async fn test_place_order() {
        let db = test_db().await;
        let product_id = skewer_id(&db).await;

        let order = place_order(&db, &ana_order(product_id)).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_cents, 2500);

        let customer = db
            .customers()
            .find_by_phone("5561999999999")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.customer_id, Some(customer.id));

        // A later price change leaves the order untouched
        db.products()
            .update_with_stock(
                product_id,
                &ProductUpdate {
                    unit_price: Money::from_cents(1400),
                    description: "Beef Skewer".to_string(),
                    category_id: 1,
                    available: true,
                },
            )
            .await
            .unwrap();

        let full = db.orders().get_with_items(order.id).await.unwrap().unwrap();
        assert_eq!(full.items.len(), 1);
        assert_eq!(full.items[0].quantity, 2);
        assert_eq!(full.items[0].unit_price_cents, 1250);
    }

    #[tokio::test]
    async fn test_repeat_customer_reuses_record() {
        let db = test_db().await;
        let product_id = skewer_id(&db).await;

        let first = place_order(&db, &ana_order(product_id)).await.unwrap();
        let mut again = ana_order(product_id);
        again.customer_name = "Ana Clara".to_string();
        let second = place_order(&db, &again).await.unwrap();

        assert_eq!(first.customer_id, second.customer_id);
    }

    #[tokio::test]
    async fn test_invalid_order_is_rejected_before_writes() {
        let db = test_db().await;
        let product_id = skewer_id(&db).await;

        let mut no_name = ana_order(product_id);
        no_name.customer_name = String::new();
        assert!(matches!(
            place_order(&db, &no_name).await,
            Err(DbError::Validation(_))
        ));

        let mut zero_total = ana_order(product_id);
        zero_total.total = Money::zero();
        assert!(place_order(&db, &zero_total).await.is_err());

        assert!(db.orders().list().await.unwrap().is_empty());
        assert!(db
            .customers()
            .find_by_phone("5561999999999")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_overflowing_quantity_is_rejected() {
        let db = test_db().await;
        let product_id = skewer_id(&db).await;

        let mut huge = ana_order(product_id);
        huge.items[0].quantity = 4_611_686_018_427_387_903;
        assert!(matches!(
            place_order(&db, &huge).await,
            Err(DbError::Validation(_))
        ));
        assert!(db.orders().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_customer_failure_falls_back_to_anonymous_order() {
        let db = test_db().await;
        let product_id = skewer_id(&db).await;

        // Make customer inserts fail while orders still work
        sqlx::query(
            r#"
            CREATE TRIGGER reject_customers BEFORE INSERT ON customers
            BEGIN
                SELECT RAISE(ABORT, 'customers are read-only');
            END
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let order = place_order(&db, &ana_order(product_id)).await.unwrap();
        assert_eq!(order.customer_id, None);

        let stored = db.orders().get_with_items(order.id).await.unwrap().unwrap();
        assert!(stored.order.customer_name.is_none());
        assert_eq!(stored.items.len(), 1);
    }
}
