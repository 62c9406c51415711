//! # Seed Data Generator
//!
//! Fills an empty database with a sample menu for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p espetinho-db --bin seed
//!
//! # Specify database path
//! cargo run -p espetinho-db --bin seed -- --db ./data/espetinho.db
//!
//! # Also place a few demo orders
//! cargo run -p espetinho-db --bin seed -- --orders 5
//! ```
//!
//! Products go through the same Product/Stock transaction the admin panel
//! uses, so every product gets its stock row.

use espetinho_core::{Money, NewOrder, NewOrderItem, NewProduct};
use espetinho_db::{place_order, Database, DbConfig};
use std::env;

/// Sample menu: (category id, name, description, price in cents)
const MENU: &[(i64, &str, Option<&str>, i64)] = &[
    (1, "Espeto de Alcatra", Some("Alcatra no espeto"), 1250),
    (1, "Espeto de Frango", Some("Peito de frango temperado"), 1000),
    (1, "Espeto de Kafta", None, 1100),
    (1, "Espeto de Coração", Some("Coração de frango"), 1000),
    (1, "Espeto de Queijo Coalho", None, 900),
    (1, "Espeto de Linguiça", None, 950),
    (2, "Coca-Cola Lata", Some("350ml"), 600),
    (2, "Guaraná Antarctica Lata", Some("350ml"), 550),
    (2, "Água Mineral", Some("500ml"), 350),
    (2, "Suco de Maracujá", Some("Copo 400ml"), 800),
    (3, "Farofa", Some("Porção"), 500),
    (3, "Vinagrete", Some("Porção"), 400),
    (3, "Pão de Alho", None, 700),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./espetinho.db");
    let mut orders: usize = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--orders" | "-o" => {
                if i + 1 < args.len() {
                    orders = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Espetinho Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>     Database file path (default: ./espetinho.db)");
                println!("  -o, --orders <N>    Demo orders to place (default: 0)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Espetinho Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Creating menu...");

    let mut product_ids = Vec::with_capacity(MENU.len());
    for (category_id, name, description, cents) in MENU {
        let product = NewProduct {
            name: name.to_string(),
            description: description.map(str::to_string),
            unit_price: Money::from_cents(*cents),
            category_id: *category_id,
            available: true,
        };

        match db.products().create_with_stock(&product).await {
            Ok(ids) => product_ids.push((ids.product_id, *cents)),
            Err(e) => eprintln!("Failed to insert {}: {}", name, e),
        }
    }

    println!("✓ Created {} products", product_ids.len());

    if orders > 0 && !product_ids.is_empty() {
        println!();
        println!("Placing demo orders...");

        for n in 0..orders {
            let (product_id, cents) = product_ids[n % product_ids.len()];
            let quantity = (n % 3 + 1) as i64;
            let unit_price = Money::from_cents(cents);

            let request = NewOrder {
                customer_name: format!("Cliente {}", n + 1),
                phone: format!("55619900000{:02}", n % 100),
                items: vec![NewOrderItem {
                    product_id,
                    quantity,
                    unit_price,
                }],
                total: unit_price.multiply_quantity(quantity),
            };

            let order = place_order(&db, &request).await?;
            println!("  Order #{} {}", order.id, order.total());
        }
    }

    let stats = db.statistics().compute(chrono::Utc::now()).await?;
    println!();
    println!(
        "Last 24h: {} orders, {}",
        stats.order_count, stats.revenue
    );
    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
