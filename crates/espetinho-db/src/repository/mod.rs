//! # Repository Module
//!
//! Database repository implementations for Espetinho.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  table.rs       Table trait + TableRepository<T> (generic CRUD)        │
//! │       ▲                                                                 │
//! │       │ delegation                                                      │
//! │  ┌────┴─────────┬──────────────┬──────────────┬──────────────┐         │
//! │  category.rs    stock.rs       product.rs     customer.rs    order.rs  │
//! │  (read-only)    (ledger)       (+ stock tx)   (by phone)     (+ items) │
//! │                                                                         │
//! │  statistics.rs  aggregate over orders, no table of its own             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository owns a clone of the pool and is handed out by
//! [`Database`](crate::Database) accessors such as `db.products()`.

pub mod category;
pub mod customer;
pub mod order;
pub mod product;
pub mod statistics;
pub mod stock;
pub mod table;

pub use category::CategoryRepository;
pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use statistics::StatisticsRepository;
pub use stock::StockRepository;
pub use table::{Table, TableRepository, Value};
