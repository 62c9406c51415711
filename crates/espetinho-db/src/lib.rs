//! # espetinho-db: Database Layer for Espetinho
//!
//! SQLite persistence for the ordering system, through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Espetinho Data Flow                              │
//! │                                                                         │
//! │  apps/api handler (POST /api/pedidos)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  espetinho-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ product/order │    │  (embedded)  │  │   │
//! │  │   │               │◄───│ stock/customer│    │ 001_initial  │  │   │
//! │  │   │  SqlitePool   │    │ category/stats│    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │             ▲                                                   │   │
//! │  │             └──── checkout::place_order (customer + order)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (WAL, foreign keys on)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`checkout`] - Order placement with customer resolution
//!
//! ## Usage
//!
//! ```rust,ignore
//! use espetinho_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./espetinho.db")).await?;
//!
//! let categories = db.categories().list().await?;
//! let stats = db.statistics().compute(chrono::Utc::now()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::place_order;
pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

pub use repository::{
    CategoryRepository, CustomerRepository, OrderRepository, ProductRepository,
    StatisticsRepository, StockRepository,
};
