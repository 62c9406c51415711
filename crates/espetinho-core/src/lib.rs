//! # espetinho-core: Pure Business Logic for Espetinho
//!
//! Domain model of the restaurant ordering system. Everything here is a pure
//! function or a plain data type; persistence lives in `espetinho-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Espetinho Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Menu site (WhatsApp order) / Admin panel (JS)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST (JSON)                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ espetinho-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   auth    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ Verifier  │  │   rules   │  │   │
//! │  │   │   Order   │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              espetinho-db (SQLite, transactions)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Category, StockItem, Product, Order, ...)
//! - [`money`] - Money type with integer arithmetic (cents)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`auth`] - Pluggable credential verification for the admin panel
//!
//! ## Example Usage
//!
//! ```rust
//! use espetinho_core::money::Money;
//!
//! // Two skewers at R$ 12,50
//! let line = Money::from_cents(1250).multiply_quantity(2);
//! assert_eq!(line.cents(), 2500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category ids seeded by the initial migration, with their names.
///
/// The registry is fixed: products may only reference one of these.
pub const CATEGORIES: [(i64, &str); 3] = [(1, "ESPETOS"), (2, "BEBIDAS"), (3, "INSUMOS")];

/// Length of the trailing statistics window, in hours.
pub const STATISTICS_WINDOW_HOURS: i64 = 24;

/// Minimum product name length (after trimming).
pub const MIN_PRODUCT_NAME_LEN: usize = 2;

/// Minimum stock description length (after trimming).
pub const MIN_DESCRIPTION_LEN: usize = 3;

/// Maximum quantity of one product in a single order line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest accepted unit price, in cents (R$ 100.000,00).
pub const MAX_UNIT_PRICE_CENTS: i64 = 10_000_000;

/// Highest accepted order total, in cents.
///
/// Covers a full ticket of maximum lines with room to spare while keeping
/// every sum far from `i64` overflow.
pub const MAX_ORDER_TOTAL_CENTS: i64 = 1_000_000_000_000;
