//! # Domain Types
//!
//! Core domain types used throughout Espetinho.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐  1:1  ┌──────────────┐   N:1  ┌──────────────┐       │
//! │  │   Product    │──────►│  StockItem   │───────►│   Category   │       │
//! │  │  unit_price  │       │  available   │        │ 1 ESPETOS    │       │
//! │  └──────▲───────┘       └──────────────┘        │ 2 BEBIDAS    │       │
//! │         │ product_id                            │ 3 INSUMOS    │       │
//! │  ┌──────┴───────┐  N:1  ┌──────────────┐  N:0..1┌──────────────┐       │
//! │  │  OrderItem   │──────►│    Order     │───────►│   Customer   │       │
//! │  │  price snap  │       │ status/total │        │ phone (key)  │       │
//! │  └──────────────┘       └──────────────┘        └──────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Row types derive `sqlx::FromRow` behind the `sqlx` feature so the
//! database crate can decode them directly. Input types (`NewProduct`,
//! `NewOrder`, ...) carry their own `validate()`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{self, ValidationResult};
use crate::{MAX_ORDER_TOTAL_CENTS, STATISTICS_WINDOW_HOURS};

// =============================================================================
// Category
// =============================================================================

/// A product category from the fixed registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    /// Unique name (ESPETOS, BEBIDAS, INSUMOS).
    pub name: String,
    pub description: Option<String>,
}

/// A category with the products filed under it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryWithProducts {
    pub category: Category,
    pub products: Vec<ProductDetails>,
}

// =============================================================================
// Stock Item
// =============================================================================

/// An inventory row. Every product owns exactly one.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StockItem {
    pub id: i64,
    pub description: String,
    pub category_id: i64,
    #[ts(as = "String")]
    pub registered_at: DateTime<Utc>,
    pub available: bool,
}

/// Stock row joined with its category name.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StockItemDetails {
    pub id: i64,
    pub description: String,
    pub category_id: i64,
    pub category: String,
    #[ts(as = "String")]
    pub registered_at: DateTime<Utc>,
    pub available: bool,
}

/// Fields of a standalone stock row (create and update).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockInput {
    pub description: String,
    pub category_id: i64,
    pub available: bool,
}

impl StockInput {
    /// Checks description length and category membership.
    pub fn validate(&self) -> ValidationResult<()> {
        ValidationError::first_of(
            [
                validation::validate_description("description", &self.description),
                validation::validate_category_id(self.category_id),
            ]
            .into_iter()
            .filter_map(Result::err)
            .collect(),
        )
    }
}

// =============================================================================
// Product
// =============================================================================

/// A sellable menu item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Current price in cents. Orders snapshot it; changing it never
    /// rewrites past orders.
    pub unit_price_cents: i64,
    /// The stock row this product owns.
    pub stock_id: i64,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

/// Product joined with its stock row and category, as listed in the panel.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductDetails {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit_price_cents: i64,
    pub stock_id: i64,
    pub category_id: i64,
    pub category: String,
    pub available: bool,
    #[ts(as = "String")]
    pub registered_at: DateTime<Utc>,
}

/// Input for creating a product together with its stock row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub unit_price: Money,
    pub category_id: i64,
    pub available: bool,
}

impl NewProduct {
    /// Name of at least two characters, positive price, known category.
    pub fn validate(&self) -> ValidationResult<()> {
        ValidationError::first_of(
            [
                validation::validate_product_name(&self.name),
                validation::validate_unit_price(self.unit_price),
                validation::validate_category_id(self.category_id),
            ]
            .into_iter()
            .filter_map(Result::err)
            .collect(),
        )
    }
}

/// Input for updating a product's price and its stock row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductUpdate {
    pub unit_price: Money,
    /// Written to the stock row.
    pub description: String,
    pub category_id: i64,
    pub available: bool,
}

impl ProductUpdate {
    /// Positive price, description of at least three characters, known category.
    pub fn validate(&self) -> ValidationResult<()> {
        ValidationError::first_of(
            [
                validation::validate_unit_price(self.unit_price),
                validation::validate_description("description", &self.description),
                validation::validate_category_id(self.category_id),
            ]
            .into_iter()
            .filter_map(Result::err)
            .collect(),
        )
    }
}

/// Identifiers produced by creating a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatedProduct {
    pub product_id: i64,
    pub stock_id: i64,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer, identified in practice by phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of an order.
///
/// ## Nominal Flow
/// ```text
/// PENDING ──► PREPARING ──► READY ──► DELIVERED
///    │            │           │
///    └────────────┴───────────┴──────► CANCELED
/// ```
/// The flow is advisory: any status may be written from any other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    /// Wire and storage name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    /// Name used by the legacy admin panel.
    const fn legacy_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDENTE",
            OrderStatus::Preparing => "PREPARANDO",
            OrderStatus::Ready => "PRONTO",
            OrderStatus::Delivered => "ENTREGUE",
            OrderStatus::Canceled => "CANCELADO",
        }
    }

    /// DELIVERED and CANCELED end the lifecycle.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Canceled)
    }

    /// Whether `next` follows the nominal kitchen flow from `self`.
    ///
    /// ```rust
    /// use espetinho_core::OrderStatus;
    ///
    /// assert!(OrderStatus::Pending.is_nominal_transition(OrderStatus::Preparing));
    /// assert!(!OrderStatus::Pending.is_nominal_transition(OrderStatus::Delivered));
    /// ```
    pub fn is_nominal_transition(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (_, _) if self.is_terminal() => false,
            (_, Canceled) => true,
            (Pending, Preparing) | (Preparing, Ready) | (Ready, Delivered) => true,
            _ => false,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the English names and the legacy Portuguese ones, ignoring case
/// and surrounding whitespace.
impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted || status.legacy_name() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL
                    .iter()
                    .map(|status| status.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order as stored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_cents: i64,
    /// Absent when the order was placed while customer lookup failed.
    pub customer_id: Option<i64>,
}

impl Order {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Order joined with its customer's name and phone.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderSummary {
    pub id: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

/// One of a customer's orders, with its number of line items.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CustomerOrder {
    pub id: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub item_count: i64,
}

// =============================================================================
// Order Item
// =============================================================================

/// A line in an order.
/// Uses the snapshot pattern: the unit price is frozen at order time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl OrderItem {
    /// Returns the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

/// Order line joined with the product's current name and description.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItemDetails {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub product_name: String,
    pub product_description: Option<String>,
}

/// An order with its customer and every line item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderWithItems {
    pub order: OrderSummary,
    pub items: Vec<OrderItemDetails>,
}

/// A requested order line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i64,
    /// Price the customer saw; stored as the line's snapshot.
    pub unit_price: Money,
}

/// An order as submitted from the menu site.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone: String,
    pub items: Vec<NewOrderItem>,
    pub total: Money,
}

impl NewOrder {
    /// Name and phone required; total, quantities and prices within range.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors: Vec<ValidationError> = [
            validation::validate_required("customer_name", &self.customer_name),
            validation::validate_required("phone", &self.phone),
            validation::validate_order_total(self.total),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        for item in &self.items {
            errors.extend(validation::validate_quantity(item.quantity).err());
            errors.extend(validation::validate_unit_price(item.unit_price).err());
        }

        ValidationError::first_of(errors)
    }

    /// Sum of the line totals. The submitted `total` is stored as sent.
    ///
    /// Fails instead of wrapping when a line or the sum overflows.
    pub fn items_total(&self) -> ValidationResult<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(), |sum, item| {
                item.unit_price
                    .checked_multiply_quantity(item.quantity)
                    .and_then(|line| sum.checked_add(line))
            })
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "total".to_string(),
                min: 1,
                max: MAX_ORDER_TOTAL_CENTS,
            })
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Order count and revenue over the trailing window.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Statistics {
    pub order_count: i64,
    pub revenue: Money,
    #[ts(as = "String")]
    pub window_start: DateTime<Utc>,
    #[ts(as = "String")]
    pub computed_at: DateTime<Utc>,
}

impl Statistics {
    /// Lower bound of the window ending at `now`.
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use espetinho_core::Statistics;
    ///
    /// let now = Utc.with_ymd_and_hms(2025, 7, 24, 20, 0, 0).unwrap();
    /// let start = Statistics::window_start(now);
    /// assert_eq!(start, Utc.with_ymd_and_hms(2025, 7, 23, 20, 0, 0).unwrap());
    /// ```
    pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::hours(STATISTICS_WINDOW_HOURS)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
