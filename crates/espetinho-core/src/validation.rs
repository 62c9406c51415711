//! # Validation Module
//!
//! Business rule checks run before any write touches the database.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Admin panel / menu site (JavaScript)                         │
//! │  └── Empty fields, immediate feedback                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: apps/api (axum)                                              │
//! │  ├── Deserialization (types, decimal → cents)                          │
//! │  └── THIS MODULE via NewProduct::validate, NewOrder::validate, ...     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  ├── CHECK (unit_price_cents > 0)                                      │
//! │  └── Foreign keys                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use espetinho_core::validation::{validate_category_id, validate_product_name};
//!
//! validate_product_name("Picanha").unwrap();
//! assert!(validate_category_id(4).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::OrderStatus;
use crate::{
    CATEGORIES, MAX_ITEM_QUANTITY, MAX_ORDER_TOTAL_CENTS, MAX_UNIT_PRICE_CENTS,
    MIN_DESCRIPTION_LEN, MIN_PRODUCT_NAME_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a field is present and not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At least two characters after trimming
///
/// ```rust
/// use espetinho_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Kafta").is_ok());
/// assert!(validate_product_name(" X ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_min_len("name", name, MIN_PRODUCT_NAME_LEN)
}

/// Validates a stock description (at least three characters after trimming).
pub fn validate_description(field: &str, text: &str) -> ValidationResult<()> {
    validate_min_len(field, text, MIN_DESCRIPTION_LEN)
}

fn validate_min_len(field: &str, value: &str, min: usize) -> ValidationResult<()> {
    validate_required(field, value)?;

    // Character count, so "Açaí" counts as four
    if value.trim().chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Converts a decimal amount received from a client into cents.
///
/// NaN, infinities and amounts too large for a cent count are rejected
/// instead of being clamped.
///
/// ```rust
/// use espetinho_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("unit_price", 12.5).unwrap().cents(), 1250);
/// assert!(parse_amount("unit_price", f64::INFINITY).is_err());
/// ```
pub fn parse_amount(field: &str, amount: f64) -> ValidationResult<Money> {
    Money::try_from_decimal(amount).ok_or_else(|| ValidationError::InvalidAmount {
        field: field.to_string(),
    })
}

/// Validates a unit price.
///
/// ## Rules
/// - Greater than zero
/// - At most `MAX_UNIT_PRICE_CENTS`
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }

    if price.cents() > MAX_UNIT_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 1,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates an order total.
pub fn validate_order_total(total: Money) -> ValidationResult<()> {
    if !total.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "total".to_string(),
        });
    }

    if total.cents() > MAX_ORDER_TOTAL_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "total".to_string(),
            min: 1,
            max: MAX_ORDER_TOTAL_CENTS,
        });
    }

    Ok(())
}

/// Validates an order line quantity.
///
/// ```rust
/// use espetinho_core::validation::validate_quantity;
///
/// assert!(validate_quantity(3).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(1_000).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates that a category id belongs to the fixed registry.
pub fn validate_category_id(id: i64) -> ValidationResult<()> {
    if CATEGORIES.iter().any(|(category_id, _)| *category_id == id) {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: "category_id".to_string(),
        allowed: CATEGORIES.iter().map(|(id, _)| id.to_string()).collect(),
    })
}

// =============================================================================
// Enum Validators
// =============================================================================

/// Parses a status string sent by a client.
///
/// Any known status is accepted regardless of the current one.
pub fn parse_order_status(value: &str) -> ValidationResult<OrderStatus> {
    value.parse()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("phone", "5561999999999").is_ok());
        assert!(validate_required("phone", "").is_err());
        assert!(validate_required("phone", "   ").is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Picanha").is_ok());
        assert!(validate_product_name("Pão").is_ok());
        assert!(validate_product_name("Ab").is_ok());
        assert!(matches!(
            validate_product_name("A"),
            Err(ValidationError::TooShort { min: 2, .. })
        ));
        assert!(matches!(
            validate_product_name(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_description_counts_characters() {
        assert!(validate_description("description", "Açaí").is_ok());
        assert!(validate_description("description", "Chá").is_ok());
        assert!(validate_description("description", " ab ").is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_cents(1)).is_ok());
        assert!(validate_unit_price(Money::zero()).is_err());
        assert!(validate_unit_price(Money::from_cents(-500)).is_err());
        assert!(validate_unit_price(Money::from_cents(MAX_UNIT_PRICE_CENTS)).is_ok());
        assert!(matches!(
            validate_unit_price(Money::from_cents(MAX_UNIT_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_amount_rejects_non_finite() {
        assert_eq!(parse_amount("unit_price", 15.0).unwrap().cents(), 1500);
        for amount in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 1e300, -1e300] {
            assert!(matches!(
                parse_amount("unit_price", amount),
                Err(ValidationError::InvalidAmount { .. })
            ));
        }
    }

    #[test]
    fn test_validate_order_total() {
        assert!(validate_order_total(Money::from_cents(2500)).is_ok());
        assert!(validate_order_total(Money::zero()).is_err());
        assert!(validate_order_total(Money::from_cents(MAX_ORDER_TOTAL_CENTS + 1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(matches!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(ValidationError::OutOfRange { max: 999, .. })
        ));
        assert!(validate_quantity(4_611_686_018_427_387_903).is_err());
    }

    #[test]
    fn test_validate_category_id() {
        for (id, _) in CATEGORIES {
            assert!(validate_category_id(id).is_ok());
        }
        assert!(validate_category_id(0).is_err());
        assert!(validate_category_id(4).is_err());
    }

    #[test]
    fn test_parse_order_status() {
        assert_eq!(parse_order_status("DELIVERED").unwrap(), OrderStatus::Delivered);
        assert_eq!(parse_order_status("preparando").unwrap(), OrderStatus::Preparing);
        assert!(parse_order_status("LOST").is_err());
        assert!(parse_order_status("").is_err());
    }
}
