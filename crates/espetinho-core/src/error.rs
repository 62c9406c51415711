//! # Error Types
//!
//! Domain-specific error types for espetinho-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  espetinho-core errors (this file)                                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  espetinho-db errors (separate crate)                                  │
//! │  └── DbError          - Database / transaction failures                │
//! │                                                                         │
//! │  apps/api errors                                                       │
//! │  └── ApiError         - What the admin panel sees (JSON)               │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → ApiError → Client                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any write reaches the database, so a rejected request
/// never leaves partial state behind.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is outside the accepted range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Decimal amount is not a finite number of cents.
    #[error("{field} is not a valid amount")]
    InvalidAmount { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Row is still referenced and cannot be removed.
    #[error("{entity} {id} is in use and cannot be removed")]
    InUse { entity: String, id: i64 },
}

impl ValidationError {
    /// Collapses several validation failures into one error.
    ///
    /// The admin panel shows one message per request, so the first failure
    /// wins. Returns `Ok(())` when the list is empty.
    pub fn first_of(errors: Vec<ValidationError>) -> Result<(), ValidationError> {
        match errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
