//! # Error Types
//!
//! Domain-specific error types for clientele-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  clientele-core errors (this file)                                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  clientele-db errors (separate crate)                                  │
//! │  └── DbError          - Record store failures                          │
//! │                                                                         │
//! │  clientele-state errors (separate crate)                               │
//! │  └── CollectionError  - What presentation code sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → presentation     (form rules)                 │
//! │        DbError → CollectionError          (store failures)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Presentation code checks them before calling into the managers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a pincode with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
