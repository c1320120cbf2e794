//! # Validation Module
//!
//! Form rules for customer and address payloads.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  └── THIS MODULE: required fields, lengths, pincode format             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Collection managers (clientele-state)                        │
//! │  └── No validation; payloads are passed through                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use clientele_core::validation::{validate_address_input, validate_customer_input};
//! use clientele_core::{AddressInput, CustomerInput};
//!
//! validate_customer_input(&CustomerInput::new("Asha", "Kulkarni")).unwrap();
//!
//! let address = AddressInput::new("12 MG Road", "Pune", "Maharashtra", "411001");
//! validate_address_input(&address).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{AddressInput, CustomerInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const ADDRESS_LINE_MIN: usize = 5;
const ADDRESS_LINE_MAX: usize = 200;
const PLACE_NAME_MIN: usize = 2;
const PLACE_NAME_MAX: usize = 50;
const PINCODE_DIGITS: usize = 6;
const SEARCH_QUERY_MAX: usize = 100;

// =============================================================================
// Field Validators
// =============================================================================

/// Checks that `value` is non-blank and its trimmed length is within bounds.
fn validate_text(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    let len = value.chars().count();

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a pincode.
///
/// ## Rules
/// - Must not be empty
/// - Exactly 6 ASCII digits
///
/// ## Example
/// ```rust
/// use clientele_core::validation::validate_pincode;
///
/// assert!(validate_pincode("411001").is_ok());
/// assert!(validate_pincode("41100").is_err());
/// assert!(validate_pincode("4110O1").is_err());
/// ```
pub fn validate_pincode(pincode: &str) -> ValidationResult<()> {
    let pincode = pincode.trim();

    if pincode.is_empty() {
        return Err(ValidationError::required("pincode"));
    }

    if pincode.len() != PINCODE_DIGITS || !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: format!("must be exactly {} digits", PINCODE_DIGITS),
        });
    }

    Ok(())
}

/// Validates a free-text search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > SEARCH_QUERY_MAX {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: SEARCH_QUERY_MAX,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a customer form payload.
///
/// Only the names are required. Phone, city, state and pincode are free
/// text on the customer form.
pub fn validate_customer_input(input: &CustomerInput) -> ValidationResult<()> {
    if input.first_name.trim().is_empty() {
        return Err(ValidationError::required("first_name"));
    }

    if input.last_name.trim().is_empty() {
        return Err(ValidationError::required("last_name"));
    }

    Ok(())
}

/// Validates an address form payload.
///
/// ## Rules
/// ```text
/// address_line   required, 5..=200 chars
/// city           required, 2..=50 chars
/// state          required, 2..=50 chars
/// pincode        required, exactly 6 digits
/// ```
///
/// The payload's `customer_id` is not checked; the manager overrides it.
pub fn validate_address_input(input: &AddressInput) -> ValidationResult<()> {
    validate_text(
        "address_line",
        &input.address_line,
        ADDRESS_LINE_MIN,
        ADDRESS_LINE_MAX,
    )?;
    validate_text("city", &input.city, PLACE_NAME_MIN, PLACE_NAME_MAX)?;
    validate_text("state", &input.state, PLACE_NAME_MIN, PLACE_NAME_MAX)?;
    validate_pincode(&input.pincode)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_address() -> AddressInput {
        AddressInput::new("12 MG Road", "Pune", "Maharashtra", "411001")
    }

    #[test]
    fn test_customer_names_required() {
        assert!(validate_customer_input(&CustomerInput::new("A", "B")).is_ok());

        assert_eq!(
            validate_customer_input(&CustomerInput::new("  ", "B")),
            Err(ValidationError::required("first_name"))
        );
        assert_eq!(
            validate_customer_input(&CustomerInput::new("A", "")),
            Err(ValidationError::required("last_name"))
        );
    }

    #[test]
    fn test_valid_address() {
        assert!(validate_address_input(&valid_address()).is_ok());
    }

    #[test]
    fn test_address_line_bounds() {
        let mut input = valid_address();
        input.address_line = "Flat".to_string();
        assert!(matches!(
            validate_address_input(&input),
            Err(ValidationError::TooShort { min: 5, .. })
        ));

        input.address_line = "x".repeat(201);
        assert!(matches!(
            validate_address_input(&input),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_city_and_state_bounds() {
        let mut input = valid_address();
        input.city = "P".to_string();
        assert!(matches!(
            validate_address_input(&input),
            Err(ValidationError::TooShort { ref field, .. }) if field == "city"
        ));

        let mut input = valid_address();
        input.state = String::new();
        assert_eq!(
            validate_address_input(&input),
            Err(ValidationError::required("state"))
        );
    }

    #[test]
    fn test_pincode_format() {
        assert!(validate_pincode("560001").is_ok());
        assert!(validate_pincode(" 560001 ").is_ok());
        assert_eq!(validate_pincode(""), Err(ValidationError::required("pincode")));
        assert!(validate_pincode("5600011").is_err());
        assert!(validate_pincode("56OO01").is_err());
        // Non-ASCII digits are rejected
        assert!(validate_pincode("५६०००१").is_err());
    }

    #[test]
    fn test_search_query() {
        assert_eq!(validate_search_query("  asha ").unwrap(), "asha");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }
}
