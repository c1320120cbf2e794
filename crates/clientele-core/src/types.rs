//! # Domain Types
//!
//! Records held by the store and the form payloads that create or change them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐          1 : N          ┌─────────────────┐       │
//! │  │    Customer     │ ◄────────────────────── │     Address     │       │
//! │  │  ─────────────  │                         │  ─────────────  │       │
//! │  │  id (UUID)      │                         │  id (UUID)      │       │
//! │  │  first_name     │                         │  customer_id FK │       │
//! │  │  last_name      │                         │  address_line   │       │
//! │  │  phone?         │                         │  city           │       │
//! │  │  city? state?   │                         │  state          │       │
//! │  │  pincode?       │                         │  pincode        │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  Form payloads:  CustomerInput ──insert/update──► Customer              │
//! │                  AddressInput ──NewAddress──────► Address               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Store-Assigned Fields
//! `id`, `created_at` and `updated_at` are always assigned by the store.
//! Payload types never carry them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Customer
// =============================================================================

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    /// Unique identifier (UUID v4), assigned by the store.
    pub id: String,

    /// Required, non-empty.
    pub first_name: String,

    /// Required, non-empty.
    pub last_name: String,

    pub phone: Option<String>,

    pub city: Option<String>,

    pub state: Option<String>,

    /// Free text at this layer; format rules live in [`crate::validation`].
    pub pincode: Option<String>,

    /// When the customer was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the customer was last updated. Never earlier than `created_at`.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Returns "first last", as shown in the customer table.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Customer form payload, used for both create and update.
///
/// An update replaces the whole editable field set, so optional fields left
/// as `None` are cleared in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
}

impl CustomerInput {
    /// Creates a payload with just the required name fields.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        CustomerInput {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    /// Sets the city.
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the state.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the pincode.
    pub fn pincode(mut self, pincode: impl Into<String>) -> Self {
        self.pincode = Some(pincode.into());
        self
    }

    /// Sets the phone number.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl From<&Customer> for CustomerInput {
    /// Pre-fills an edit form from an existing record.
    fn from(customer: &Customer) -> Self {
        CustomerInput {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            phone: customer.phone.clone(),
            city: customer.city.clone(),
            state: customer.state.clone(),
            pincode: customer.pincode.clone(),
        }
    }
}

// =============================================================================
// Address
// =============================================================================

/// An address belonging to exactly one customer.
///
/// ## Invariant
/// `customer_id` never changes after insert. Deleting the customer deletes
/// its addresses in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Address {
    pub id: String,
    pub customer_id: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Address form payload.
///
/// ## Ownership
/// `customer_id` is accepted so that untrusted payloads deserialize, but it
/// is never written to the store: inserts take the owner from
/// [`NewAddress::for_customer`], updates never touch the owner column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddressInput {
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub customer_id: Option<String>,
}

impl AddressInput {
    /// Creates a payload with no owner field.
    pub fn new(
        address_line: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        AddressInput {
            address_line: address_line.into(),
            city: city.into(),
            state: state.into(),
            pincode: pincode.into(),
            customer_id: None,
        }
    }
}

/// The row handed to the store when inserting an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAddress {
    pub customer_id: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl NewAddress {
    /// Builds an insert row owned by `customer_id`.
    ///
    /// Whatever `customer_id` the payload carries is discarded.
    pub fn for_customer(customer_id: impl Into<String>, input: &AddressInput) -> Self {
        NewAddress {
            customer_id: customer_id.into(),
            address_line: input.address_line.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            pincode: input.pincode.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_customer() -> Customer {
        let now = Utc::now();
        Customer {
            id: "c-1".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Kulkarni".to_string(),
            phone: Some("9820012345".to_string()),
            city: Some("Pune".to_string()),
            state: Some("Maharashtra".to_string()),
            pincode: Some("411001".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample_customer().full_name(), "Asha Kulkarni");
    }

    #[test]
    fn test_input_from_customer_prefills_form() {
        let customer = sample_customer();
        let input = CustomerInput::from(&customer);

        assert_eq!(input.first_name, "Asha");
        assert_eq!(input.city.as_deref(), Some("Pune"));
        assert_eq!(input.pincode.as_deref(), Some("411001"));
    }

    #[test]
    fn test_new_address_overrides_payload_owner() {
        let payload: AddressInput = serde_json::from_str(
            r#"{
                "address_line": "12 MG Road",
                "city": "Pune",
                "state": "Maharashtra",
                "pincode": "411001",
                "customer_id": "someone-else"
            }"#,
        )
        .unwrap();

        let row = NewAddress::for_customer("owner-1", &payload);

        assert_eq!(row.customer_id, "owner-1");
        assert_eq!(row.address_line, "12 MG Road");
    }

    #[test]
    fn test_customer_input_optional_fields_default() {
        let input: CustomerInput =
            serde_json::from_str(r#"{"first_name": "A", "last_name": "B"}"#).unwrap();

        assert_eq!(input, CustomerInput::new("A", "B"));
    }
}
