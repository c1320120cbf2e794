//! # Repository Module
//!
//! Table-level access for the two record tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CustomerCollection / AddressCollection (clientele-state)              │
//! │       │                                                                 │
//! │       │  db.customers().list(&query)                                   │
//! │       ▼                                                                 │
//! │  CustomerRepository                  AddressRepository                  │
//! │  ├── list(query)                     ├── list_for_customer(id)         │
//! │  ├── count(filter)                   ├── get_by_id(id)                 │
//! │  ├── get_by_id(id)                   ├── insert(new_address)           │
//! │  ├── insert(input)                   ├── update(id, input)             │
//! │  ├── update(id, input)               ├── delete(id)                    │
//! │  └── delete(id)                      └── count_for_customer(id)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Filtered, paginated customer CRUD
//! - [`AddressRepository`](address::AddressRepository) - Per-customer address CRUD

pub mod address;
pub mod customer;

use uuid::Uuid;

/// Generates a store-assigned record id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
