//! # Collection Error Types
//!
//! Errors returned by the collection managers and the session bootstrap.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Collection Error Categories                          │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │  Store                       │   │  Configuration               │   │
//! │  │                              │   │                              │   │
//! │  │  operation: DeleteCustomer   │   │  InvalidConfig               │   │
//! │  │  source:    DbError          │   │  ConfigLoadFailed            │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  Store errors have already been shown to the user through the          │
//! │  Notifier by the time the caller sees them.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use clientele_db::DbError;
use thiserror::Error;

/// Result type alias for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// The manager operation a store failure belongs to.
///
/// `Display` gives the phrase used in "Failed to ..." notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchCustomers,
    FetchCustomer,
    CreateCustomer,
    UpdateCustomer,
    DeleteCustomer,
    FetchAddresses,
    CreateAddress,
    UpdateAddress,
    DeleteAddress,
    OpenDatabase,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            Operation::FetchCustomers => "fetch customers",
            Operation::FetchCustomer => "fetch customer",
            Operation::CreateCustomer => "create customer",
            Operation::UpdateCustomer => "update customer",
            Operation::DeleteCustomer => "delete customer",
            Operation::FetchAddresses => "fetch addresses",
            Operation::CreateAddress => "create address",
            Operation::UpdateAddress => "update address",
            Operation::DeleteAddress => "delete address",
            Operation::OpenDatabase => "open database",
        };
        f.write_str(phrase)
    }
}

/// Errors surfaced by the collection managers.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The record store rejected or failed an operation.
    ///
    /// ## When This Occurs
    /// - Store unreachable or closed
    /// - Update or delete of a missing id (`DbError::NotFound`)
    /// - Address insert for a customer that does not exist
    #[error("Failed to {operation}: {source}")]
    Store {
        operation: Operation,
        #[source]
        source: DbError,
    },

    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

impl CollectionError {
    /// Wraps a store error with the operation that produced it.
    pub fn store(operation: Operation, source: DbError) -> Self {
        CollectionError::Store { operation, source }
    }

    /// Returns the failed operation for store errors.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            CollectionError::Store { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Returns true if the store reported that the record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CollectionError::Store { source, .. } if source.is_not_found())
    }
}

impl From<std::io::Error> for CollectionError {
    fn from(err: std::io::Error) -> Self {
        CollectionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CollectionError {
    fn from(err: toml::de::Error) -> Self {
        CollectionError::ConfigLoadFailed(err.to_string())
    }
}
