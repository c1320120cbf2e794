//! # clientele-db: Record Store for Clientele
//!
//! SQLite access for customers and their addresses, using sqlx for async
//! operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Clientele Data Flow                              │
//! │                                                                         │
//! │  CustomerCollection::fetch(page, filter)    (clientele-state)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   clientele-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ CustomerRepo   │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │◄───│ AddressRepo    │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (clientele.db)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Customer and address repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clientele_core::{CustomerFilter, CustomerQuery, PageRequest};
//! use clientele_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("clientele.db")).await?;
//!
//! let filter = CustomerFilter::all().city("Pune");
//! let rows = db
//!     .customers()
//!     .list(&CustomerQuery::page(PageRequest::new(1, 10)?, filter.clone()))
//!     .await?;
//! let total = db.customers().count(&filter).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::address::AddressRepository;
pub use repository::customer::CustomerRepository;
