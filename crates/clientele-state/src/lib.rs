//! # clientele-state: Collection Managers for Clientele
//!
//! In-memory list state for customers and addresses, kept in step with the
//! record store by re-reading after every mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Clientele Data Flow                              │
//! │                                                                         │
//! │  UI event (page click, form submit, delete button)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  clientele-state (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │  CustomerCollection          AddressCollection                  │   │
//! │  │  items, total_count,         items, customer_id                 │   │
//! │  │  total_pages, last_query                                        │   │
//! │  │       │                           │                             │   │
//! │  │       ├── Notifier ◄──────────────┤   success / error notices   │   │
//! │  │       ▼                           ▼                             │   │
//! │  │  CustomerStore               AddressStore                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  clientele-db (SQLite)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`customers`] - Paginated, filtered customer list
//! - [`addresses`] - One customer's address list
//! - [`store`] - Store traits and their SQLite implementation
//! - [`notify`] - Notices and notifier implementations
//! - [`loading`] - In-flight tracking behind `is_loading()`
//! - [`config`] - TOML + environment configuration
//! - [`session`] - Opens the database and builds both managers
//! - [`error`] - Collection error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use clientele_state::{Clientele, ClienteleConfig, TracingNotifier};
//! use clientele_core::{CustomerFilter, PageRequest};
//!
//! let config = ClienteleConfig::load(None)?;
//! let session = Clientele::open(config, Arc::new(TracingNotifier)).await?;
//!
//! session
//!     .customers()
//!     .fetch(PageRequest::new(1, 10)?, CustomerFilter::all().city("Pune"))
//!     .await?;
//! println!("{} customers", session.customers().snapshot().await.total_count);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod addresses;
pub mod config;
pub mod customers;
pub mod error;
pub mod loading;
pub mod notify;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use addresses::{AddressCollection, AddressListState};
pub use config::{ClienteleConfig, DatabaseSettings, ListSettings};
pub use customers::{CustomerCollection, CustomerListState, Lookup};
pub use error::{CollectionError, CollectionResult, Operation};
pub use notify::{ChannelNotifier, NoOpNotifier, Notice, NoticeKind, Notifier, TracingNotifier};
pub use session::Clientele;
pub use store::{AddressStore, CustomerStore};
