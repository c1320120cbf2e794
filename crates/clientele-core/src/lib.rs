//! # clientele-core: Pure Domain Logic for Clientele
//!
//! Types and rules shared by the record store and the collection managers.
//! Nothing in here touches a database, a socket or a file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Clientele Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Presentation (forms, tables, toasts)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          clientele-state (collection managers)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ clientele-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ pagination │  │  filter   │  │validation │  │   │
//! │  │   │ Customer  │  │PageRequest │  │ Customer- │  │  form     │  │   │
//! │  │   │ Address   │  │ PageInfo   │  │  Filter   │  │  rules    │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 clientele-db (SQLite record store)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records and form payloads
//! - [`filter`] - Customer list filter criteria
//! - [`pagination`] - Page windows and derived page metadata
//! - [`error`] - Domain error types
//! - [`validation`] - Form rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use clientele_core::pagination::{PageInfo, PageRequest};
//!
//! let request = PageRequest::new(2, 10).unwrap();
//! assert_eq!(request.offset(), 10);
//!
//! let info = PageInfo::new(request, 23);
//! assert_eq!(info.total_pages, 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod pagination;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use filter::{CustomerFilter, CustomerQuery, SortOrder};
pub use pagination::{total_pages, PageInfo, PageRequest};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when the caller has not chosen one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest `list.page_size` a configuration file may set.
///
/// Only the configured default is capped; a [`PageRequest`] built by the
/// caller accepts any non-zero size.
pub const MAX_PAGE_SIZE: u32 = 100;
