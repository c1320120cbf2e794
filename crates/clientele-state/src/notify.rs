//! # Notifications
//!
//! The managers report every mutation outcome and every failed read through
//! an injected [`Notifier`]. Presentation code decides how to show them
//! (toast, status bar, log line).
//!
//! ## Notice Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CustomerCollection::delete("c-1")                                     │
//! │       │                                                                 │
//! │       ├── Ok  ──► notify(Success, "Customer deleted successfully")     │
//! │       │           then re-fetch                                         │
//! │       │                                                                 │
//! │       └── Err ──► notify(Error, "Failed to delete customer")           │
//! │                   then return the error to the caller                   │
//! │                                                                         │
//! │  Implementations:                                                      │
//! │  • TracingNotifier  logs notices (default)                             │
//! │  • ChannelNotifier  forwards notices to an mpsc receiver (UI bridge)   │
//! │  • NoOpNotifier     drops everything                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

use clientele_db::DbError;

use crate::error::{CollectionError, Operation};

/// Whether a notice reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    /// Creates a success notice titled "Success".
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    /// Creates an error notice titled "Error".
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    /// The error notice for a failed operation, e.g. "Failed to fetch customers".
    pub fn failed(operation: Operation) -> Self {
        Notice::error(format!("Failed to {}", operation))
    }

    /// The success notice for a completed mutation.
    ///
    /// Reads produce no success notice, so they return `None`.
    pub fn completed(operation: Operation) -> Option<Self> {
        let message = match operation {
            Operation::CreateCustomer => "Customer created successfully",
            Operation::UpdateCustomer => "Customer updated successfully",
            Operation::DeleteCustomer => "Customer deleted successfully",
            Operation::CreateAddress => "Address created successfully",
            Operation::UpdateAddress => "Address updated successfully",
            Operation::DeleteAddress => "Address deleted successfully",
            Operation::FetchCustomers
            | Operation::FetchCustomer
            | Operation::FetchAddresses
            | Operation::OpenDatabase => return None,
        };
        Some(Notice::success(message))
    }

    /// Returns true for error notices.
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

// =============================================================================
// Notifier Trait
// =============================================================================

/// Sink for user-facing notices. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Logs notices with `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => info!(title = %notice.title, "{}", notice.message),
            NoticeKind::Error => warn!(title = %notice.title, "{}", notice.message),
        }
    }
}

/// Drops every notice. For tests and headless tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _notice: Notice) {}
}

/// Forwards notices to an unbounded channel.
///
/// ## Usage
/// ```rust,ignore
/// let (notifier, mut notices) = ChannelNotifier::new();
/// let customers = CustomerCollection::new(store, Arc::new(notifier), settings);
///
/// tokio::spawn(async move {
///     while let Some(notice) = notices.recv().await {
///         show_toast(notice);
///     }
/// });
/// ```
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiver its notices arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        // Receiver gone means nobody is listening any more
        let _ = self.tx.send(notice);
    }
}

// =============================================================================
// Reporting Helpers
// =============================================================================

/// Logs and notifies a failed store call, returning the error for the caller.
pub(crate) fn report_failure<N>(notifier: &N, operation: Operation, source: DbError) -> CollectionError
where
    N: Notifier + ?Sized,
{
    warn!(%operation, error = %source, "Store operation failed");
    notifier.notify(Notice::failed(operation));
    CollectionError::store(operation, source)
}

/// Notifies a completed mutation. Reads are silent.
pub(crate) fn report_success<N>(notifier: &N, operation: Operation)
where
    N: Notifier + ?Sized,
{
    if let Some(notice) = Notice::completed(operation) {
        notifier.notify(notice);
    }
}
