//! # Customer Collection
//!
//! Owns the in-memory customer list: the current page of rows, the total
//! count for the active filter, and the derived page count.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Customer List Operations                             │
//! │                                                                         │
//! │  Presentation            Manager              List State Change         │
//! │  ────────────            ───────              ─────────────────         │
//! │                                                                         │
//! │  Open list / paginate ──► fetch(page, f) ───► items, count, pages,     │
//! │                                               last_query replaced       │
//! │                                                                         │
//! │  Submit create form ────► create(input) ────► (none, caller re-fetches) │
//! │                                                                         │
//! │  Submit edit form ──────► update(id, input) ► (none)                   │
//! │                                                                         │
//! │  Click delete ──────────► delete(id) ───────► fetch(last_query)        │
//! │                                                                         │
//! │  Open profile ──────────► get_by_id(id) ────► (none, read only)        │
//! │                                                                         │
//! │  NOTE: the list is never patched locally. After a delete it is          │
//! │        re-read from the store so count and pages stay exact.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overlapping Fetches
//! By default the response that arrives last is written, even if it belongs
//! to an older request. With `ListSettings::discard_stale_responses` each
//! fetch takes a sequence number and a response is dropped if a newer fetch
//! has started since.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use clientele_core::{
    total_pages, Customer, CustomerFilter, CustomerInput, CustomerQuery, PageInfo, PageRequest,
};

use crate::config::ListSettings;
use crate::error::{CollectionError, CollectionResult, Operation};
use crate::loading::LoadingTracker;
use crate::notify::{report_failure, report_success, Notifier};
use crate::store::CustomerStore;

// =============================================================================
// List State
// =============================================================================

/// The customer list as of the last successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomerListState {
    /// Current page, newest first.
    pub items: Vec<Customer>,

    /// Rows matching the filter across all pages.
    pub total_count: u64,

    /// `ceil(total_count / page_size)`, 0 for an empty result.
    pub total_pages: u64,

    /// The page and filter that produced `items`.
    pub last_query: Option<CustomerQuery>,
}

impl CustomerListState {
    /// Page metadata for the current list, once something was fetched.
    pub fn page_info(&self) -> Option<PageInfo> {
        let page = self.last_query.as_ref()?.page?;
        Some(PageInfo::new(page, self.total_count))
    }
}

/// Result of a point lookup.
///
/// Keeps "no such record" apart from "the store could not answer".
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    /// Already notified.
    Failed(CollectionError),
}

impl<T> Lookup<T> {
    /// The record, if found.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Lookup::Failed(_))
    }
}

// =============================================================================
// Customer Collection
// =============================================================================

/// Customer list manager.
///
/// ## Usage
/// ```rust,ignore
/// let customers = CustomerCollection::new(store, notifier, ListSettings::default());
///
/// customers
///     .fetch(PageRequest::new(1, 10)?, CustomerFilter::all().city("Pune"))
///     .await?;
///
/// let info = customers.page_info().await;
/// for customer in customers.items().await {
///     println!("{}", customer.full_name());
/// }
/// ```
pub struct CustomerCollection<S: ?Sized = dyn CustomerStore, N: ?Sized = dyn Notifier> {
    store: Arc<S>,
    notifier: Arc<N>,
    settings: ListSettings,
    state: RwLock<CustomerListState>,
    loading: LoadingTracker,
    fetch_seq: AtomicU64,
}

impl<S, N> CustomerCollection<S, N>
where
    S: CustomerStore + ?Sized,
    N: Notifier + ?Sized,
{
    /// Creates an empty collection. Nothing is fetched until `fetch` runs.
    pub fn new(store: Arc<S>, notifier: Arc<N>, settings: ListSettings) -> Self {
        CustomerCollection {
            store,
            notifier,
            settings,
            state: RwLock::new(CustomerListState::default()),
            loading: LoadingTracker::new(),
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Loads one page of customers matching `filter`, newest first.
    ///
    /// ## What This Does
    /// 1. Reads the page window (`LIMIT page_size OFFSET (page-1)*page_size`)
    /// 2. Counts every row matching `filter`
    /// 3. Replaces items, count, pages and `last_query` in one write
    ///
    /// On failure the previous list is left as it was, the user gets
    /// "Failed to fetch customers" and the error is returned.
    pub async fn fetch(&self, page: PageRequest, filter: CustomerFilter) -> CollectionResult<()> {
        let _loading = self.loading.begin();
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let query = CustomerQuery::page(page, filter);

        debug!(
            seq,
            page = page.page(),
            page_size = page.page_size(),
            filter = ?query.filter,
            "Fetching customers"
        );

        let items = self
            .store
            .query_customers(&query)
            .await
            .map_err(|e| report_failure(&*self.notifier, Operation::FetchCustomers, e))?;

        let total_count = self
            .store
            .count_customers(&query.filter)
            .await
            .map_err(|e| report_failure(&*self.notifier, Operation::FetchCustomers, e))?;

        let mut state = self.state.write().await;

        if self.settings.discard_stale_responses && self.fetch_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "Discarding stale customer page");
            return Ok(());
        }

        state.total_pages = total_pages(total_count, page.page_size());
        state.total_count = total_count;
        state.items = items;
        state.last_query = Some(query);

        debug!(
            rows = state.items.len(),
            total_count, "Customer page loaded"
        );
        Ok(())
    }

    /// Inserts a customer and returns it. The list is not touched.
    pub async fn create(&self, input: &CustomerInput) -> CollectionResult<Customer> {
        let _loading = self.loading.begin();

        let customer = self
            .store
            .insert_customer(input)
            .await
            .map_err(|e| report_failure(&*self.notifier, Operation::CreateCustomer, e))?;

        info!(id = %customer.id, "Customer created");
        report_success(&*self.notifier, Operation::CreateCustomer);
        Ok(customer)
    }

    /// Replaces a customer's editable fields and returns the stored row.
    pub async fn update(&self, id: &str, input: &CustomerInput) -> CollectionResult<Customer> {
        let _loading = self.loading.begin();

        let customer = self
            .store
            .update_customer(id, input)
            .await
            .map_err(|e| report_failure(&*self.notifier, Operation::UpdateCustomer, e))?;

        info!(id = %customer.id, "Customer updated");
        report_success(&*self.notifier, Operation::UpdateCustomer);
        Ok(customer)
    }

    /// Deletes a customer, then re-reads the last fetched page.
    ///
    /// Before any fetch the re-read uses page 1 at the configured page size
    /// with no filter. A re-read failure is reported by `fetch` itself and
    /// does not turn the completed delete into an error.
    ///
    /// ## Returns
    /// * `Err` with a not-found store error if `id` does not exist,
    ///   including a second delete of the same id
    pub async fn delete(&self, id: &str) -> CollectionResult<()> {
        let _loading = self.loading.begin();

        self.store
            .delete_customer(id)
            .await
            .map_err(|e| report_failure(&*self.notifier, Operation::DeleteCustomer, e))?;

        info!(id = %id, "Customer deleted");
        report_success(&*self.notifier, Operation::DeleteCustomer);

        let (page, filter) = self.refetch_target().await;
        if let Err(e) = self.fetch(page, filter).await {
            debug!(error = %e, "Re-fetch after delete failed");
        }
        Ok(())
    }

    /// Looks up one customer without touching the list.
    pub async fn get_by_id(&self, id: &str) -> Lookup<Customer> {
        match self.store.find_customer(id).await {
            Ok(Some(customer)) => Lookup::Found(customer),
            Ok(None) => {
                debug!(id = %id, "Customer not found");
                Lookup::NotFound
            }
            Err(e) => Lookup::Failed(report_failure(&*self.notifier, Operation::FetchCustomer, e)),
        }
    }

    async fn refetch_target(&self) -> (PageRequest, CustomerFilter) {
        let state = self.state.read().await;
        match &state.last_query {
            Some(query) => (
                query.page.unwrap_or_else(|| self.settings.first_page()),
                query.filter.clone(),
            ),
            None => (self.settings.first_page(), CustomerFilter::all()),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// A copy of the whole list state.
    pub async fn snapshot(&self) -> CustomerListState {
        self.state.read().await.clone()
    }

    pub async fn items(&self) -> Vec<Customer> {
        self.state.read().await.items.clone()
    }

    pub async fn page_info(&self) -> Option<PageInfo> {
        self.state.read().await.page_info()
    }

    /// True while any fetch or mutation is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
