//! # Record Store Contracts
//!
//! The managers talk to storage only through these two traits, so they can
//! run against the SQLite [`Database`] or any other backend.
//!
//! ```text
//! ┌──────────────────────┐         ┌──────────────────────────────────┐
//! │ CustomerCollection   │────────►│ CustomerStore                    │
//! └──────────────────────┘         │  query_customers / count / find  │
//!                                  │  insert / update / delete        │
//! ┌──────────────────────┐         ├──────────────────────────────────┤
//! │ AddressCollection    │────────►│ AddressStore                     │
//! └──────────────────────┘         │  query / insert / update / delete│
//!                                  └───────────────┬──────────────────┘
//!                                                  │ impl for
//!                                                  ▼
//!                                  clientele_db::Database
//! ```
//!
//! Access control is the store's concern. The managers pass ids through
//! unchanged.

use async_trait::async_trait;
use clientele_core::{
    Address, AddressInput, Customer, CustomerFilter, CustomerInput, CustomerQuery, NewAddress,
};
use clientele_db::{Database, DbResult};

/// Customer table operations.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Rows matching the query's filter, in its order and page window.
    async fn query_customers(&self, query: &CustomerQuery) -> DbResult<Vec<Customer>>;

    /// Exact number of rows matching `filter`, ignoring paging.
    async fn count_customers(&self, filter: &CustomerFilter) -> DbResult<u64>;

    async fn insert_customer(&self, input: &CustomerInput) -> DbResult<Customer>;

    async fn update_customer(&self, id: &str, input: &CustomerInput) -> DbResult<Customer>;

    /// Fails with `DbError::NotFound` when no row was deleted.
    async fn delete_customer(&self, id: &str) -> DbResult<()>;

    async fn find_customer(&self, id: &str) -> DbResult<Option<Customer>>;
}

/// Address table operations.
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Every address of one customer, newest first.
    async fn query_addresses(&self, customer_id: &str) -> DbResult<Vec<Address>>;

    async fn insert_address(&self, address: &NewAddress) -> DbResult<Address>;

    /// Must never change the stored owner.
    async fn update_address(&self, id: &str, input: &AddressInput) -> DbResult<Address>;

    async fn delete_address(&self, id: &str) -> DbResult<()>;
}

// =============================================================================
// SQLite Implementation
// =============================================================================

#[async_trait]
impl CustomerStore for Database {
    async fn query_customers(&self, query: &CustomerQuery) -> DbResult<Vec<Customer>> {
        self.customers().list(query).await
    }

    async fn count_customers(&self, filter: &CustomerFilter) -> DbResult<u64> {
        self.customers().count(filter).await
    }

    async fn insert_customer(&self, input: &CustomerInput) -> DbResult<Customer> {
        self.customers().insert(input).await
    }

    async fn update_customer(&self, id: &str, input: &CustomerInput) -> DbResult<Customer> {
        self.customers().update(id, input).await
    }

    async fn delete_customer(&self, id: &str) -> DbResult<()> {
        self.customers().delete(id).await
    }

    async fn find_customer(&self, id: &str) -> DbResult<Option<Customer>> {
        self.customers().get_by_id(id).await
    }
}

#[async_trait]
impl AddressStore for Database {
    async fn query_addresses(&self, customer_id: &str) -> DbResult<Vec<Address>> {
        self.addresses().list_for_customer(customer_id).await
    }

    async fn insert_address(&self, address: &NewAddress) -> DbResult<Address> {
        self.addresses().insert(address).await
    }

    async fn update_address(&self, id: &str, input: &AddressInput) -> DbResult<Address> {
        self.addresses().update(id, input).await
    }

    async fn delete_address(&self, id: &str) -> DbResult<()> {
        self.addresses().delete(id).await
    }
}

// =============================================================================
// Test Doubles
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use clientele_db::{DbConfig, DbError};
    use tokio::sync::Notify;

    use super::*;

    /// In-memory database that can be told to fail, or to park the next
    /// call until the test releases it.
    pub struct TestStore {
        db: Database,
        failing: AtomicBool,
        failing_reads: AtomicBool,
        hold_next: AtomicBool,
        /// Signalled when a held call has started.
        pub entered: Notify,
        /// Lets a held call continue.
        pub release: Notify,
    }

    impl TestStore {
        pub async fn new() -> Arc<Self> {
            let db = Database::new(DbConfig::in_memory()).await.unwrap();
            Arc::new(TestStore {
                db,
                failing: AtomicBool::new(false),
                failing_reads: AtomicBool::new(false),
                hold_next: AtomicBool::new(false),
                entered: Notify::new(),
                release: Notify::new(),
            })
        }

        pub fn db(&self) -> &Database {
            &self.db
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Fails only queries and lookups; writes still go through.
        pub fn set_failing_reads(&self, failing: bool) {
            self.failing_reads.store(failing, Ordering::SeqCst);
        }

        pub fn hold_next_call(&self) {
            self.hold_next.store(true, Ordering::SeqCst);
        }

        async fn checkpoint(&self) -> DbResult<()> {
            if self.hold_next.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            if self.failing.load(Ordering::SeqCst) {
                return Err(DbError::QueryFailed("store offline".to_string()));
            }
            Ok(())
        }

        async fn read_checkpoint(&self) -> DbResult<()> {
            self.checkpoint().await?;
            if self.failing_reads.load(Ordering::SeqCst) {
                return Err(DbError::QueryFailed("read replica offline".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CustomerStore for TestStore {
        async fn query_customers(&self, query: &CustomerQuery) -> DbResult<Vec<Customer>> {
            self.read_checkpoint().await?;
            self.db.query_customers(query).await
        }

        async fn count_customers(&self, filter: &CustomerFilter) -> DbResult<u64> {
            self.read_checkpoint().await?;
            self.db.count_customers(filter).await
        }

        async fn insert_customer(&self, input: &CustomerInput) -> DbResult<Customer> {
            self.checkpoint().await?;
            self.db.insert_customer(input).await
        }

        async fn update_customer(&self, id: &str, input: &CustomerInput) -> DbResult<Customer> {
            self.checkpoint().await?;
            self.db.update_customer(id, input).await
        }

        async fn delete_customer(&self, id: &str) -> DbResult<()> {
            self.checkpoint().await?;
            self.db.delete_customer(id).await
        }

        async fn find_customer(&self, id: &str) -> DbResult<Option<Customer>> {
            self.read_checkpoint().await?;
            self.db.find_customer(id).await
        }
    }

    #[async_trait]
    impl AddressStore for TestStore {
        async fn query_addresses(&self, customer_id: &str) -> DbResult<Vec<Address>> {
            self.read_checkpoint().await?;
            self.db.query_addresses(customer_id).await
        }

        async fn insert_address(&self, address: &NewAddress) -> DbResult<Address> {
            self.checkpoint().await?;
            self.db.insert_address(address).await
        }

        async fn update_address(&self, id: &str, input: &AddressInput) -> DbResult<Address> {
            self.checkpoint().await?;
            self.db.update_address(id, input).await
        }

        async fn delete_address(&self, id: &str) -> DbResult<()> {
            self.checkpoint().await?;
            self.db.delete_address(id).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientele_core::PageRequest;
    use clientele_db::DbConfig;

    #[tokio::test]
    async fn test_database_implements_both_stores() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let customer = db
            .insert_customer(&CustomerInput::new("Asha", "Kulkarni").city("Pune"))
            .await
            .unwrap();
        let address = db
            .insert_address(&NewAddress::for_customer(
                &customer.id,
                &AddressInput::new("12 MG Road", "Pune", "Maharashtra", "411001"),
            ))
            .await
            .unwrap();

        let query = CustomerQuery::page(PageRequest::default(), CustomerFilter::all());
        assert_eq!(db.query_customers(&query).await.unwrap(), vec![customer.clone()]);
        assert_eq!(db.count_customers(&CustomerFilter::all()).await.unwrap(), 1);
        assert_eq!(db.query_addresses(&customer.id).await.unwrap(), vec![address]);

        db.delete_customer(&customer.id).await.unwrap();
        assert_eq!(db.find_customer(&customer.id).await.unwrap(), None);
        assert!(db.query_addresses(&customer.id).await.unwrap().is_empty());
    }
}
