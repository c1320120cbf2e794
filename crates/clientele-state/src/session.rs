//! # Session Bootstrap
//!
//! Opens the record store and builds both collection managers around it.
//!
//! ```text
//! ClienteleConfig ──► Clientele::open(config, notifier)
//!                          │
//!                          ├── Database::new(config.database)   pool + migrations
//!                          │
//!                          ├── customers: CustomerCollection ─┐
//!                          └── addresses: AddressCollection ──┴── share Arc<Database>
//!                                                                 and the notifier
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clientele_db::Database;
use tracing::info;

use crate::addresses::AddressCollection;
use crate::config::ClienteleConfig;
use crate::customers::CustomerCollection;
use crate::error::{CollectionError, CollectionResult, Operation};
use crate::notify::Notifier;

/// Both managers over one SQLite database.
pub struct Clientele {
    db: Arc<Database>,
    config: ClienteleConfig,
    customers: CustomerCollection<Database>,
    addresses: AddressCollection<Database>,
}

impl Clientele {
    /// Opens (creating if needed) the configured database and runs migrations.
    pub async fn open(config: ClienteleConfig, notifier: Arc<dyn Notifier>) -> CollectionResult<Self> {
        config.validate()?;

        info!(path = %config.database.path.display(), "Opening clientele session");

        let db = Database::new(config.database.to_db_config())
            .await
            .map_err(|e| CollectionError::store(Operation::OpenDatabase, e))?;

        Ok(Self::with_database(db, config, notifier))
    }

    /// A session over a fresh in-memory database.
    pub async fn in_memory(notifier: Arc<dyn Notifier>) -> CollectionResult<Self> {
        let mut config = ClienteleConfig::default();
        config.database.path = PathBuf::from(":memory:");
        Self::open(config, notifier).await
    }

    /// Builds the managers around an already open database.
    pub fn with_database(db: Database, config: ClienteleConfig, notifier: Arc<dyn Notifier>) -> Self {
        let db = Arc::new(db);

        Clientele {
            customers: CustomerCollection::new(db.clone(), notifier.clone(), config.list),
            addresses: AddressCollection::new(db.clone(), notifier, config.list),
            db,
            config,
        }
    }

    pub fn customers(&self) -> &CustomerCollection<Database> {
        &self.customers
    }

    pub fn addresses(&self) -> &AddressCollection<Database> {
        &self.addresses
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn config(&self) -> &ClienteleConfig {
        &self.config
    }

    /// Closes the connection pool. Later store calls fail.
    pub async fn close(&self) {
        self.db.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{ChannelNotifier, NoOpNotifier};
    use clientele_core::{AddressInput, CustomerFilter, CustomerInput, PageRequest};

    #[tokio::test]
    async fn test_in_memory_session_end_to_end() {
        let (notifier, mut notices) = ChannelNotifier::new();
        let session = Clientele::in_memory(Arc::new(notifier)).await.unwrap();

        let customer = session
            .customers()
            .create(&CustomerInput::new("Asha", "Kulkarni").city("Pune"))
            .await
            .unwrap();
        session
            .addresses()
            .create(
                &customer.id,
                &AddressInput::new("12 MG Road, Camp", "Pune", "Maharashtra", "411001"),
            )
            .await
            .unwrap();

        session
            .customers()
            .fetch(session.config().list.first_page(), CustomerFilter::all())
            .await
            .unwrap();
        assert_eq!(session.customers().items().await, vec![customer.clone()]);
        assert_eq!(session.addresses().items().await.len(), 1);

        // Deleting the customer takes its addresses with it
        session.customers().delete(&customer.id).await.unwrap();
        session.addresses().fetch(&customer.id).await.unwrap();
        assert!(session.addresses().items().await.is_empty());
        assert_eq!(session.customers().snapshot().await.total_count, 0);

        let mut messages = Vec::new();
        while let Ok(notice) = notices.try_recv() {
            messages.push(notice.message);
        }
        assert_eq!(
            messages,
            vec![
                "Customer created successfully",
                "Address created successfully",
                "Customer deleted successfully",
            ]
        );
    }

    #[tokio::test]
    async fn test_open_creates_fresh_data_directory() {
        let home = tempfile::tempdir().unwrap();
        let mut config = ClienteleConfig::default();
        config.database.path = home.path().join(".local/share/clientele/clientele.db");

        let session = Clientele::open(config, Arc::new(NoOpNotifier)).await.unwrap();
        session
            .customers()
            .fetch(PageRequest::default(), CustomerFilter::all())
            .await
            .unwrap();

        assert_eq!(session.customers().snapshot().await.total_count, 0);
        assert!(session.config().database.path.exists());
        session.close().await;
    }

    #[tokio::test]
    async fn test_open_rejects_invalid_config() {
        let mut config = ClienteleConfig::default();
        config.list.page_size = 0;

        let result = Clientele::open(config, Arc::new(NoOpNotifier)).await;
        assert!(matches!(result, Err(CollectionError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_closed_session_reports_store_errors() {
        let (notifier, mut notices) = ChannelNotifier::new();
        let session = Clientele::in_memory(Arc::new(notifier)).await.unwrap();
        session.close().await;

        let err = session
            .customers()
            .fetch(PageRequest::default(), CustomerFilter::all())
            .await
            .unwrap_err();

        assert_eq!(err.operation(), Some(Operation::FetchCustomers));
        assert_eq!(notices.try_recv().unwrap().message, "Failed to fetch customers");
        assert!(!session.customers().is_loading());
    }
}
