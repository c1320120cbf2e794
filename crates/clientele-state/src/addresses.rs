//! # Address Collection
//!
//! Owns the address list of one customer at a time. Every mutation is
//! followed by a full re-read of that customer's addresses.
//!
//! ```text
//! fetch("c-1")                    items = addresses of c-1, customer_id = c-1
//! create("c-1", input)            insert NewAddress{customer_id: "c-1"}
//!                                 └── fetch("c-1")
//! update(id, "c-1", input)        update fields (owner untouched)
//!                                 └── fetch("c-1")
//! delete(id, "c-1")               delete row
//!                                 └── fetch("c-1")
//! fetch("c-2")                    c-1's list is discarded, not merged
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use clientele_core::{Address, AddressInput, NewAddress};

use crate::config::ListSettings;
use crate::error::{CollectionResult, Operation};
use crate::loading::LoadingTracker;
use crate::notify::{report_failure, report_success, Notifier};
use crate::store::AddressStore;

/// The address list as of the last successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressListState {
    /// Newest first.
    pub items: Vec<Address>,

    /// The customer `items` belong to.
    pub customer_id: Option<String>,
}

/// Address list manager.
pub struct AddressCollection<S: ?Sized = dyn AddressStore, N: ?Sized = dyn Notifier> {
    store: Arc<S>,
    notifier: Arc<N>,
    settings: ListSettings,
    state: RwLock<AddressListState>,
    loading: LoadingTracker,
    fetch_seq: AtomicU64,
}

impl<S, N> AddressCollection<S, N>
where
    S: AddressStore + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, settings: ListSettings) -> Self {
        AddressCollection {
            store,
            notifier,
            settings,
            state: RwLock::new(AddressListState::default()),
            loading: LoadingTracker::new(),
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Loads every address of `customer_id`, replacing the current list.
    pub async fn fetch(&self, customer_id: &str) -> CollectionResult<()> {
        let _loading = self.loading.begin();
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        debug!(seq, customer_id = %customer_id, "Fetching addresses");

        let items = self
            .store
            .query_addresses(customer_id)
            .await
            .map_err(|e| report_failure(&*self.notifier, Operation::FetchAddresses, e))?;

        let mut state = self.state.write().await;

        if self.settings.discard_stale_responses && self.fetch_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "Discarding stale address list");
            return Ok(());
        }

        state.items = items;
        state.customer_id = Some(customer_id.to_string());
        Ok(())
    }

    /// Adds an address owned by `customer_id`.
    ///
    /// Any `customer_id` carried by `input` is ignored.
    pub async fn create(&self, customer_id: &str, input: &AddressInput) -> CollectionResult<Address> {
        let _loading = self.loading.begin();

        let row = NewAddress::for_customer(customer_id, input);
        let address = self
            .store
            .insert_address(&row)
            .await
            .map_err(|e| report_failure(&*self.notifier, Operation::CreateAddress, e))?;

        info!(id = %address.id, customer_id = %customer_id, "Address created");
        report_success(&*self.notifier, Operation::CreateAddress);

        self.refetch(customer_id).await;
        Ok(address)
    }

    /// Replaces an address's fields, then re-reads `customer_id`'s list.
    ///
    /// Ownership of `id` is not checked here; the stored owner never changes.
    pub async fn update(
        &self,
        id: &str,
        customer_id: &str,
        input: &AddressInput,
    ) -> CollectionResult<Address> {
        let _loading = self.loading.begin();

        let address = self
            .store
            .update_address(id, input)
            .await
            .map_err(|e| report_failure(&*self.notifier, Operation::UpdateAddress, e))?;

        info!(id = %id, "Address updated");
        report_success(&*self.notifier, Operation::UpdateAddress);

        self.refetch(customer_id).await;
        Ok(address)
    }

    /// Deletes an address, then re-reads `customer_id`'s list.
    pub async fn delete(&self, id: &str, customer_id: &str) -> CollectionResult<()> {
        let _loading = self.loading.begin();

        self.store
            .delete_address(id)
            .await
            .map_err(|e| report_failure(&*self.notifier, Operation::DeleteAddress, e))?;

        info!(id = %id, "Address deleted");
        report_success(&*self.notifier, Operation::DeleteAddress);

        self.refetch(customer_id).await;
        Ok(())
    }

    /// A failed re-read is already reported by `fetch`.
    async fn refetch(&self, customer_id: &str) {
        if let Err(e) = self.fetch(customer_id).await {
            debug!(error = %e, "Re-fetch after address mutation failed");
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub async fn snapshot(&self) -> AddressListState {
        self.state.read().await.clone()
    }

    pub async fn items(&self) -> Vec<Address> {
        self.state.read().await.items.clone()
    }

    /// The customer whose addresses are loaded.
    pub async fn customer_id(&self) -> Option<String> {
        self.state.read().await.customer_id.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{ChannelNotifier, Notice};
    use crate::store::testing::TestStore;
    use clientele_core::CustomerInput;
    use tokio::sync::mpsc::UnboundedReceiver;

    type TestCollection = AddressCollection<TestStore, ChannelNotifier>;

    struct Fixture {
        store: Arc<TestStore>,
        addresses: Arc<TestCollection>,
        notices: UnboundedReceiver<Notice>,
        asha: String,
        ravi: String,
    }

    async fn setup() -> Fixture {
        let store = TestStore::new().await;
        let customers = store.db().customers();
        let asha = customers
            .insert(&CustomerInput::new("Asha", "Kulkarni"))
            .await
            .unwrap()
            .id;
        let ravi = customers
            .insert(&CustomerInput::new("Ravi", "Iyer"))
            .await
            .unwrap()
            .id;

        let (notifier, notices) = ChannelNotifier::new();
        let addresses =
            AddressCollection::new(store.clone(), Arc::new(notifier), ListSettings::default());

        Fixture {
            store,
            addresses: Arc::new(addresses),
            notices,
            asha,
            ravi,
        }
    }

    fn mg_road() -> AddressInput {
        AddressInput::new("12 MG Road, Camp", "Pune", "Maharashtra", "411001")
    }

    fn fc_road() -> AddressInput {
        AddressInput::new("4 FC Road", "Pune", "Maharashtra", "411004")
    }

    fn drain(rx: &mut UnboundedReceiver<Notice>) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = rx.try_recv() {
            notices.push(notice);
        }
        notices
    }

    #[tokio::test]
    async fn test_create_forces_owner_and_refetches() {
        let mut fx = setup().await;

        let mut spoofed = mg_road();
        spoofed.customer_id = Some(fx.ravi.clone());

        let address = fx.addresses.create(&fx.asha, &spoofed).await.unwrap();

        assert_eq!(address.customer_id, fx.asha);
        assert_eq!(fx.addresses.items().await, vec![address]);
        assert_eq!(fx.addresses.customer_id().await.as_deref(), Some(fx.asha.as_str()));
        assert!(fx
            .store
            .db()
            .addresses()
            .list_for_customer(&fx.ravi)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            drain(&mut fx.notices),
            vec![Notice::success("Address created successfully")]
        );
    }

    #[tokio::test]
    async fn test_fetch_is_newest_first() {
        let fx = setup().await;

        let first = fx.addresses.create(&fx.asha, &mg_road()).await.unwrap();
        let second = fx.addresses.create(&fx.asha, &fc_road()).await.unwrap();

        fx.addresses.fetch(&fx.asha).await.unwrap();
        let ids: Vec<_> = fx.addresses.items().await.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_switching_customer_discards_list() {
        let fx = setup().await;
        fx.addresses.create(&fx.asha, &mg_road()).await.unwrap();
        fx.addresses.create(&fx.ravi, &fc_road()).await.unwrap();

        fx.addresses.fetch(&fx.asha).await.unwrap();
        fx.addresses.fetch(&fx.ravi).await.unwrap();

        let state = fx.addresses.snapshot().await;
        assert_eq!(state.customer_id.as_deref(), Some(fx.ravi.as_str()));
        assert_eq!(state.items.len(), 1);
        assert!(state.items.iter().all(|a| a.customer_id == fx.ravi));
    }

    #[tokio::test]
    async fn test_update_keeps_owner() {
        let mut fx = setup().await;
        let address = fx.addresses.create(&fx.asha, &mg_road()).await.unwrap();

        let mut moved = fc_road();
        moved.customer_id = Some(fx.ravi.clone());
        let updated = fx
            .addresses
            .update(&address.id, &fx.asha, &moved)
            .await
            .unwrap();

        assert_eq!(updated.customer_id, fx.asha);
        assert_eq!(updated.address_line, "4 FC Road");
        assert_eq!(fx.addresses.items().await, vec![updated]);
        assert_eq!(
            drain(&mut fx.notices).last(),
            Some(&Notice::success("Address updated successfully"))
        );
    }

    #[tokio::test]
    async fn test_deleted_address_never_refetched() {
        let mut fx = setup().await;
        let keep = fx.addresses.create(&fx.asha, &mg_road()).await.unwrap();
        let gone = fx.addresses.create(&fx.asha, &fc_road()).await.unwrap();
        drain(&mut fx.notices);

        fx.addresses.delete(&gone.id, &fx.asha).await.unwrap();
        assert_eq!(fx.addresses.items().await, vec![keep.clone()]);

        fx.addresses.fetch(&fx.asha).await.unwrap();
        assert!(fx.addresses.items().await.iter().all(|a| a.id != gone.id));

        let err = fx.addresses.delete(&gone.id, &fx.asha).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            drain(&mut fx.notices),
            vec![
                Notice::success("Address deleted successfully"),
                Notice::error("Failed to delete address"),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_for_missing_customer_fails() {
        let mut fx = setup().await;

        let err = fx.addresses.create("nobody", &mg_road()).await.unwrap_err();

        assert_eq!(err.operation(), Some(Operation::CreateAddress));
        assert!(fx.addresses.items().await.is_empty());
        assert_eq!(
            drain(&mut fx.notices),
            vec![Notice::error("Failed to create address")]
        );
    }

    #[tokio::test]
    async fn test_update_missing_address_fails() {
        let mut fx = setup().await;
        fx.addresses.create(&fx.asha, &mg_road()).await.unwrap();
        let before = fx.addresses.snapshot().await;
        drain(&mut fx.notices);

        // Written behind the collection's back; a re-read would surface it
        fx.store
            .db()
            .addresses()
            .insert(&clientele_core::NewAddress::for_customer(&fx.asha, &fc_road()))
            .await
            .unwrap();

        let err = fx
            .addresses
            .update("no-such-address", &fx.asha, &fc_road())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.operation(), Some(Operation::UpdateAddress));
        assert_eq!(fx.addresses.snapshot().await, before);
        assert_eq!(
            drain(&mut fx.notices),
            vec![Notice::error("Failed to update address")]
        );
        assert!(!fx.addresses.is_loading());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_list() {
        let mut fx = setup().await;
        fx.addresses.create(&fx.asha, &mg_road()).await.unwrap();
        let before = fx.addresses.snapshot().await;
        drain(&mut fx.notices);

        fx.store.set_failing(true);
        assert!(fx.addresses.fetch(&fx.ravi).await.is_err());

        assert_eq!(fx.addresses.snapshot().await, before);
        assert_eq!(
            drain(&mut fx.notices),
            vec![Notice::error("Failed to fetch addresses")]
        );
    }

    #[tokio::test]
    async fn test_mutation_survives_failed_refetch() {
        let mut fx = setup().await;
        let address = fx.addresses.create(&fx.asha, &mg_road()).await.unwrap();
        drain(&mut fx.notices);

        fx.store.set_failing_reads(true);
        fx.addresses.delete(&address.id, &fx.asha).await.unwrap();

        // The stale list stays until a re-read succeeds
        assert_eq!(fx.addresses.items().await, vec![address.clone()]);
        assert_eq!(
            drain(&mut fx.notices),
            vec![
                Notice::success("Address deleted successfully"),
                Notice::error("Failed to fetch addresses"),
            ]
        );
        assert!(!fx.addresses.is_loading());

        fx.store.set_failing_reads(false);
        fx.addresses.fetch(&fx.asha).await.unwrap();
        assert!(fx.addresses.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_loading_while_fetch_in_flight() {
        let fx = setup().await;

        fx.store.hold_next_call();
        let task = tokio::spawn({
            let addresses = fx.addresses.clone();
            let owner = fx.asha.clone();
            async move { addresses.fetch(&owner).await }
        });

        fx.store.entered.notified().await;
        assert!(fx.addresses.is_loading());

        fx.store.release.notify_one();
        task.await.unwrap().unwrap();
        assert!(!fx.addresses.is_loading());
    }

    #[tokio::test]
    async fn test_loading_while_create_in_flight() {
        let fx = setup().await;

        fx.store.hold_next_call();
        let task = tokio::spawn({
            let addresses = fx.addresses.clone();
            let owner = fx.asha.clone();
            async move { addresses.create(&owner, &mg_road()).await }
        });

        fx.store.entered.notified().await;
        assert!(fx.addresses.is_loading());
        assert!(fx.addresses.items().await.is_empty());

        fx.store.release.notify_one();
        let address = task.await.unwrap().unwrap();
        assert!(!fx.addresses.is_loading());
        assert_eq!(fx.addresses.items().await, vec![address]);
    }
}
