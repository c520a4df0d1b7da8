use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::customer::{Customer, CustomerEvent, CustomerId, CustomerRepository};
use crate::shared::{AggregateRoot, CancellationToken, DomainEvent, UnitOfWork};

use super::change_tracker::ChangeTracker;

// ============================================================================
// In-Memory Store
// ============================================================================

#[derive(Debug, Default)]
struct Committed {
    customers: HashMap<CustomerId, Customer>,
    dispatched: Vec<CustomerEvent>,
}

/// Process-local customer store shared by every invocation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    committed: Arc<Mutex<Committed>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a repository and unit of work for one command invocation
    pub fn begin(&self) -> (InMemoryCustomerRepository, InMemoryUnitOfWork) {
        let tracker = ChangeTracker::new();
        (
            InMemoryCustomerRepository {
                store: self.clone(),
                tracker: tracker.clone(),
            },
            InMemoryUnitOfWork {
                store: self.clone(),
                tracker,
            },
        )
    }

    /// Snapshot of every committed customer
    pub async fn customers(&self) -> Vec<Customer> {
        self.committed.lock().await.customers.values().cloned().collect()
    }

    /// Events drained from committed customers, in commit order
    pub async fn dispatched_events(&self) -> Vec<CustomerEvent> {
        self.committed.lock().await.dispatched.clone()
    }
}

pub struct InMemoryCustomerRepository {
    store: InMemoryStore,
    tracker: ChangeTracker,
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn add(&self, customer: Customer) -> Result<()> {
        self.tracker.stage(customer).await;
        Ok(())
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.store.committed.lock().await.customers.get(&id).cloned())
    }
}

pub struct InMemoryUnitOfWork {
    store: InMemoryStore,
    tracker: ChangeTracker,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(&self, cancellation: &CancellationToken) -> Result<u64> {
        let staged = self.tracker.take().await;
        if cancellation.is_cancelled() {
            tracing::warn!(discarded = staged.len(), "Commit cancelled, discarding staged changes");
            bail!("operation was cancelled");
        }

        let mut committed = self.store.committed.lock().await;
        let mut affected = 0;

        for mut customer in staged {
            let events = customer.take_pending_events();
            for event in &events {
                tracing::debug!(
                    event_id = %event.event_id(),
                    event_type = event.event_type(),
                    "Collected domain event"
                );
            }
            committed.dispatched.extend(events);
            committed.customers.insert(customer.id(), customer);
            affected += 1;
        }

        tracing::debug!(affected, "Committed in-memory changes");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::{Address, PhoneNumber};

    fn create_test_customer() -> Customer {
        Customer::register(
            CustomerId::new(),
            "Jane",
            "Roe",
            "jane@example.com",
            PhoneNumber::create("8765-4321").unwrap(),
            Address::create("Canada", "1 Bay St", Some("Suite 9"), "Toronto", "ON", "M5J 2N8").unwrap(),
            true,
        )
    }

    #[tokio::test]
    async fn test_add_only_stages_until_commit() {
        let store = InMemoryStore::new();
        let (repository, unit_of_work) = store.begin();
        let customer = create_test_customer();
        let id = customer.id();

        repository.add(customer).await.unwrap();

        assert!(store.customers().await.is_empty());
        assert!(repository.get_by_id(id).await.unwrap().is_none());

        let affected = unit_of_work.commit(&CancellationToken::new()).await.unwrap();

        assert_eq!(affected, 1);
        let loaded = repository.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.full_name(), "Jane Roe");
        assert_eq!(loaded.address().line2(), "Suite 9");
    }

    #[tokio::test]
    async fn test_commit_drains_events_into_dispatch_log() {
        let store = InMemoryStore::new();
        let (repository, unit_of_work) = store.begin();

        repository.add(create_test_customer()).await.unwrap();
        unit_of_work.commit(&CancellationToken::new()).await.unwrap();

        let dispatched = store.dispatched_events().await;
        assert_eq!(dispatched.len(), 1);
        assert_eq!(dispatched[0].event_type(), "CustomerRegistered");
        assert!(store.customers().await[0].pending_events().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_commit_discards_staged_customers() {
        let store = InMemoryStore::new();
        let (repository, unit_of_work) = store.begin();
        let cancellation = CancellationToken::new();

        repository.add(create_test_customer()).await.unwrap();
        cancellation.cancel();

        assert!(unit_of_work.commit(&cancellation).await.is_err());
        assert!(store.customers().await.is_empty());
        assert_eq!(unit_of_work.commit(&CancellationToken::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invocations_do_not_share_staged_changes() {
        let store = InMemoryStore::new();
        let (first_repository, _first_unit_of_work) = store.begin();
        let (_second_repository, second_unit_of_work) = store.begin();

        first_repository.add(create_test_customer()).await.unwrap();

        assert_eq!(second_unit_of_work.commit(&CancellationToken::new()).await.unwrap(), 0);
        assert!(store.customers().await.is_empty());
    }
}
