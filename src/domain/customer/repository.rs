use async_trait::async_trait;
use anyhow::Result;

use super::aggregate::Customer;
use super::value_objects::CustomerId;

// ============================================================================
// Customer Repository
// ============================================================================
//
// Persistence contract for the Customer aggregate. Implementations live in
// src/persistence/. Calls here carry no transaction semantics: `add` only
// stages the customer until the unit of work commits.
//
// ============================================================================

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn add(&self, customer: Customer) -> Result<()>;

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>>;
}
