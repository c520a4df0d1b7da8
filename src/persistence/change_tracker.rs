use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::customer::Customer;

/// Customers staged by a repository and waiting for the unit of work.
///
/// One tracker per command invocation. The repository and the unit of work
/// of the same invocation hold clones of it.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    staged: Arc<Mutex<Vec<Customer>>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stage(&self, customer: Customer) {
        self.staged.lock().await.push(customer);
    }

    /// Take every staged customer, leaving the tracker empty
    pub async fn take(&self) -> Vec<Customer> {
        std::mem::take(&mut *self.staged.lock().await)
    }
}
