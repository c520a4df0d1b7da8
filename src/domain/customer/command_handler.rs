use std::any::Any;
use std::panic::AssertUnwindSafe;

use anyhow::{Result, bail};
use futures_util::FutureExt;
use tracing::instrument;

use crate::shared::{AggregateRoot, CancellationToken, CommandResult, UnitOfWork};

use super::aggregate::Customer;
use super::commands::CreateCustomerCommand;
use super::errors::CustomerError;
use super::repository::CustomerRepository;
use super::value_objects::{Address, CustomerId, PhoneNumber};

// ============================================================================
// Create Customer Command Handler
// ============================================================================
//
// Orchestrates: Raw Input → Value Objects → Aggregate → Repository → Commit
//
// Validation short-circuits before anything is staged. Errors and panics
// from the repository or unit of work come back as a failure result and
// never reach the caller as a fault.
//
// ============================================================================

pub struct CreateCustomerHandler<R, U> {
    repository: R,
    unit_of_work: U,
}

impl<R, U> CreateCustomerHandler<R, U>
where
    R: CustomerRepository,
    U: UnitOfWork,
{
    pub fn new(repository: R, unit_of_work: U) -> Self {
        Self { repository, unit_of_work }
    }

    /// Register a new customer. Not idempotent: every successful call
    /// creates a new identity.
    #[instrument(name = "create_customer", skip_all)]
    pub async fn handle(
        &self,
        command: CreateCustomerCommand,
        cancellation: &CancellationToken,
    ) -> CommandResult<()> {
        let Some(phone_number) = PhoneNumber::create(&command.phone_number) else {
            tracing::warn!("Rejected customer: invalid phone number");
            return Err(CustomerError::InvalidPhoneNumber.into());
        };

        let Some(address) = Address::create(
            &command.country,
            &command.line1,
            command.line2.as_deref(),
            &command.city,
            &command.state,
            &command.zip_code,
        ) else {
            tracing::warn!("Rejected customer: invalid address");
            return Err(CustomerError::InvalidAddress.into());
        };

        let customer = Customer::register(
            CustomerId::new(),
            command.name,
            command.last_name,
            command.email,
            phone_number,
            address,
            true,
        );
        let customer_id = customer.id();

        match AssertUnwindSafe(self.persist(customer, cancellation))
            .catch_unwind()
            .await
        {
            Ok(Ok(affected)) => {
                tracing::info!(customer_id = %customer_id, affected, "Customer created");
                Ok(())
            }
            Ok(Err(e)) => {
                let message = format!("{e:#}");
                tracing::error!(customer_id = %customer_id, error = %message, "Failed to create customer");
                Err(CustomerError::CreateFailed(message).into())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(customer_id = %customer_id, error = %message, "Persistence panicked while creating customer");
                Err(CustomerError::CreateFailed(message).into())
            }
        }
    }

    async fn persist(&self, customer: Customer, cancellation: &CancellationToken) -> Result<u64> {
        if cancellation.is_cancelled() {
            bail!("operation was cancelled");
        }

        tracing::debug!(customer_id = %customer.id(), "Staging customer");
        self.repository.add(customer).await?;

        self.unit_of_work.commit(cancellation).await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
