// ============================================================================
// Persistence Adapters
// ============================================================================
//
// Implementations of CustomerRepository and UnitOfWork.
//
// - in_memory: process-local store, used by tests and the demo binary
// - postgres: sqlx/PostgreSQL store, customer row + outbox in one transaction
//
// Both share the same shape: `begin()` hands out a repository and a unit of
// work bound to a fresh ChangeTracker for one command invocation.
//
// ============================================================================

mod change_tracker;
pub mod in_memory;
pub mod postgres;

pub use in_memory::{InMemoryCustomerRepository, InMemoryStore, InMemoryUnitOfWork};
pub use postgres::{PgCustomerRepository, PgStore, PgUnitOfWork};
