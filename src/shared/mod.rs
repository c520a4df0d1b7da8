// ============================================================================
// Shared Kernel - Generic Domain Building Blocks
// ============================================================================
//
// Generic, reusable building blocks shared by every aggregate.
// Domain-specific code is in src/domain/
//
// ============================================================================

pub mod aggregate;
pub mod event;
pub mod result;
pub mod unit_of_work;

pub use aggregate::{AggregateRoot, PendingEvents};
pub use tokio_util::sync::CancellationToken;
pub use event::{DomainEvent, serialize_event};
pub use result::{CommandError, CommandResult, ErrorKind};
pub use unit_of_work::UnitOfWork;
