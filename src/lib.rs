// ============================================================================
// Point-of-Sale Customer Registration
// ============================================================================
//
// Layers:
// - shared:      generic building blocks (aggregate root, events, results)
// - domain:      customer aggregate, value objects and command handler
// - persistence: repository / unit of work adapters (in-memory, PostgreSQL)
// - utils:       infrastructure helpers (retry)
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod persistence;
pub mod shared;
pub mod utils;

pub use domain::customer::{CreateCustomerCommand, CreateCustomerHandler};
pub use shared::{CancellationToken, CommandError, CommandResult, ErrorKind};
