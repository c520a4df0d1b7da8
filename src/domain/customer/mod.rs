// ============================================================================
// Customer Domain - Business Logic for Customer Aggregate
// ============================================================================
//
// This module contains ALL Customer-specific code:
// - Value objects (CustomerId, PhoneNumber, Address)
// - Events (CustomerRegistered)
// - Commands (CreateCustomerCommand)
// - Errors (CustomerError and the result codes)
// - Aggregate (Customer)
// - Repository contract (CustomerRepository)
// - Command Handler (CreateCustomerHandler)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod repository;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use repository::*;
pub use command_handler::*;
