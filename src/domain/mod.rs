// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains domain-specific aggregates and business logic.
// Each aggregate has its own subdirectory with:
// - Value objects
// - Events
// - Commands
// - Errors
// - Aggregate implementation
// - Repository contract
// - Command handler
//
// Generic building blocks live in src/shared/, adapters in src/persistence/.
//
// ============================================================================

pub mod customer;
