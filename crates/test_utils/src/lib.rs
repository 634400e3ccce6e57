//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims reconciliation test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claim records and report pairs
//! - `builders`: Builder for claim records with sensible defaults
//! - `assertions`: Report-level consistency assertions
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
